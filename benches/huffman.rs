use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use huffpack::{FrequencyTable, HuffmanTree, compress, decompress};

const SIZES: &[usize] = &[8192, 65536, 1_048_576];

/// Text-like input with a skewed byte distribution.
fn test_data(size: usize) -> Vec<u8> {
    let text = b"It was the best of times, it was the worst of times, it was the age of wisdom. ";
    text.iter().copied().cycle().take(size).collect()
}

fn bench_huffman(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman");
    for &size in SIZES {
        let data = test_data(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("build_codes", size), &data, |b, data| {
            b.iter(|| {
                let frequencies = FrequencyTable::from_bytes(data);
                HuffmanTree::from_frequencies(&frequencies)
                    .and_then(|tree| tree.code_table())
                    .unwrap()
            });
        });

        group.bench_with_input(BenchmarkId::new("compress", size), &data, |b, data| {
            b.iter(|| compress(data).unwrap());
        });

        let packed = compress(&data).unwrap();
        group.bench_with_input(BenchmarkId::new("decompress", size), &packed, |b, packed| {
            b.iter(|| decompress(packed).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_huffman);
criterion_main!(benches);
