// src/codec/params.rs

/// Settings shared by the encoder and the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecParams {
    /// Capacity of the buffers wrapped around the input and output (default: 8 KiB)
    pub buffer_size: usize,
    /// Log the symbol/frequency/code report at debug level after building codes
    pub log_code_table: bool,
}

impl Default for CodecParams {
    fn default() -> Self {
        Self {
            buffer_size: 8 * 1024,
            log_code_table: false,
        }
    }
}

impl CodecParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the I/O buffer capacity. Zero is raised to one byte.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    pub fn with_code_table_logging(mut self, enabled: bool) -> Self {
        self.log_code_table = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_builders() {
        let params = CodecParams::default();
        assert_eq!(params.buffer_size, 8192);
        assert!(!params.log_code_table);

        let params = CodecParams::new()
            .with_buffer_size(0)
            .with_code_table_logging(true);
        assert_eq!(params.buffer_size, 1);
        assert!(params.log_code_table);
    }
}
