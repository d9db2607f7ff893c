// src/utils/log.rs

//! Logging setup for the Huffman codec.
//!
//! Library code emits records through the `log` facade (`debug!` for pass
//! summaries, `trace!` for per-entry header detail). Nothing is printed unless
//! the host application installs a logger.
//!
//! Binaries and tests that just want to see the output can install a
//! `tracing` subscriber, which also picks up `log` records:
//!
//! ```
//! huffpack::utils::log::init_subscriber(tracing::Level::DEBUG);
//! ```

pub use log::{debug, error, info, trace, warn};
pub use tracing::Level;

/// Installs a global subscriber that writes to standard error.
///
/// Returns `false` if a global subscriber or logger was already installed,
/// which makes it safe to call from several tests.
///
/// # Arguments
/// * `max_level` - The most verbose level to emit (e.g. `Level::INFO`).
pub fn init_subscriber(max_level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        // Whichever call wins, the second must not panic.
        let _ = init_subscriber(Level::TRACE);
        assert!(!init_subscriber(Level::TRACE));
    }
}
