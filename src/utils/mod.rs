//! Utilities: logging setup (verbosity -> tracing level) and monotonic timing.
//!
//! Key items:
//!   derive_level / init_logging
//!   monotonic_ms

use std::sync::OnceLock;
use std::time::Instant;

use tracing::Level;

/// Logging helpers.
pub mod logging {
    use super::*;

    /// Map `-v` count and `--quiet` to a max level.
    ///
    /// quiet -> ERROR, default -> INFO, -v -> DEBUG, -vv and above -> TRACE.
    pub fn derive_level(verbose: u8, quiet: bool) -> Level {
        if quiet {
            return Level::ERROR;
        }
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Install the global fmt subscriber. Logs go to stderr so stdout stays
    /// clean for JSON output. Calling this twice is harmless.
    pub fn init_logging(level: Level) {
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

pub use logging::{derive_level, init_logging};

/// Milliseconds since the first call in this process (NOT wall clock).
pub fn monotonic_ms() -> u128 {
    static START: OnceLock<Instant> = OnceLock::new();
    let base = START.get_or_init(Instant::now);
    base.elapsed().as_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(derive_level(0, false), Level::INFO);
        assert_eq!(derive_level(1, false), Level::DEBUG);
        assert_eq!(derive_level(5, false), Level::TRACE);
        assert_eq!(derive_level(2, true), Level::ERROR);
    }

    #[test]
    fn monotonic_does_not_go_backwards() {
        let a = monotonic_ms();
        let b = monotonic_ms();
        assert!(b >= a);
    }

    #[test]
    fn init_twice_is_fine() {
        init_logging(Level::ERROR);
        init_logging(Level::DEBUG);
    }
}
