use std::time::Duration;

use crate::error::SweepError;

/// Maximum number of probes in flight when the caller does not choose one.
pub const DEFAULT_WORKERS: usize = 50;
pub const DEFAULT_COUNT: u32 = 1;
pub const DEFAULT_TIMEOUT_MS: u64 = 1_000;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(DEFAULT_TIMEOUT_MS);

/// Terminal behaviour of the front-end.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Skips the banner line at startup.
    pub no_banner: bool,
    /// `0` prints everything, `1` drops headers, `2` prints only the responsive addresses.
    pub quiet: u8,
    /// Disables the keyboard listener that lets the user finish a sweep early.
    pub disable_input: bool,
}

/// Attempt count and per-attempt timeout, fixed for the lifetime of one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeConfig {
    count: u32,
    timeout: Duration,
}

impl ProbeConfig {
    pub fn new(count: u32, timeout: Duration) -> Result<Self, SweepError> {
        if count == 0 {
            return Err(SweepError::InvalidProbeConfig(
                "ping count must be at least 1".to_string(),
            ));
        }
        if timeout.is_zero() {
            return Err(SweepError::InvalidProbeConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(Self { count, timeout })
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_config_accepts_valid_values() {
        let cfg = ProbeConfig::new(3, Duration::from_millis(250)).unwrap();
        assert_eq!(cfg.count(), 3);
        assert_eq!(cfg.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn probe_config_rejects_zero_count() {
        let err = ProbeConfig::new(0, Duration::from_millis(100)).unwrap_err();
        assert!(matches!(err, SweepError::InvalidProbeConfig(_)));
        assert!(err.to_string().contains("count"));
    }

    #[test]
    fn probe_config_rejects_zero_timeout() {
        let err = ProbeConfig::new(1, Duration::ZERO).unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn probe_config_default_matches_constants() {
        let cfg = ProbeConfig::default();
        assert_eq!(cfg.count(), DEFAULT_COUNT);
        assert_eq!(cfg.timeout(), DEFAULT_TIMEOUT);
    }
}
