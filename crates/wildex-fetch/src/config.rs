use std::time::Duration;

/// Seconds before a single image request is abandoned
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP settings for image downloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl FetchConfig {
    pub fn with_timeout_secs(secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(secs),
            ..Self::default()
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("wildex/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("wildex/"));
    }

    #[test]
    fn test_with_timeout_secs() {
        let config = FetchConfig::with_timeout_secs(5);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, FetchConfig::default().user_agent);
    }
}
