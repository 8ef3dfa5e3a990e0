pub mod domain;
pub mod ingest;
pub mod runtime;
pub mod view;

pub mod config {
    use std::time::Duration;

    pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    #[derive(Debug, Clone, Default)]
    pub struct Settings {
        pub base_url: Option<String>,
        pub timeout_secs: Option<u64>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let timeout_secs = match std::env::var("QUANTINTEL_TIMEOUT_SECS") {
                Ok(s) => Some(s.trim().parse::<u64>().map_err(|e| {
                    anyhow::anyhow!("QUANTINTEL_TIMEOUT_SECS must be a whole number of seconds: {e}")
                })?),
                Err(_) => None,
            };

            Ok(Self {
                base_url: std::env::var("QUANTINTEL_BASE_URL")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
                timeout_secs,
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        pub fn base_url(&self) -> &str {
            self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
        }

        pub fn timeout(&self) -> Duration {
            Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn defaults_point_at_local_backend() {
            let settings = Settings::default();
            assert_eq!(settings.base_url(), "http://localhost:8000");
            assert_eq!(settings.timeout(), Duration::from_secs(10));
        }
    }
}
