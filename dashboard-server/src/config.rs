//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::feed::DEFAULT_BASE_URL;

const DEFAULT_ADDR: &str = "127.0.0.1:5001";
const DEFAULT_REFRESH_SECS: u64 = 30;
const DEFAULT_CACHE_FILE: &str = "cache/train_data.json";
const DEFAULT_STATIC_DIR: &str = "static";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// Neither an API key nor a mock file was given
    #[error("set MARTA_API_KEY for live data or MARTA_MOCK_FILE for sample data")]
    NoFeed,
}

/// Where train data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Live { api_key: String, base_url: String },
    Mock { path: PathBuf },
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub addr: SocketAddr,
    pub feed: FeedSource,
    pub refresh_interval: Duration,
    pub cache_file: PathBuf,
    pub static_dir: PathBuf,
}

impl DashboardConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through a lookup function.
    ///
    /// A mock file takes precedence over an API key. Blank values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let addr_text = get("DASHBOARD_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr_text.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::Invalid {
                var: "DASHBOARD_ADDR",
                value: addr_text.clone(),
                reason: e.to_string(),
            }
        })?;

        let refresh_secs = match get("DASHBOARD_REFRESH_SECS") {
            None => DEFAULT_REFRESH_SECS,
            Some(text) => match text.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        var: "DASHBOARD_REFRESH_SECS",
                        value: text,
                        reason: "must be at least 1".to_string(),
                    });
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: "DASHBOARD_REFRESH_SECS",
                        value: text,
                        reason: e.to_string(),
                    });
                }
            },
        };

        let feed = if let Some(path) = get("MARTA_MOCK_FILE") {
            FeedSource::Mock { path: path.into() }
        } else if let Some(api_key) = get("MARTA_API_KEY") {
            FeedSource::Live {
                api_key,
                base_url: get("MARTA_TRAIN_API_URL")
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            }
        } else {
            return Err(ConfigError::NoFeed);
        };

        Ok(Self {
            addr,
            feed,
            refresh_interval: Duration::from_secs(refresh_secs),
            cache_file: get("DASHBOARD_CACHE_FILE")
                .unwrap_or_else(|| DEFAULT_CACHE_FILE.to_string())
                .into(),
            static_dir: get("DASHBOARD_STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
                .into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<DashboardConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DashboardConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_with_api_key() {
        let config = config(&[("MARTA_API_KEY", "secret")]).unwrap();
        assert_eq!(config.addr, "127.0.0.1:5001".parse().unwrap());
        assert_eq!(config.refresh_interval, Duration::from_secs(30));
        assert_eq!(config.cache_file, PathBuf::from("cache/train_data.json"));
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(
            config.feed,
            FeedSource::Live {
                api_key: "secret".into(),
                base_url: DEFAULT_BASE_URL.into(),
            }
        );
    }

    #[test]
    fn mock_file_wins() {
        let config = config(&[
            ("MARTA_API_KEY", "secret"),
            ("MARTA_MOCK_FILE", "data/mock_trains.json"),
        ])
        .unwrap();
        assert_eq!(
            config.feed,
            FeedSource::Mock {
                path: "data/mock_trains.json".into()
            }
        );
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("MARTA_API_KEY", "k"),
            ("MARTA_TRAIN_API_URL", "http://localhost:9000/trains"),
            ("DASHBOARD_ADDR", "0.0.0.0:8080"),
            ("DASHBOARD_REFRESH_SECS", "10"),
            ("DASHBOARD_CACHE_FILE", "/tmp/trains.json"),
        ])
        .unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.refresh_interval, Duration::from_secs(10));
        assert_eq!(config.cache_file, PathBuf::from("/tmp/trains.json"));
        assert!(matches!(
            config.feed,
            FeedSource::Live { ref base_url, .. } if base_url == "http://localhost:9000/trains"
        ));
    }

    #[test]
    fn no_feed_configured() {
        assert_eq!(config(&[]), Err(ConfigError::NoFeed));
        assert_eq!(config(&[("MARTA_API_KEY", "  ")]), Err(ConfigError::NoFeed));
    }

    #[test]
    fn invalid_values() {
        let err = config(&[("MARTA_API_KEY", "k"), ("DASHBOARD_ADDR", "nope")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "DASHBOARD_ADDR", .. }));

        let err = config(&[("MARTA_API_KEY", "k"), ("DASHBOARD_REFRESH_SECS", "0")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "DASHBOARD_REFRESH_SECS",
                ..
            }
        ));
    }
}
