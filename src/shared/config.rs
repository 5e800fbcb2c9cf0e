//! Application configuration. Menu location, paths, timeouts.

use serde::Deserialize;

/// Default HTTP timeout for the menu fetch, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// URL of the hosted menu document. Read from QRMENU_MENU_URL.
    pub menu_url: Option<String>,

    /// Directory for the cart file and menu snapshot. Read from QRMENU_DATA_DIR.
    pub data_dir: Option<String>,

    /// Menu fetch timeout in seconds. Read from QRMENU_HTTP_TIMEOUT_SECS.
    #[serde(default)]
    pub http_timeout_secs: Option<u64>,

    /// Offline menu snapshot toggle (default on). Read from QRMENU_OFFLINE_CACHE.
    #[serde(default)]
    pub offline_cache: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("QRMENU"));
        if let Ok(path) = std::env::var("QRMENU_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let cfg: Self = c.build()?.try_deserialize()?;
        Ok(cfg)
    }

    /// Returns the data directory. Defaults to "./data".
    pub fn data_dir_or_default(&self) -> String {
        self.data_dir.clone().unwrap_or_else(|| "./data".to_string())
    }

    /// Returns the menu fetch timeout in seconds. Defaults to 10 if unset.
    pub fn http_timeout_secs_or_default(&self) -> u64 {
        self.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
    }

    /// Returns true unless the offline snapshot is explicitly disabled.
    pub fn offline_cache_enabled(&self) -> bool {
        self.offline_cache.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.data_dir_or_default(), "./data");
        assert_eq!(cfg.http_timeout_secs_or_default(), DEFAULT_HTTP_TIMEOUT_SECS);
        assert!(cfg.offline_cache_enabled());
        assert!(cfg.menu_url.is_none());
    }
}
