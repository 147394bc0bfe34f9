use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the polling backend, e.g. "http://localhost:3000/api"
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// How often the vote view re-checks for an active poll
    #[serde(default = "default_vote_refresh_secs")]
    pub vote_refresh_secs: u64,

    /// How often the results view re-fetches tallies
    #[serde(default = "default_results_refresh_secs")]
    pub results_refresh_secs: u64,

    /// Per-request timeout for backend calls
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Desktop notifications from the watch daemon
    #[serde(default = "default_notifications")]
    pub notifications: bool,
}

fn default_api_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_vote_refresh_secs() -> u64 {
    2
}

fn default_results_refresh_secs() -> u64 {
    5
}

fn default_request_timeout_secs() -> u64 {
    5
}

fn default_notifications() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            vote_refresh_secs: default_vote_refresh_secs(),
            results_refresh_secs: default_results_refresh_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            notifications: default_notifications(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("pollbooth");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default. POLLBOOTH_API_URL overrides
    /// the base URL either way.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file();

        if let Ok(url) = std::env::var("POLLBOOTH_API_URL") {
            if !url.trim().is_empty() {
                config.api_base_url = url.trim().to_string();
            }
        }

        Ok(config)
    }

    fn load_file() -> Self {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return AppConfig::default(),
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
        }

        let config = AppConfig::default();
        let _ = config.save();
        config
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn vote_refresh(&self) -> Duration {
        Duration::from_secs(self.vote_refresh_secs.max(1))
    }

    pub fn results_refresh(&self) -> Duration {
        Duration::from_secs(self.results_refresh_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            api_base_url: "http://example.test/api".to_string(),
            vote_refresh_secs: 3,
            results_refresh_secs: 7,
            request_timeout_secs: 4,
            notifications: false,
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(config.api_base_url, deserialized.api_base_url);
        assert_eq!(config.vote_refresh_secs, deserialized.vote_refresh_secs);
        assert_eq!(config.notifications, deserialized.notifications);
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let config: AppConfig = toml::from_str("api_base_url = \"http://host/api\"").unwrap();
        assert_eq!(config.api_base_url, "http://host/api");
        assert_eq!(config.vote_refresh_secs, 2);
        assert_eq!(config.results_refresh_secs, 5);
        assert!(config.notifications);
    }

    #[test]
    fn test_intervals_never_zero() {
        let config: AppConfig = toml::from_str("vote_refresh_secs = 0").unwrap();
        assert_eq!(config.vote_refresh(), Duration::from_secs(1));
    }
}
