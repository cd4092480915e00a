use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that takes precedence over `provider.api_key`
pub const API_KEY_ENV: &str = "NEBULIX_TMDB_API_KEY";

/// Value written by `config init` before a real key is supplied
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
    #[serde(default)]
    pub watchlist: WatchlistConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// Quiet period before a search query is sent
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_card_poster_size")]
    pub card_poster_size: String,
    #[serde(default = "default_detail_image_size")]
    pub detail_image_size: String,
    #[serde(default = "default_cast_limit")]
    pub cast_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WatchlistConfig {
    /// Overrides the default `<data dir>/watchlist.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Daily-rotated log file; logs go to stderr when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_card_poster_size() -> String {
    "w500".to_string()
}

fn default_detail_image_size() -> String {
    "original".to_string()
}

fn default_cast_limit() -> usize {
    5
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            card_poster_size: default_card_poster_size(),
            detail_image_size: default_detail_image_size(),
            cast_limit: default_cast_limit(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// API key from the environment, falling back to the config file
    pub fn api_key(&self) -> Option<String> {
        self.api_key_with_env(std::env::var(API_KEY_ENV).ok())
    }

    fn api_key_with_env(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .filter(|k| !k.trim().is_empty())
            .or_else(|| Some(self.provider.api_key.clone()))
            .filter(|k| !k.trim().is_empty() && k != PLACEHOLDER_API_KEY)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key().is_none() {
            return Err(anyhow::anyhow!(
                "provider.api_key is not configured (set it in config.toml or {})",
                API_KEY_ENV
            ));
        }
        if self.provider.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("provider.base_url cannot be empty"));
        }
        if self.provider.timeout_secs == 0 {
            return Err(anyhow::anyhow!("provider.timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Watchlist file, honouring the config override
    pub fn watchlist_file(&self, paths: &crate::PathManager) -> PathBuf {
        self.watchlist
            .file
            .clone()
            .unwrap_or_else(|| paths.watchlist_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.provider.api_key = "abc123".to_string();
        config.browse.debounce_ms = 250;
        config.watchlist.file = Some(PathBuf::from("/tmp/list.json"));

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.provider.api_key, "abc123");
        assert_eq!(loaded.browse.debounce_ms, 250);
        assert_eq!(loaded.browse.cast_limit, 5);
        assert_eq!(loaded.watchlist.file, Some(PathBuf::from("/tmp/list.json")));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[provider]\napi_key = \"k\"\n").unwrap();
        assert_eq!(config.provider.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.provider.timeout_secs, 15);
        assert_eq!(config.browse.debounce_ms, 500);
        assert_eq!(config.browse.card_poster_size, "w500");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert!(config.provider.api_key.is_empty());
    }

    #[test]
    fn test_api_key_resolution() {
        let mut config = Config::default();
        assert_eq!(config.api_key_with_env(None), None);

        config.provider.api_key = PLACEHOLDER_API_KEY.to_string();
        assert_eq!(config.api_key_with_env(None), None);

        config.provider.api_key = "from-file".to_string();
        assert_eq!(config.api_key_with_env(None).as_deref(), Some("from-file"));
        assert_eq!(config.api_key_with_env(Some("from-env".to_string())).as_deref(), Some("from-env"));
        assert_eq!(config.api_key_with_env(Some("  ".to_string())).as_deref(), Some("from-file"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.provider.api_key = "k".to_string();
        config.provider.timeout_secs = 0;
        // an env key may be present on the test machine; timeout check still fails
        assert!(config.validate().is_err());
    }
}
