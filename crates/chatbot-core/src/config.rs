use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Result, anyhow};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings persisted between runs.
///
/// `language` is the single slot the localization store reads at startup and
/// writes on every toggle. Unknown fields are ignored and missing ones fall
/// back to defaults, so older files keep loading.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub language: Option<String>,
    pub server_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Rewrite only the language slot, keeping whatever else is stored.
    ///
    /// A file that exists but does not parse is left alone and reported as an
    /// error; rewriting it would drop the other settings it holds.
    pub fn save_language(path: &Path, code: &str) -> Result<()> {
        let mut config = Self::load_from(path)
            .map_err(|e| anyhow!("refusing to overwrite unreadable settings: {}", e))?;
        config.language = Some(code.to_string());
        config.save_to(path)
    }

    pub fn server_url(&self) -> &str {
        self.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("chatbot").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();

        assert_eq!(config, Config::new());
        assert_eq!(config.server_url(), DEFAULT_SERVER_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_save_language_keeps_other_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            language: None,
            server_url: Some("http://chat.local".to_string()),
            request_timeout_secs: Some(5),
        };
        config.save_to(&path).unwrap();

        Config::save_language(&path, "en").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(
            loaded,
            Config {
                language: Some("en".to_string()),
                server_url: Some("http://chat.local".to_string()),
                request_timeout_secs: Some(5),
            }
        );
    }

    #[test]
    fn test_partial_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"language":"ja"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.language.as_deref(), Some("ja"));
        assert_eq!(config.server_url, None);
    }

    #[test]
    fn test_save_language_leaves_corrupt_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let corrupt = r#"{"server_url": "http://chat.local", "#;
        fs::write(&path, corrupt).unwrap();

        assert!(Config::save_language(&path, "en").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), corrupt);
    }
}
