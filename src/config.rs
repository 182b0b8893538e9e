//! Configuration file parser for ~/.config/catpick/config.toml.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Unknown keys are ignored by serde, though we log a warning so typos
//! don't go unnoticed.
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme variant name ("dark" or "light").
    pub theme: String,

    /// Categories file to load when `--categories` is not given.
    pub categories_file: Option<PathBuf>,

    /// Drop repeated names from type-ahead results.
    pub dedupe_search: bool,

    /// Whether category groups start expanded.
    pub expand_groups: bool,

    /// Keybinding overrides. Keys are action names, values are key strings.
    pub keybindings: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            categories_file: None,
            dedupe_search: true,
            expand_groups: true,
            keybindings: HashMap::new(),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 5] = [
        "theme",
        "categories_file",
        "dedupe_search",
        "expand_groups",
        "keybindings",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)`
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), theme = %config.theme, "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        Ok(toml::from_str(content)?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "dark");
        assert!(config.categories_file.is_none());
        assert!(config.dedupe_search);
        assert!(config.expand_groups);
        assert!(config.keybindings.is_empty());
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/catpick_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_empty_file_returns_default() {
        let dir = std::env::temp_dir().join("catpick_config_test_empty");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme, "dark");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let config = Config::from_toml("theme = \"light\"\n").unwrap();
        assert_eq!(config.theme, "light");
        assert!(config.dedupe_search);
        assert!(config.expand_groups);
    }

    #[test]
    fn test_full_config() {
        let content = r#"
theme = "light"
categories_file = "/srv/forms/categories.toml"
dedupe_search = false
expand_groups = false

[keybindings]
quit = "Ctrl+q"
toggle = "x"
"#;
        let config = Config::from_toml(content).unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(
            config.categories_file.as_deref(),
            Some(Path::new("/srv/forms/categories.toml"))
        );
        assert!(!config.dedupe_search);
        assert!(!config.expand_groups);
        assert_eq!(
            config.keybindings.get("toggle").map(String::as_str),
            Some("x")
        );
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let config = Config::from_toml("theme = \"dark\"\ncolour = \"red\"\n").unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let result = Config::from_toml("theme = [unterminated");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_oversized_file_rejected() {
        let dir = std::env::temp_dir().join("catpick_config_test_large");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let padding = "#".repeat(Config::MAX_FILE_SIZE as usize + 1);
        std::fs::write(&path, padding).unwrap();

        let result = Config::load(&path);
        assert!(matches!(result, Err(ConfigError::TooLarge(_))));

        std::fs::remove_dir_all(&dir).ok();
    }
}
