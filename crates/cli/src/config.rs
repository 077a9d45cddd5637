//! CLI configuration management

use anyhow::{Context, Result, anyhow};
use protocol::{CLIENT_NAME, ParseMode, is_round_trip_safe};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub client: ClientSettings,
    #[serde(default)]
    pub parser: ParserSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    #[serde(default = "GeneralSettings::default_log_level")]
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}

impl GeneralSettings {
    fn default_log_level() -> String {
        "warn".to_string()
    }
}

/// Values used when formatting a subversion string
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Client name placed before the version
    #[serde(default = "ClientSettings::default_name")]
    pub name: String,
    /// Comments appended in parentheses. Peers cannot decode a subversion
    /// without at least one.
    #[serde(default = "ClientSettings::default_comments")]
    pub comments: Vec<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            comments: Self::default_comments(),
        }
    }
}

impl ClientSettings {
    fn default_name() -> String {
        CLIENT_NAME.to_string()
    }

    fn default_comments() -> Vec<String> {
        vec!["EB32.0".to_string()]
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserSettings {
    /// compatible (malformed input decodes to 0) or strict (malformed input is an error)
    #[serde(default)]
    pub mode: ParseMode,
}

impl CliConfig {
    /// Load configuration from the specified path, or from the first
    /// standard location that exists
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p
        } else {
            Self::find_existing(&Self::candidate_paths())
                .ok_or_else(|| anyhow!("No configuration file found"))?
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        tracing::info!("Loaded configuration from: {}", config_path.display());
        Ok(config)
    }

    /// Standard configuration locations, in lookup order
    pub fn candidate_paths() -> Vec<PathBuf> {
        vec![
            Self::default_path(),
            PathBuf::from("/etc/devault-subver/config.toml"),
        ]
    }

    fn find_existing(candidates: &[PathBuf]) -> Option<PathBuf> {
        candidates.iter().find(|p| p.exists()).cloned()
    }

    /// Parse and validate configuration text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: CliConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the first existing standard config, or defaults when none exists.
    ///
    /// A config file that exists but fails to parse or validate is an error.
    pub fn load_or_default() -> Result<Self> {
        Self::load_first_or_default(&Self::candidate_paths())
    }

    fn load_first_or_default(candidates: &[PathBuf]) -> Result<Self> {
        match Self::find_existing(candidates) {
            Some(path) => Self::load(Some(path)),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to the specified path
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!("Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("devault-subver").join("config.toml")
        } else {
            PathBuf::from(".config/devault-subver/config.toml")
        }
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if !common::is_valid_level(&self.general.log_level) {
            return Err(anyhow!(
                "Invalid log level '{}', must be one of: {}",
                self.general.log_level,
                common::LOG_LEVELS.join(", ")
            ));
        }

        if self.client.name.is_empty() {
            return Err(anyhow!("Client name must not be empty"));
        }

        // Configured comments must survive a format/parse round trip
        for comment in &self.client.comments {
            if !is_round_trip_safe(comment) {
                return Err(anyhow!(
                    "Invalid comment '{}', must not contain any of ':', '(', ')', '/'",
                    comment
                ));
            }
        }

        Ok(())
    }
}

/// Expand a leading `~` in a user-supplied path
pub fn expand_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).as_ref()),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.client.name, "DeVault Core");
        assert_eq!(config.client.comments, vec!["EB32.0".to_string()]);
        assert_eq!(config.parser.mode, ParseMode::Compatible);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = CliConfig::from_toml("").unwrap();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.client.comments, vec!["EB32.0".to_string()]);
        assert_eq!(config.parser.mode, ParseMode::Compatible);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = CliConfig::default();
        config.client.comments.push("mainnet".to_string());
        config.parser.mode = ParseMode::Strict;

        let toml_str = toml::to_string(&config).unwrap();
        let parsed = CliConfig::from_toml(&toml_str).unwrap();

        assert_eq!(
            parsed.client.comments,
            vec!["EB32.0".to_string(), "mainnet".to_string()]
        );
        assert_eq!(parsed.parser.mode, ParseMode::Strict);
    }

    #[test]
    fn test_validate_log_level() {
        let mut config = CliConfig::default();
        config.general.log_level = "invalid".to_string();
        assert!(config.validate().is_err());

        config.general.log_level = "debug".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_comments() {
        let mut config = CliConfig::default();
        config.client.comments = vec!["EB32.0".to_string(), "a b".to_string()];
        assert!(config.validate().is_ok());

        config.client.comments.push("bad:comment".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_name() {
        let mut config = CliConfig::default();
        config.client.name = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_parse_mode_rejected() {
        assert!(CliConfig::from_toml("[parser]\nmode = \"lenient\"\n").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = CliConfig::default();
        config.client.name = "Test Node".to_string();
        config.save(&path).unwrap();

        let loaded = CliConfig::load(Some(path)).unwrap();
        assert_eq!(loaded.client.name, "Test Node");
    }

    #[test]
    fn test_default_user_agent_is_decodable() {
        let config = CliConfig::default();
        let subver = protocol::format_sub_version(
            &config.client.name,
            protocol::CLIENT_VERSION.encoded(),
            &config.client.comments,
        );
        assert_eq!(
            protocol::unformat_sub_version(&subver),
            protocol::CLIENT_VERSION.encoded()
        );
    }

    #[test]
    fn test_missing_candidates_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = vec![dir.path().join("absent.toml")];

        let config = CliConfig::load_first_or_default(&candidates).unwrap();
        assert_eq!(config.parser.mode, ParseMode::Compatible);
    }

    #[test]
    fn test_existing_candidate_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[parser]\nmode = \"strict\"\n").unwrap();

        let candidates = vec![dir.path().join("absent.toml"), path];
        let config = CliConfig::load_first_or_default(&candidates).unwrap();
        assert_eq!(config.parser.mode, ParseMode::Strict);
    }

    #[test]
    fn test_invalid_existing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[parser]\nmode = \"strict\"\n\n[client]\ncomments = [\"net:main\"]\n",
        )
        .unwrap();

        let err = CliConfig::load_first_or_default(&[path]).unwrap_err();
        assert!(format!("{:#}", err).contains("net:main"));
    }

    #[test]
    fn test_expand_path_without_tilde() {
        let path = Path::new("/etc/devault-subver/config.toml");
        assert_eq!(expand_path(path), path.to_path_buf());
    }
}
