use crate::{
    constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BASE_URL, DEFAULT_HISTORY_LIMIT},
    errors::{ChatError, ChatResult},
};
use serde::{Deserialize, Serialize};
use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
};

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the message text is appended to, e.g. `http://host:8060/answer/`.
    pub base_url: String,
    /// `None` leaves requests without a deadline.
    pub request_timeout_secs: Option<u64>,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub input_history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            log_level: "info".to_string(),
            log_dir: None,
            input_history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Where [`Config::load`] found its settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigOrigin::File(path) => write!(f, "{}", path.display()),
            ConfigOrigin::Defaults => write!(f, "built-in defaults"),
        }
    }
}

impl Config {
    /// Reads the user config if one exists, then applies `.env` and
    /// environment overrides. Nothing is written to disk.
    pub fn load() -> ChatResult<(Self, ConfigOrigin)> {
        let config_path = get_config_path()?;
        dotenv::dotenv().ok();
        Self::load_with(&config_path, |key| env::var(key).ok())
    }

    /// Reads `path` if present, falling back to defaults, applies overrides
    /// from `lookup` and validates the result.
    pub fn load_with<F>(path: &Path, lookup: F) -> ChatResult<(Self, ConfigOrigin)>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (mut config, origin) = if path.exists() {
            (Self::read_from(path)?, ConfigOrigin::File(path.to_path_buf()))
        } else {
            (Config::default(), ConfigOrigin::Defaults)
        };

        config.apply_overrides(lookup)?;
        config.normalize();
        validate_config(&config)?;

        Ok((config, origin))
    }

    pub fn load_from(path: &Path) -> ChatResult<Self> {
        let config = Self::read_from(path)?;
        validate_config(&config)?;
        Ok(config)
    }

    fn read_from(path: &Path) -> ChatResult<Self> {
        let config_str = fs::read_to_string(path)
            .map_err(|e| ChatError::config_error(format!("Failed to read config file: {}", e)))?;

        let mut config: Config = serde_json::from_str(&config_str)
            .map_err(|e| ChatError::config_error(format!("Failed to parse config: {}", e)))?;

        config.normalize();
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> ChatResult<()> {
        validate_config(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ChatError::config_error(format!("Failed to create config directory: {}", e))
            })?;
        }

        let config_str = serde_json::to_string_pretty(self)
            .map_err(|e| ChatError::config_error(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, config_str)
            .map_err(|e| ChatError::config_error(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Overrides fields from `DUKECHAT_*` variables as resolved by `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ChatResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DUKECHAT_BASE_URL") {
            self.base_url = url;
        }

        if let Some(raw) = lookup("DUKECHAT_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                ChatError::config_error(format!("DUKECHAT_TIMEOUT_SECS is not a number: {}", raw))
            })?;
            self.request_timeout_secs = Some(secs);
        }

        if let Some(level) = lookup("DUKECHAT_LOG_LEVEL") {
            self.log_level = level.to_lowercase();
        }

        Ok(())
    }

    /// The message is appended as a path segment, so the base must end in `/`.
    fn normalize(&mut self) {
        self.base_url = self.base_url.trim().to_string();
        if !self.base_url.is_empty() && !self.base_url.ends_with('/') {
            self.base_url.push('/');
        }
    }
}

fn get_config_path() -> ChatResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ChatError::config_error("Could not determine home directory"))?;

    Ok(home_dir
        .join(".config")
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME))
}

pub fn validate_config(config: &Config) -> ChatResult<()> {
    if config.base_url.is_empty() {
        return Err(ChatError::config_error("base_url is required"));
    }

    let url = reqwest::Url::parse(&config.base_url)
        .map_err(|e| ChatError::config_error(format!("base_url is not a valid URL: {}", e)))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ChatError::config_error("base_url must use http or https"));
    }

    if config.request_timeout_secs == Some(0) {
        return Err(ChatError::config_error(
            "request_timeout_secs must be greater than 0",
        ));
    }

    if !LOG_LEVELS.contains(&config.log_level.as_str()) {
        return Err(ChatError::config_error(format!(
            "log_level must be one of {:?}",
            LOG_LEVELS
        )));
    }

    if config.input_history_limit == 0 {
        return Err(ChatError::config_error(
            "input_history_limit must be greater than 0",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_validate_config_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_invalid_empty_base_url() {
        let mut config = Config::default();
        config.base_url = "".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_invalid_scheme() {
        let mut config = Config::default();
        config.base_url = "ftp://example.com/answer/".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_zero_timeout() {
        let mut config = Config::default();
        config.request_timeout_secs = Some(0);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_unknown_log_level() {
        let mut config = Config::default();
        config.log_level = "verbose".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.base_url = "http://10.0.0.5:8060/chat_v2/".to_string();
        config.request_timeout_secs = Some(30);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_adds_trailing_slash_and_defaults_missing_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "base_url": "http://bot.local:8060/answer" }"#).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.base_url, "http://bot.local:8060/answer/");
        assert_eq!(loaded.log_level, "info");
        assert_eq!(loaded.request_timeout_secs, None);
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ChatError::Config(_)));
    }

    #[test]
    fn test_load_without_file_uses_defaults_and_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dukechat").join("config.json");

        let (config, origin) = Config::load_with(&path, |_| None).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(origin, ConfigOrigin::Defaults);
        assert!(!path.exists());
        assert!(!path.parent().unwrap().exists());
    }

    #[test]
    fn test_load_reports_file_origin() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "log_level": "debug" }"#).unwrap();

        let (config, origin) = Config::load_with(&path, |_| None).unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(origin, ConfigOrigin::File(path.clone()));
        assert_eq!(origin.to_string(), path.display().to_string());
    }

    #[test]
    fn test_env_override_repairs_bad_file_url() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "base_url": "not a url" }"#).unwrap();

        assert!(Config::load_with(&path, |_| None).is_err());

        let (config, _) = Config::load_with(&path, |key| {
            (key == "DUKECHAT_BASE_URL").then(|| "http://bot.local:8060/answer".to_string())
        })
        .unwrap();
        assert_eq!(config.base_url, "http://bot.local:8060/answer/");
    }

    #[test]
    fn test_apply_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("DUKECHAT_BASE_URL", "http://override:9000/answer/"),
            ("DUKECHAT_TIMEOUT_SECS", "15"),
            ("DUKECHAT_LOG_LEVEL", "DEBUG"),
        ]);

        let mut config = Config::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.base_url, "http://override:9000/answer/");
        assert_eq!(config.request_timeout_secs, Some(15));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_apply_overrides_rejects_bad_timeout() {
        let mut config = Config::default();
        let result = config.apply_overrides(|key| {
            (key == "DUKECHAT_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert!(result.is_err());
    }
}
