use serde::{Deserialize, Serialize};

use crate::errors::{Result, SnaplinkError};
use crate::storage::memory::DEFAULT_MAX_ID_ATTEMPTS;
use crate::utils::DEFAULT_ID_LENGTH;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 环境变量前缀，分隔符为 `__`，例如 `SNAPLINK__SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "SNAPLINK";

/// Longest id the generator accepts; keeps `id_space` meaningful.
pub const MAX_ID_LENGTH: usize = 32;

/// 静态配置（启动时加载）
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ids: IdConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > TOML 文件 > 默认值。A missing file is not an error.
    pub fn load(path: &str) -> Result<Self> {
        use config::{Config, Environment, File};

        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: StaticConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ids.length == 0 || self.ids.length > MAX_ID_LENGTH {
            return Err(SnaplinkError::config(format!(
                "ids.length must be between 1 and {}, got {}",
                MAX_ID_LENGTH, self.ids.length
            )));
        }
        if self.ids.max_attempts == 0 {
            return Err(SnaplinkError::config("ids.max_attempts must be at least 1"));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SnaplinkError::config(format!("failed to render config: {}", e)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// 0 uses actix-web's default (one worker per physical core)
    #[serde(default)]
    pub workers: usize,
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `snaplink=debug,actix_web=info`
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    /// Append logs to this file instead of stdout
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdConfig {
    #[serde(default = "default_id_length")]
    pub length: usize,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            length: default_id_length(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_shutdown_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_id_length() -> usize {
    DEFAULT_ID_LENGTH
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ID_ATTEMPTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StaticConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.shutdown_timeout_secs, 10);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.ids.length, 4);
        assert_eq!(config.ids.max_attempts, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_length() {
        let mut config = StaticConfig::default();
        config.ids.length = 0;
        assert!(matches!(config.validate(), Err(SnaplinkError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let mut config = StaticConfig::default();
        config.ids.max_attempts = 0;
        assert!(matches!(config.validate(), Err(SnaplinkError::Config(_))));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: StaticConfig = toml::from_str(
            r#"
            [server]
            port = 8080

            [logging]
            format = "text"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.ids, IdConfig::default());
    }

    #[test]
    fn test_toml_output_reloads() {
        let rendered = StaticConfig::default().to_toml().unwrap();
        assert!(rendered.contains("[server]"));
        let parsed: StaticConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, StaticConfig::default());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = StaticConfig::load("does-not-exist-snaplink.toml").unwrap();
        assert_eq!(config.ids, IdConfig::default());
    }
}
