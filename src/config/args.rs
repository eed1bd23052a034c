//! Command-line argument parsing

use clap::Parser;

use super::structs::{DEFAULT_CONFIG_PATH, LogFormat, StaticConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "snaplink", version, about = "Minimal in-memory URL shortener")]
pub struct CliArgs {
    /// Show logs in development format instead of JSON format
    #[arg(long)]
    pub dev_log: bool,

    /// Path to an optional TOML configuration file
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

impl CliArgs {
    /// Apply flags that override loaded configuration values.
    pub fn apply_overrides(&self, config: &mut StaticConfig) {
        if self.dev_log {
            config.logging.format = LogFormat::Text;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::try_parse_from(["snaplink"]).unwrap();
        assert!(!args.dev_log);
        assert!(!args.print_config);
        assert_eq!(args.config, "config.toml");
    }

    #[test]
    fn test_dev_log_forces_text_format() {
        let args = CliArgs::try_parse_from(["snaplink", "--dev-log"]).unwrap();
        let mut config = StaticConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_without_dev_log_format_is_kept() {
        let args = CliArgs::try_parse_from(["snaplink"]).unwrap();
        let mut config = StaticConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_config_path_flags() {
        let args = CliArgs::try_parse_from(["snaplink", "-c", "custom.toml"]).unwrap();
        assert_eq!(args.config, "custom.toml");

        let args = CliArgs::try_parse_from(["snaplink", "--config=other.toml"]).unwrap();
        assert_eq!(args.config, "other.toml");
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(CliArgs::try_parse_from(["snaplink", "--port", "1"]).is_err());
    }
}
