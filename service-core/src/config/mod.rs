//! Settings shared by every service binary: listen port and telemetry.
use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Fallback filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP collector for span export. Unset disables export.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Reads `.env`, an optional `configuration.*` file and `APP__*` variables.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Self::from_source(config)
    }

    fn from_source(config: Cfg) -> Result<Self, AppError> {
        let mut settings: Self = config.try_deserialize()?;
        if settings
            .otlp_endpoint
            .as_deref()
            .is_some_and(|endpoint| endpoint.trim().is_empty())
        {
            settings.otlp_endpoint = None;
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_source(Cfg::builder().build().unwrap()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "info");
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn overrides_are_honoured() {
        let source = Cfg::builder()
            .set_override("port", 9000)
            .unwrap()
            .set_override("otlp_endpoint", "http://tempo:4317")
            .unwrap()
            .build()
            .unwrap();
        let config = Config::from_source(source).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://tempo:4317"));
    }

    #[test]
    fn blank_otlp_endpoint_disables_export() {
        let source = Cfg::builder()
            .set_override("otlp_endpoint", "  ")
            .unwrap()
            .build()
            .unwrap();
        let config = Config::from_source(source).unwrap();
        assert!(config.otlp_endpoint.is_none());
    }
}
