use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

const DEFAULT_DATABASE: &str = "songs";
const DEFAULT_DATA_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/songs.json");

#[derive(Debug, Clone)]
pub struct SongsConfig {
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// Host name, optionally already carrying `:port`.
    pub host: String,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<Secret<String>>,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// JSON array of songs loaded into the collection at startup.
    pub data_path: PathBuf,
}

impl SongsConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        Ok(SongsConfig {
            common: common_config,
            mongodb: MongoConfig::from_lookup(|key| env::var(key).ok())?,
            seed: SeedConfig {
                data_path: env::var("SONGS_DATA_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH)),
            },
        })
    }
}

impl MongoConfig {
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let host = get("MONGODB_SERVICE").ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!(
                "Missing MongoDB server in the MONGODB_SERVICE variable"
            ))
        })?;

        let port = get("MONGODB_PORT")
            .map(|raw| {
                raw.parse::<u16>().map_err(|e| {
                    AppError::ConfigError(anyhow::anyhow!("Invalid MONGODB_PORT '{}': {}", raw, e))
                })
            })
            .transpose()?;

        Ok(MongoConfig {
            host,
            port,
            username: get("MONGODB_USERNAME"),
            password: get("MONGODB_PASSWORD").map(Secret::new),
            database: get("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
        })
    }

    /// Connection address without credentials, safe to log.
    pub fn uri(&self) -> String {
        match self.port {
            Some(port) => format!("mongodb://{}:{}", self.host, port),
            None => format!("mongodb://{}", self.host),
        }
    }

    /// Credentials are only used when both halves are configured.
    pub fn credentials(&self) -> Option<(&str, &Secret<String>)> {
        match (&self.username, &self.password) {
            (Some(user), Some(password)) => Some((user.as_str(), password)),
            _ => None,
        }
    }
}
