use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    10
}

fn get_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl Config {
    /// Loads `CONFIG_PATH` (default `config.toml`). Without the file the
    /// config comes from environment variables alone; either way environment
    /// variables win over file values.
    pub fn from_toml() -> AppResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let mut config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Self::from_env()?,
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "cannot read config file {config_path}: {e}"
                )));
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn parse(config_str: &str) -> AppResult<Self> {
        toml::from_str(config_str)
            .map_err(|e| AppError::ConfigError(format!("invalid config file: {e}")))
    }

    fn from_env() -> AppResult<Self> {
        let database_url = get_env("DATABASE_URL").ok_or_else(|| {
            AppError::ConfigError(
                "DATABASE_URL is not set and no config.toml was found".to_string(),
            )
        })?;

        Ok(Config {
            server: ServerConfig {
                host: get_env("SERVER_HOST").unwrap_or_else(default_host),
                port: get_env_parse("SERVER_PORT", default_port()),
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: get_env_parse("DB_MAX_CONNECTIONS", default_max_connections()),
            },
        })
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            self.database.max_connections = mc;
        }
    }
}
