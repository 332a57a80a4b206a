use std::env;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use strum_macros::EnumString;

/// Where records live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Storage {
    Mysql,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub storage: Storage,
    pub database_url: Option<String>,
    pub api_prefix: String,

    pub log_dir: String,
    pub log_level: tracing::Level,

    // Rate limiting
    pub rate_per_min: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let storage = parse_or("STORAGE", Storage::Mysql)?;
        let database_url = env::var("DATABASE_URL").ok();
        if storage == Storage::Mysql && database_url.is_none() {
            bail!("DATABASE_URL must be set when STORAGE=mysql");
        }

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string()),
            storage,
            database_url,
            api_prefix: env::var("API_PREFIX").unwrap_or_default(),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            log_level: parse_or("LOG_LEVEL", tracing::Level::DEBUG)?,
            rate_per_min: parse_or("RATE_PER_MIN", 600)?,
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            server_addr: "127.0.0.1:0".to_string(),
            storage: Storage::Memory,
            database_url: None,
            api_prefix: String::new(),
            log_dir: "logs".to_string(),
            log_level: tracing::Level::DEBUG,
            rate_per_min: 10_000,
        }
    }
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_names() {
        assert_eq!("memory".parse::<Storage>().ok(), Some(Storage::Memory));
        assert_eq!("mysql".parse::<Storage>().ok(), Some(Storage::Mysql));
        assert!("postgres".parse::<Storage>().is_err());
    }
}
