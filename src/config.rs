use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use dotenvy::dotenv;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    /// Signing secret of the HR portal's access tokens. Rotating it logs every
    /// client out, so it must be stable across restarts.
    pub jwt_secret: String,
    pub api_prefix: String,

    // Rate limiting
    pub rate_protected_per_min: u32,

    // Terminal
    pub punch_log_path: PathBuf,
    pub punch_cache_ttl: Duration,

    pub min_report_year: i32,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| lookup(key).ok_or_else(|| anyhow!("{key} must be set"));

        fn parsed<T: std::str::FromStr>(value: Option<String>, key: &str, default: T) -> Result<T>
        where
            T::Err: std::error::Error + Send + Sync + 'static,
        {
            match value {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{key} has an invalid value {raw:?}")),
                None => Ok(default),
            }
        }

        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.trim().is_empty() {
            return Err(anyhow!("JWT_SECRET must not be empty"));
        }

        let cache_ttl_secs: u64 = parsed(lookup("PUNCH_CACHE_TTL_SECS"), "PUNCH_CACHE_TTL_SECS", 60)?;

        Ok(Self {
            server_addr: required("SERVER_ADDR")?,
            jwt_secret,
            api_prefix: lookup("API_PREFIX").unwrap_or_else(|| "/api".to_string()),
            rate_protected_per_min: parsed(
                lookup("RATE_PROTECTED_PER_MIN"),
                "RATE_PROTECTED_PER_MIN",
                1000,
            )?,
            punch_log_path: PathBuf::from(required("PUNCH_LOG_PATH")?),
            punch_cache_ttl: Duration::from_secs(cache_ttl_secs),
            min_report_year: parsed(lookup("MIN_REPORT_YEAR"), "MIN_REPORT_YEAR", 2023)?,
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
        })
    }
}
