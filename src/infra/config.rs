use std::{net::SocketAddr, ops::RangeInclusive, path::PathBuf, time::Duration};

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;

use crate::{adapters::persistence::PHONE_NUMBER_COLUMN_WIDTH, infra::error::InfraError};

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub pool: PoolSettings,
    /// Run embedded migrations before serving.
    pub run_migrations: bool,
    /// Shared key expected in the `X-API-Key` header.
    pub api_key: SecretString,
    pub admin_username: SecretString,
    pub admin_password: SecretString,
    /// Origins that receive CORS headers. Empty means no cross-origin access.
    pub allowed_origins: Vec<HeaderValue>,
    /// Whether to trust X-Forwarded-For headers. Set to true when behind a reverse proxy (Caddy, nginx).
    /// SECURITY: Only enable this when the API is not directly exposed to the internet.
    pub trust_proxy: bool,
    /// Shown to registrants in the confirmation message.
    pub launch_date: String,
    pub phone_digits: RangeInclusive<usize>,
    /// Optional JSON log file next to the console output.
    pub log_file: Option<PathBuf>,
}

/// Connection pool sizing. `size` connections are kept open and up to
/// `max_overflow` more are opened under load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub size: u32,
    pub max_overflow: u32,
    pub acquire_timeout: Duration,
    pub recycle: Duration,
    pub pre_ping: bool,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            size: 10,
            max_overflow: 20,
            acquire_timeout: Duration::from_secs(30),
            recycle: Duration::from_secs(1800),
            pre_ping: true,
        }
    }
}

impl PoolSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            size: get_env_default("DB_POOL_SIZE", defaults.size),
            max_overflow: get_env_default("DB_POOL_MAX_OVERFLOW", defaults.max_overflow),
            acquire_timeout: Duration::from_secs(get_env_default(
                "DB_POOL_TIMEOUT_SECS",
                defaults.acquire_timeout.as_secs(),
            )),
            recycle: Duration::from_secs(get_env_default(
                "DB_POOL_RECYCLE_SECS",
                defaults.recycle.as_secs(),
            )),
            pre_ping: get_env_default("DB_POOL_PRE_PING", defaults.pre_ping),
        }
    }

    pub fn max_connections(&self) -> u32 {
        self.size + self.max_overflow
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InfraError> {
        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8000)));
        let database_url: String = get_env("DATABASE_URL");
        let run_migrations: bool = get_env_default("RUN_MIGRATIONS", true);

        let api_key = SecretString::new(get_env::<String>("API_KEY").into());
        let admin_username = SecretString::new(get_env::<String>("ADMIN_USERNAME").into());
        let admin_password = SecretString::new(get_env::<String>("ADMIN_PASSWORD").into());

        let allowed_origins = parse_origins(&get_env_default(
            "ALLOWED_ORIGINS",
            String::from("http://localhost:3000"),
        ))?;
        // Default to false for security - must explicitly enable when behind a trusted proxy
        let trust_proxy: bool = get_env_default("TRUST_PROXY", false);
        let launch_date: String = get_env_default("LAUNCH_DATE", "2025-02-05".to_string());

        let phone_digits = phone_digits(
            get_env_default("PHONE_MIN_DIGITS", 7),
            get_env_default("PHONE_MAX_DIGITS", PHONE_NUMBER_COLUMN_WIDTH),
        )?;

        let log_file = std::env::var("LOG_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            database_url,
            pool: PoolSettings::from_env(),
            run_migrations,
            api_key,
            admin_username,
            admin_password,
            allowed_origins,
            trust_proxy,
            launch_date,
            phone_digits,
            log_file,
        })
    }
}

/// Phone length bounds. The maximum cannot exceed what the column stores.
pub fn phone_digits(min: usize, max: usize) -> Result<RangeInclusive<usize>, InfraError> {
    if max > PHONE_NUMBER_COLUMN_WIDTH {
        return Err(InfraError::ConfigInvalid {
            var: "PHONE_MAX_DIGITS",
            reason: format!("must be at most {PHONE_NUMBER_COLUMN_WIDTH} (phone_number column width)"),
        });
    }
    if min == 0 || min > max {
        return Err(InfraError::ConfigInvalid {
            var: "PHONE_MIN_DIGITS",
            reason: format!("must be between 1 and PHONE_MAX_DIGITS ({max})"),
        });
    }
    Ok(min..=max)
}

/// Parses a comma separated origin list, skipping blank entries.
pub fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, InfraError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| InfraError::ConfigInvalid {
                var: "ALLOWED_ORIGINS",
                reason: format!("contains an invalid origin: {origin:?}"),
            })
        })
        .collect()
}
