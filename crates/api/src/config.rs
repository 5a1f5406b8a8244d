use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::http::HeaderValue;
use marketing_core::config::{parse_or, required, ConfigError};
use marketing_db::PoolConfig;

/// Which browser origins may call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<HeaderValue>),
}

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins; any origin unless `CORS_ORIGINS` lists some.
    pub cors_origins: CorsOrigins,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Connection pool sizing.
    pub pool: PoolConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var        | Default             |
    /// |----------------|---------------------|
    /// | `HOST`         | `0.0.0.0`           |
    /// | `PORT`         | `5000`              |
    /// | `CORS_ORIGINS` | `*` (any origin)    |
    /// | `DATABASE_URL` | required            |
    ///
    /// Pool settings are documented on [`PoolConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse_or(lookup, "HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;
        let port = parse_or(lookup, "PORT", 5000u16)?;
        let cors_origins = parse_cors_origins(lookup("CORS_ORIGINS"))?;
        let database_url = required(lookup, "DATABASE_URL")?;
        let pool = PoolConfig::from_lookup(lookup)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            database_url,
            pool,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Comma-separated origins; unset, empty or `*` allows any origin.
fn parse_cors_origins(raw: Option<String>) -> Result<CorsOrigins, ConfigError> {
    let Some(raw) = raw else {
        return Ok(CorsOrigins::Any);
    };

    let entries: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if entries.is_empty() || entries.contains(&"*") {
        return Ok(CorsOrigins::Any);
    }

    entries
        .into_iter()
        .map(|origin| {
            origin.parse().map_err(|e: axum::http::header::InvalidHeaderValue| {
                ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    value: origin.to_string(),
                    reason: e.to_string(),
                }
            })
        })
        .collect::<Result<Vec<HeaderValue>, _>>()
        .map(CorsOrigins::List)
}
