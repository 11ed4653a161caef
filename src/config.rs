/*
 * Responsibility
 * - 環境変数や設定の読み込み (SCM_SERVICE, DATABASE_URL, CORS 許可、Gate 設定など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use service_kit::{AppEnv, HttpLimits};
use token_gate::{GateConfig, GateConfigError};

use crate::policies::ServiceKind;

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
    Gate(GateConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
            ConfigError::Gate(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Gate(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GateConfigError> for ConfigError {
    fn from(e: GateConfigError) -> Self {
        ConfigError::Gate(e)
    }
}

pub struct Config {
    pub addr: SocketAddr,
    pub service: ServiceKind,
    pub app_env: AppEnv,

    pub database_url: String,
    pub db_max_connections: u32,

    pub cors_allowed_origins: Vec<String>,
    pub http: HttpLimits,

    pub gate: GateConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| std::env::var(key).ok())
    }

    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };
        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let service = lookup("SCM_SERVICE")
            .ok_or(ConfigError::Missing("SCM_SERVICE"))?
            .parse::<ServiceKind>()
            .map_err(|_| ConfigError::Invalid("SCM_SERVICE"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let db_max_connections = lookup("DB_MAX_CONNECTIONS")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let mut http = HttpLimits::default();
        if let Some(secs) = lookup("REQUEST_TIMEOUT_SECONDS").and_then(|v| v.parse::<u64>().ok()) {
            http.request_timeout = Duration::from_secs(secs);
        }
        if let Some(bytes) = lookup("BODY_LIMIT_BYTES").and_then(|v| v.parse::<usize>().ok()) {
            http.body_limit_bytes = bytes;
        }

        let gate = GateConfig::from_source(&lookup)?;
        if app_env.is_production() {
            gate.ensure_production_ready()?;
        }

        Ok(Self {
            addr,
            service,
            app_env,
            database_url,
            db_max_connections,
            cors_allowed_origins,
            http,
            gate,
        })
    }
}
