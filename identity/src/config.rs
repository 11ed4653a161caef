use std::net::SocketAddr;
use std::str::FromStr;
use std::fmt;

use service_kit::{AppEnv, HttpLimits};
use token_gate::{GateConfig, GateConfigError};

use crate::error::AppError;

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str),
    Gate(GateConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
            ConfigError::Gate(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<GateConfigError> for ConfigError {
    fn from(e: GateConfigError) -> Self {
        ConfigError::Gate(e)
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub gate: GateConfig,
    pub cors_allowed_origins: Vec<String>,
    pub http: HttpLimits,
    // Upper bound for issued tokens (seconds); requests may only ask for less
    pub access_token_ttl_seconds: u64,
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
        let port: u16 = match lookup("IDENTITY_PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("IDENTITY_PORT"))?,
            None => 4000,
        };
        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("IDENTITY_PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let gate = GateConfig::from_source(&lookup)?;
        if app_env.is_production() {
            gate.ensure_production_ready()?;
        }

        let access_token_ttl_seconds = match lookup("ACCESS_TOKEN_TTL_SECONDS") {
            Some(v) => v
                .parse::<u64>()
                .ok()
                .filter(|ttl| *ttl > 0)
                .ok_or(ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"))?,
            None => 3600,
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        // Token requests are tiny.
        let http = HttpLimits {
            body_limit_bytes: 16 * 1024,
            ..HttpLimits::default()
        };

        Ok(Config {
            addr,
            app_env,
            gate,
            cors_allowed_origins,
            http,
            access_token_ttl_seconds,
        })
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        tracing::error!(error = %e, "invalid configuration");
        AppError::Internal
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_source(move |key| map.get(key).cloned())
    }

    const GATE: [(&str, &str); 3] = [
        ("AUTH_SECRET_KEY", "identity-secret"),
        ("AUTH_ISSUER", "https://identity.scm.local"),
        ("AUTH_AUDIENCE", "scm-services"),
    ];

    #[test]
    fn defaults() {
        let config = from(&GATE).unwrap();
        assert_eq!(config.addr.port(), 4000);
        assert_eq!(config.access_token_ttl_seconds, 3600);
        assert_eq!(config.app_env, AppEnv::Development);
        assert!(config.cors_allowed_origins.is_empty());
        assert_eq!(config.http.body_limit_bytes, 16 * 1024);
    }

    #[test]
    fn parses_cors_origins() {
        let mut pairs = GATE.to_vec();
        pairs.push(("CORS_ALLOWED_ORIGINS", "https://console.example, "));
        let config = from(&pairs).unwrap();
        assert_eq!(config.cors_allowed_origins, vec!["https://console.example"]);
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let mut pairs = GATE.to_vec();
        pairs.push(("ACCESS_TOKEN_TTL_SECONDS", "0"));
        assert!(matches!(
            from(&pairs),
            Err(ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"))
        ));
    }

    #[test]
    fn production_rejects_short_secret() {
        let mut pairs = GATE.to_vec();
        pairs.push(("APP_ENV", "production"));
        assert!(matches!(from(&pairs), Err(ConfigError::Gate(_))));
    }
}
