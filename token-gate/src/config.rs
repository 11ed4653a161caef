//! Gate configuration: the `{secret, issuer, audience}` tuple.
//!
//! Loaded once at startup and never mutated afterwards. Every service in the
//! system must be configured with the same tuple to accept tokens minted by
//! the identity service.
//!
//! There is no fallback secret. A missing `AUTH_SECRET_KEY` is a startup
//! failure, never a silently accepted default.

use std::fmt;

use thiserror::Error;

pub const SECRET_KEY_VAR: &str = "AUTH_SECRET_KEY";
pub const ISSUER_VAR: &str = "AUTH_ISSUER";
pub const AUDIENCE_VAR: &str = "AUTH_AUDIENCE";

/// Minimum secret length accepted in production (HS256 key size).
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Literal that older deployments shipped as a hardcoded fallback.
const KNOWN_DEVELOPMENT_SECRET: &str = "DefaultSecretKeyForDevelopment";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {key}: {reason}")]
    Invalid {
        key: &'static str,
        reason: &'static str,
    },
}

/// Shared symmetric signing secret.
///
/// Key material is intentionally not printable via Debug.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningSecret(<{} bytes redacted>)", self.0.len())
    }
}

#[derive(Debug, Clone)]
pub struct GateConfig {
    secret: SigningSecret,
    issuer: String,
    audience: String,
}

impl GateConfig {
    pub fn new(
        secret: impl Into<Vec<u8>>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Result<Self, GateConfigError> {
        let secret = SigningSecret(secret.into());
        let issuer = issuer.into();
        let audience = audience.into();

        if secret.is_empty() {
            return Err(GateConfigError::Missing(SECRET_KEY_VAR));
        }
        if issuer.trim().is_empty() {
            return Err(GateConfigError::Missing(ISSUER_VAR));
        }
        if audience.trim().is_empty() {
            return Err(GateConfigError::Missing(AUDIENCE_VAR));
        }

        Ok(Self {
            secret,
            issuer,
            audience,
        })
    }

    /// Read `AUTH_SECRET_KEY`, `AUTH_ISSUER` and `AUTH_AUDIENCE` from the
    /// process environment. Callers load `.env` beforehand if they want it.
    pub fn from_env() -> Result<Self, GateConfigError> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Same as [`GateConfig::from_env`] but reading from an arbitrary source.
    pub fn from_source<F>(lookup: F) -> Result<Self, GateConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(SECRET_KEY_VAR).ok_or(GateConfigError::Missing(SECRET_KEY_VAR))?;
        let issuer = lookup(ISSUER_VAR).ok_or(GateConfigError::Missing(ISSUER_VAR))?;
        let audience = lookup(AUDIENCE_VAR).ok_or(GateConfigError::Missing(AUDIENCE_VAR))?;

        Self::new(secret.into_bytes(), issuer, audience)
    }

    /// Extra checks applied when the service runs in production.
    pub fn ensure_production_ready(&self) -> Result<(), GateConfigError> {
        if self.secret.as_bytes() == KNOWN_DEVELOPMENT_SECRET.as_bytes() {
            return Err(GateConfigError::Invalid {
                key: SECRET_KEY_VAR,
                reason: "well-known development secret",
            });
        }
        if self.secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(GateConfigError::Invalid {
                key: SECRET_KEY_VAR,
                reason: "secret shorter than 32 bytes",
            });
        }
        Ok(())
    }

    pub fn secret(&self) -> &SigningSecret {
        &self.secret
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn loads_full_tuple() {
        let config = GateConfig::from_source(source(&[
            (SECRET_KEY_VAR, "s3cret"),
            (ISSUER_VAR, "https://identity.scm.local"),
            (AUDIENCE_VAR, "scm-services"),
        ]))
        .unwrap();

        assert_eq!(config.secret().as_bytes(), b"s3cret");
        assert_eq!(config.issuer(), "https://identity.scm.local");
        assert_eq!(config.audience(), "scm-services");
    }

    #[test]
    fn missing_secret_is_fatal() {
        let err = GateConfig::from_source(source(&[
            (ISSUER_VAR, "iss"),
            (AUDIENCE_VAR, "aud"),
        ]))
        .unwrap_err();

        assert_eq!(err, GateConfigError::Missing(SECRET_KEY_VAR));
    }

    #[test]
    fn empty_values_are_missing() {
        assert_eq!(
            GateConfig::new("", "iss", "aud").unwrap_err(),
            GateConfigError::Missing(SECRET_KEY_VAR)
        );
        assert_eq!(
            GateConfig::new("secret", " ", "aud").unwrap_err(),
            GateConfigError::Missing(ISSUER_VAR)
        );
        assert_eq!(
            GateConfig::new("secret", "iss", "").unwrap_err(),
            GateConfigError::Missing(AUDIENCE_VAR)
        );
    }

    #[test]
    fn production_rejects_development_secret() {
        let config = GateConfig::new(KNOWN_DEVELOPMENT_SECRET, "iss", "aud").unwrap();
        assert!(matches!(
            config.ensure_production_ready(),
            Err(GateConfigError::Invalid { key: SECRET_KEY_VAR, .. })
        ));
    }

    #[test]
    fn production_rejects_short_secret() {
        let config = GateConfig::new("short", "iss", "aud").unwrap();
        assert!(config.ensure_production_ready().is_err());

        let config = GateConfig::new([7u8; 32].to_vec(), "iss", "aud").unwrap();
        assert!(config.ensure_production_ready().is_ok());
    }

    #[test]
    fn debug_does_not_print_secret() {
        let config = GateConfig::new("super-secret-value", "iss", "aud").unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret-value"));
        assert!(printed.contains("redacted"));
    }
}
