/*
 * Responsibility
 * - 共有 secret で access token (JWT) を署名する (identity service / CLI / tests)
 * - claims の組み立て (iss/aud/sub/role/iat/exp/jti)
 */
use std::fmt;

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use tracing::error;
use uuid::Uuid;

use crate::claims::{Claims, SUBJECT};
use crate::config::GateConfig;
use crate::error::AuthError;
use crate::verifier::ALLOWED_ALGORITHMS;

/// A freshly signed token and the claims inside it.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub claims: Claims,
    /// Seconds until expiry.
    pub expires_in: u64,
}

#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    issuer: String,
    audience: String,
    ttl_seconds: u64,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenIssuer {
    pub fn new(config: &GateConfig, ttl_seconds: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret().as_bytes()),
            issuer: config.issuer().to_string(),
            audience: config.audience().to_string(),
            ttl_seconds,
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Same issuer with a different lifetime. Callers clamp untrusted input first.
    pub fn with_ttl(&self, ttl_seconds: u64) -> Self {
        Self {
            ttl_seconds,
            ..self.clone()
        }
    }

    /// Issue an access token for `subject` carrying `roles`, valid for the
    /// configured TTL from now.
    pub fn issue<I, R>(&self, subject: &str, roles: I) -> Result<IssuedToken, AuthError>
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        self.issue_at(subject, roles, Utc::now().timestamp())
    }

    pub fn issue_at<I, R>(
        &self,
        subject: &str,
        roles: I,
        now: i64,
    ) -> Result<IssuedToken, AuthError>
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        if subject.trim().is_empty() {
            return Err(AuthError::MissingClaim(SUBJECT));
        }

        let ttl = i64::try_from(self.ttl_seconds).unwrap_or(i64::MAX);
        let claims = Claims::new(&self.issuer, &self.audience, subject, now.saturating_add(ttl))
            .with_roles(roles)
            .with_claim("iat", now)
            .with_claim("jti", Uuid::new_v4().to_string());

        let access_token = self.sign(&claims)?;

        Ok(IssuedToken {
            access_token,
            claims,
            expires_in: self.ttl_seconds,
        })
    }

    /// Sign an arbitrary claim set with HS256.
    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        self.sign_with(Algorithm::HS256, claims)
    }

    pub fn sign_with(&self, algorithm: Algorithm, claims: &Claims) -> Result<String, AuthError> {
        if !ALLOWED_ALGORITHMS.contains(&algorithm) {
            return Err(AuthError::Signing(format!(
                "{algorithm:?} is not a symmetric algorithm"
            )));
        }

        let mut header = Header::new(algorithm);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            AuthError::Signing(e.to_string())
        })
    }
}
