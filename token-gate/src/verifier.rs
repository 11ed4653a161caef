//! Bearer token verification.
//!
//! `jsonwebtoken` handles segment decoding and the constant-time HMAC
//! comparison. Claim checks run afterwards in a fixed order (issuer, audience,
//! expiration) so the first failure decides the error kind.

use std::fmt;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde_json::Value;

use crate::claims::Claims;
use crate::config::GateConfig;
use crate::error::AuthError;

/// Symmetric algorithms a token header may declare. `none` and every
/// asymmetric algorithm are rejected.
pub const ALLOWED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// HMAC verifier bound to one `{secret, issuer, audience}` tuple.
///
/// Immutable after construction; share it behind an `Arc`.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(config: &GateConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret().as_bytes());

        // Signature and algorithm only. Claims are checked in `verify_at`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = ALLOWED_ALGORITHMS.to_vec();
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            decoding_key,
            validation,
            issuer: config.issuer().to_string(),
            audience: config.audience().to_string(),
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Verify `token` against the current wall clock.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify `token` as of `now` (unix seconds).
    ///
    /// The token is accepted only while `now < exp`; there is no leeway.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, AuthError> {
        check_structure(token)?;

        let payload = self.verify_signature(token)?;
        let claims = Claims::from_payload(payload)?;

        if claims.iss != self.issuer {
            return Err(AuthError::IssuerMismatch);
        }
        if !claims.aud.accepts(&self.audience) {
            return Err(AuthError::AudienceMismatch);
        }
        if now >= claims.exp {
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }

    fn verify_signature(&self, token: &str) -> Result<Value, AuthError> {
        jsonwebtoken::decode::<Value>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::InvalidSignature => AuthError::SignatureInvalid,
                // Declared algorithm is real but outside the allow-list.
                ErrorKind::InvalidAlgorithm => AuthError::SignatureInvalid,
                _ => AuthError::MalformedToken,
            })
    }
}

/// Exactly three non-empty base64url segments.
fn check_structure(token: &str) -> Result<(), AuthError> {
    let mut segments = 0;
    for segment in token.split('.') {
        let is_b64url = !segment.is_empty()
            && segment
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if !is_b64url {
            return Err(AuthError::MalformedToken);
        }
        segments += 1;
    }

    if segments == 3 {
        Ok(())
    } else {
        Err(AuthError::MalformedToken)
    }
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;
    use crate::issuer::TokenIssuer;
    use crate::roles;

    const SECRET: &str = "proptest-secret-proptest-secret-proptest";
    const NOW: i64 = 1_800_000_000;

    fn config(secret: &str) -> GateConfig {
        GateConfig::new(secret, "https://identity.scm.local", "scm-services").unwrap()
    }

    fn role_set() -> impl Strategy<Value = Vec<&'static str>> {
        prop::sample::subsequence(roles::ALL.to_vec(), 0..=roles::ALL.len())
    }

    proptest! {
        /// Whatever the issuer signs, the verifier returns unchanged before expiry.
        #[test]
        fn signed_claims_round_trip(
            subject in "[A-Za-z0-9_-]{1,32}",
            granted in role_set(),
            ttl in 1u64..1_000_000,
        ) {
            let issued = TokenIssuer::new(&config(SECRET), ttl)
                .issue_at(&subject, granted.iter().copied(), NOW)
                .unwrap();

            let verified = TokenVerifier::new(&config(SECRET))
                .verify_at(&issued.access_token, NOW)
                .unwrap();
            prop_assert_eq!(&verified, &issued.claims);
            prop_assert_eq!(verified.roles, granted);
        }

        /// A token is never accepted under a secret other than the one that signed it.
        #[test]
        fn other_secret_never_verifies(
            other in "[A-Za-z0-9]{8,48}",
            granted in role_set(),
        ) {
            prop_assume!(other != SECRET);

            let token = TokenIssuer::new(&config(&other), 300)
                .issue_at("user-1", granted.iter().copied(), NOW)
                .unwrap()
                .access_token;

            prop_assert_eq!(
                TokenVerifier::new(&config(SECRET)).verify_at(&token, NOW),
                Err(AuthError::SignatureInvalid)
            );
        }

        /// Expired at and after `exp`, valid strictly before it.
        #[test]
        fn expiry_boundary_is_exact(ttl in 1u64..100_000, skew in 0i64..100_000) {
            let token = TokenIssuer::new(&config(SECRET), ttl)
                .issue_at("user-1", [roles::STAFF], NOW)
                .unwrap()
                .access_token;
            let exp = NOW + ttl as i64;
            let verifier = TokenVerifier::new(&config(SECRET));

            prop_assert!(verifier.verify_at(&token, exp - 1).is_ok());
            prop_assert_eq!(verifier.verify_at(&token, exp + skew), Err(AuthError::Expired));
        }
    }
}
