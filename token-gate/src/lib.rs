//! Token gate shared by every supply-chain service.
//!
//! - [`config`]: the `{secret, issuer, audience}` tuple loaded at startup
//! - [`verifier`]: bearer token verification (HMAC only, zero leeway)
//! - [`policy`]: flat role policies evaluated by set intersection
//! - [`issuer`]: signing side used by the identity service and tooling
//! - [`axum_ext`]: middleware and extractors for axum routers

pub mod axum_ext;
pub mod claims;
pub mod config;
pub mod error;
pub mod issuer;
pub mod policy;
pub mod roles;
pub mod verifier;

pub use axum_ext::{PolicyGuard, Principal, bearer_token, guarded, require};
pub use claims::{Audience, Claims};
pub use config::{GateConfig, GateConfigError, SigningSecret};
pub use error::AuthError;
pub use issuer::{IssuedToken, TokenIssuer};
pub use jsonwebtoken::Algorithm;
pub use policy::{Policy, authorize};
pub use verifier::{ALLOWED_ALGORITHMS, TokenVerifier};
