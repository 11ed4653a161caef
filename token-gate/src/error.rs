/*
 * Responsibility
 * - Gate の失敗理由 (AuthError) の定義
 * - HTTP status への対応付け (401 / 403) と JSON error body
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Why a request was not let through the gate.
///
/// Every variant is deterministic for a given token and configuration, so
/// none of them is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `Authorization: Bearer ...` header on the request.
    #[error("missing bearer credentials")]
    MissingCredentials,

    #[error("malformed token")]
    MalformedToken,

    #[error("invalid token signature")]
    SignatureInvalid,

    #[error("token issuer mismatch")]
    IssuerMismatch,

    #[error("token audience mismatch")]
    AudienceMismatch,

    #[error("token expired")]
    Expired,

    /// A required claim is absent or not well-formed.
    #[error("missing or invalid '{0}' claim")]
    MissingClaim(&'static str),

    #[error("access denied by {policy}")]
    PolicyDenied { policy: String },

    /// Issuer side only: the claim set could not be signed.
    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::PolicyDenied { .. } => StatusCode::FORBIDDEN,
            AuthError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "MISSING_CREDENTIALS",
            AuthError::MalformedToken => "MALFORMED_TOKEN",
            AuthError::SignatureInvalid => "SIGNATURE_INVALID",
            AuthError::IssuerMismatch => "ISSUER_MISMATCH",
            AuthError::AudienceMismatch => "AUDIENCE_MISMATCH",
            AuthError::Expired => "TOKEN_EXPIRED",
            AuthError::MissingClaim(_) => "MISSING_CLAIM",
            AuthError::PolicyDenied { .. } => "FORBIDDEN",
            AuthError::Signing(_) => "INTERNAL",
        }
    }

    /// True for every failure that happens before roles are looked at.
    pub fn is_unauthenticated(&self) -> bool {
        self.status_code() == StatusCode::UNAUTHORIZED
    }
}

#[derive(Serialize)]
struct ErrorResponseBody {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            // Do not leak signing internals to callers.
            AuthError::Signing(_) => "internal server error".to_string(),
            other => other.to_string(),
        };

        let body = ErrorResponseBody {
            error: ErrorBody {
                code: self.code(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}
