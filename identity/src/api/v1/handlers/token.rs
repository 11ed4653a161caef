use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use token_gate::{AuthError, Principal, roles::SUPER_ADMIN};

use crate::api::v1::dto::{token_request::TokenRequest, token_response::TokenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/v1/token`: mint an access token for another subject.
///
/// The route guard already required AdminPolicy. On top of that only a
/// SuperAdmin may hand out the SuperAdmin role.
pub async fn issue_token(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<TokenRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    req.validate(state.issuer.ttl_seconds())
        .map_err(AppError::InvalidRequest)?;

    let grants_super_admin = req.roles.iter().any(|r| r == SUPER_ADMIN);
    if grants_super_admin && !principal.claims.has_role(SUPER_ADMIN) {
        tracing::info!(by = %principal.subject, sub = %req.sub, "refused to mint SuperAdmin token");
        return Err(AuthError::PolicyDenied {
            policy: "SuperAdminPolicy".into(),
        }
        .into());
    }

    let issued = match req.ttl_seconds {
        Some(ttl) => state.issuer.with_ttl(ttl).issue(&req.sub, &req.roles),
        None => state.issuer.issue(&req.sub, &req.roles),
    }?;

    tracing::info!(
        sub = %req.sub,
        roles = ?req.roles,
        expires_in = issued.expires_in,
        by = %principal.subject,
        "access token issued"
    );

    Ok((
        StatusCode::OK,
        Json(TokenResponse {
            access_token: issued.access_token,
            token_type: "Bearer".to_string(),
            expires_in: issued.expires_in,
        }),
    ))
}
