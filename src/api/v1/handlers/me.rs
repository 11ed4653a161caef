use axum::{Json, extract::State};
use token_gate::Principal;

use crate::{api::v1::dto::me::MeResponse, state::AppState};

/// Echoes the verified identity; any valid token may call it.
pub async fn me(State(state): State<AppState>, principal: Principal) -> Json<MeResponse> {
    Json(MeResponse {
        subject: principal.subject,
        roles: principal.roles,
        service: state.service.as_str(),
        expires_at: principal.claims.exp,
    })
}
