use axum::{Router, routing::post};
use token_gate::{
    Policy, PolicyGuard, require,
    roles::{ADMIN, SUPER_ADMIN},
};

use crate::api::v1::handlers::token::issue_token;
use crate::state::AppState;

pub fn admin_policy() -> Policy {
    Policy::new("AdminPolicy", [ADMIN, SUPER_ADMIN])
}

pub fn routes(state: &AppState) -> Router<AppState> {
    let guard = PolicyGuard::new(state.verifier.clone(), admin_policy());

    require(Router::new().route("/token", post(issue_token)), guard)
}
