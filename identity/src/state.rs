use std::sync::Arc;

use token_gate::{TokenIssuer, TokenVerifier};

#[derive(Clone, Debug)]
pub struct AppState {
    pub issuer: Arc<TokenIssuer>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(issuer: Arc<TokenIssuer>, verifier: Arc<TokenVerifier>) -> Self {
        Self { issuer, verifier }
    }
}
