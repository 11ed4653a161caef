/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - db: PgPool, verifier: TokenVerifier, どの service として動いているか
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use token_gate::TokenVerifier;

use crate::policies::ServiceKind;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub verifier: Arc<TokenVerifier>,
    pub service: ServiceKind,
}

impl AppState {
    pub fn new(db: sqlx::PgPool, verifier: Arc<TokenVerifier>, service: ServiceKind) -> Self {
        Self {
            db,
            verifier,
            service,
        }
    }
}
