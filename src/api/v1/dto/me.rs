use serde::Serialize;

/// `GET /api/v1/me`: who the gate thinks the caller is.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub subject: String,
    pub roles: Vec<String>,
    pub service: &'static str,
    pub expires_at: i64,
}
