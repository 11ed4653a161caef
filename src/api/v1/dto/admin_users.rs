/*
 * Responsibility
 * - Admin users の request/response DTO
 * - role は token_gate::roles の語彙に限定 (policy に載らない名前は登録させない)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use token_gate::roles;
use uuid::Uuid;

use super::looks_like_email;
use crate::repos::admin_user_repo::AdminUserRow;

fn is_known_role(role: &str) -> bool {
    roles::ALL.contains(&role)
}

#[derive(Debug, Deserialize)]
pub struct CreateAdminUserRequest {
    pub email: String,
    pub display_name: String,
    pub role: String,
}

impl CreateAdminUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !looks_like_email(&self.email) {
            return Err("email is invalid");
        }
        if self.display_name.trim().is_empty() {
            return Err("display_name is required");
        }
        if !is_known_role(&self.role) {
            return Err("role is unknown");
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAdminUserRequest {
    pub display_name: Option<String>,
    pub role: Option<String>,
}

impl UpdateAdminUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(name) = &self.display_name
            && name.trim().is_empty()
        {
            return Err("display_name cannot be empty");
        }
        if let Some(role) = &self.role
            && !is_known_role(role)
        {
            return Err("role is unknown");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct AdminUserResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<AdminUserRow> for AdminUserResponse {
    fn from(row: AdminUserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            display_name: row.display_name,
            role: row.role,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_must_be_known_and_case_exact() {
        let mut req = CreateAdminUserRequest {
            email: "ops@example.com".into(),
            display_name: "Ops".into(),
            role: "Manager".into(),
        };
        assert!(req.validate().is_ok());

        req.role = "manager".into();
        assert_eq!(req.validate(), Err("role is unknown"));
    }
}
