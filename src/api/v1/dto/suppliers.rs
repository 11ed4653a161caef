/*
 * Responsibility
 * - Suppliers の request/response DTO
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::looks_like_email;
use crate::repos::supplier_repo::SupplierRow;

#[derive(Debug, Deserialize)]
pub struct CreateSupplierRequest {
    pub name: String,
    pub contact_email: String,
    pub phone: Option<String>,
}

impl CreateSupplierRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if !looks_like_email(&self.contact_email) {
            return Err("contact_email is invalid");
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSupplierRequest {
    pub name: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
}

impl UpdateSupplierRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err("name cannot be empty");
        }
        if let Some(email) = &self.contact_email
            && !looks_like_email(email)
        {
            return Err("contact_email is invalid");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct SupplierResponse {
    pub id: Uuid,
    pub name: String,
    pub contact_email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<SupplierRow> for SupplierResponse {
    fn from(row: SupplierRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            contact_email: row.contact_email,
            phone: row.phone,
            created_at: row.created_at,
        }
    }
}
