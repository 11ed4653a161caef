/*
 * Responsibility
 * - Customers の request/response DTO
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::looks_like_email;
use crate::repos::customer_repo::CustomerRow;

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl CreateCustomerRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if !looks_like_email(&self.email) {
            return Err("email is invalid");
        }
        if let Some(phone) = &self.phone
            && phone.len() > 32
        {
            return Err("phone must be <= 32 chars");
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl UpdateCustomerRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err("name cannot be empty");
        }
        if let Some(email) = &self.email
            && !looks_like_email(email)
        {
            return Err("email is invalid");
        }
        if let Some(phone) = &self.phone
            && phone.len() > 32
        {
            return Err("phone must be <= 32 chars");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<CustomerRow> for CustomerResponse {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            created_at: row.created_at,
        }
    }
}
