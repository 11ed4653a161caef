/*
 * Responsibility
 * - Products (inventory) の request/response DTO
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::product_repo::ProductRow;

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub supplier_id: Option<Uuid>,
}

impl CreateProductRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        let sku = self.sku.trim();
        if sku.is_empty() || sku.len() > 64 {
            return Err("sku must be 1..=64 chars");
        }
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if self.quantity < 0 {
            return Err("quantity cannot be negative");
        }
        if self.unit_price_cents < 0 {
            return Err("unit_price_cents cannot be negative");
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub unit_price_cents: Option<i64>,
    pub supplier_id: Option<Uuid>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err("name cannot be empty");
        }
        if matches!(self.quantity, Some(q) if q < 0) {
            return Err("quantity cannot be negative");
        }
        if matches!(self.unit_price_cents, Some(p) if p < 0) {
            return Err("unit_price_cents cannot be negative");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub supplier_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<ProductRow> for ProductResponse {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            sku: row.sku,
            name: row.name,
            description: row.description,
            quantity: row.quantity,
            unit_price_cents: row.unit_price_cents,
            supplier_id: row.supplier_id,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_stock_and_price() {
        let req: CreateProductRequest = serde_json::from_value(serde_json::json!({
            "sku": "SKU-1", "name": "Pallet", "quantity": -1, "unit_price_cents": 100
        }))
        .unwrap();
        assert_eq!(req.validate(), Err("quantity cannot be negative"));

        let upd = UpdateProductRequest {
            unit_price_cents: Some(-5),
            ..Default::default()
        };
        assert_eq!(upd.validate(), Err("unit_price_cents cannot be negative"));
    }

    #[test]
    fn quantity_defaults_to_zero() {
        let req: CreateProductRequest = serde_json::from_value(serde_json::json!({
            "sku": "SKU-2", "name": "Crate", "unit_price_cents": 2500
        }))
        .unwrap();
        assert_eq!(req.quantity, 0);
        assert!(req.validate().is_ok());
    }
}
