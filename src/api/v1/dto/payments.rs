/*
 * Responsibility
 * - Payments の request/response DTO
 * - status は固定の語彙 (pending / completed / failed / refunded)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::payment_repo::PaymentRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub order_ref: String,
    pub customer_id: Option<Uuid>,
    pub amount_cents: i64,
    pub currency: String,
    #[serde(default)]
    pub status: PaymentStatus,
}

impl CreatePaymentRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.order_ref.trim().is_empty() {
            return Err("order_ref is required");
        }
        if self.amount_cents <= 0 {
            return Err("amount_cents must be positive");
        }
        if self.currency.len() != 3 || !self.currency.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err("currency must be a 3-letter ISO code");
        }
        Ok(())
    }
}

/// Payments are immutable records apart from their status.
#[derive(Debug, Deserialize)]
pub struct UpdatePaymentRequest {
    pub status: PaymentStatus,
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub order_ref: String,
    pub customer_id: Option<Uuid>,
    pub amount_cents: i64,
    pub currency: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<PaymentRow> for PaymentResponse {
    fn from(row: PaymentRow) -> Self {
        Self {
            id: row.id,
            order_ref: row.order_ref,
            customer_id: row.customer_id,
            amount_cents: row.amount_cents,
            currency: row.currency,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(amount_cents: i64, currency: &str) -> CreatePaymentRequest {
        CreatePaymentRequest {
            order_ref: "PO-1001".into(),
            customer_id: None,
            amount_cents,
            currency: currency.into(),
            status: PaymentStatus::default(),
        }
    }

    #[test]
    fn validates_amount_and_currency() {
        assert!(req(1_000, "USD").validate().is_ok());
        assert_eq!(req(0, "USD").validate(), Err("amount_cents must be positive"));
        assert_eq!(
            req(1_000, "usd").validate(),
            Err("currency must be a 3-letter ISO code")
        );
    }

    #[test]
    fn status_uses_lowercase_names() {
        let upd: UpdatePaymentRequest =
            serde_json::from_str(r#"{"status":"refunded"}"#).unwrap();
        assert_eq!(upd.status, PaymentStatus::Refunded);
        assert_eq!(upd.status.as_str(), "refunded");
        assert!(serde_json::from_str::<UpdatePaymentRequest>(r#"{"status":"lost"}"#).is_err());
    }
}
