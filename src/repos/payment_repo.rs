/*
 * Responsibility
 * - payments テーブル向け SQLx 操作
 * - 決済そのもの (外部 PSP 連携) は扱わない。記録の CRUD のみ
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::{Page, error::RepoError};

#[derive(Debug, Clone, FromRow)]
pub struct PaymentRow {
    pub id: Uuid,
    pub order_ref: String,
    pub customer_id: Option<Uuid>,
    pub amount_cents: i64,
    pub currency: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewPayment<'a> {
    pub order_ref: &'a str,
    pub customer_id: Option<Uuid>,
    pub amount_cents: i64,
    pub currency: &'a str,
    pub status: &'a str,
}

pub async fn list(db: &PgPool, page: Page) -> Result<Vec<PaymentRow>, RepoError> {
    let rows = sqlx::query_as::<_, PaymentRow>(
        r#"
        SELECT id, order_ref, customer_id, amount_cents, currency, status, created_at
        FROM payments
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn create(db: &PgPool, new: NewPayment<'_>) -> Result<PaymentRow, RepoError> {
    let row = sqlx::query_as::<_, PaymentRow>(
        r#"
        INSERT INTO payments (order_ref, customer_id, amount_cents, currency, status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, order_ref, customer_id, amount_cents, currency, status, created_at
        "#,
    )
    .bind(new.order_ref)
    .bind(new.customer_id)
    .bind(new.amount_cents)
    .bind(new.currency)
    .bind(new.status)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn get(db: &PgPool, id: Uuid) -> Result<Option<PaymentRow>, RepoError> {
    let row = sqlx::query_as::<_, PaymentRow>(
        r#"
        SELECT id, order_ref, customer_id, amount_cents, currency, status, created_at
        FROM payments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn update_status(
    db: &PgPool,
    id: Uuid,
    status: &str,
) -> Result<Option<PaymentRow>, RepoError> {
    let row = sqlx::query_as::<_, PaymentRow>(
        r#"
        UPDATE payments
        SET status = $2
        WHERE id = $1
        RETURNING id, order_ref, customer_id, amount_cents, currency, status, created_at
        "#,
    )
    .bind(id)
    .bind(status)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, id: Uuid) -> Result<bool, RepoError> {
    let result = sqlx::query("DELETE FROM payments WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
