/*
 * Responsibility
 * - suppliers テーブル向け SQLx 操作
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::{Page, error::RepoError};

#[derive(Debug, Clone, FromRow)]
pub struct SupplierRow {
    pub id: Uuid,
    pub name: String,
    pub contact_email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub async fn list(db: &PgPool, page: Page) -> Result<Vec<SupplierRow>, RepoError> {
    let rows = sqlx::query_as::<_, SupplierRow>(
        r#"
        SELECT id, name, contact_email, phone, created_at
        FROM suppliers
        ORDER BY name ASC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    name: &str,
    contact_email: &str,
    phone: Option<&str>,
) -> Result<SupplierRow, RepoError> {
    let row = sqlx::query_as::<_, SupplierRow>(
        r#"
        INSERT INTO suppliers (name, contact_email, phone)
        VALUES ($1, $2, $3)
        RETURNING id, name, contact_email, phone, created_at
        "#,
    )
    .bind(name)
    .bind(contact_email)
    .bind(phone)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn get(db: &PgPool, id: Uuid) -> Result<Option<SupplierRow>, RepoError> {
    let row = sqlx::query_as::<_, SupplierRow>(
        r#"
        SELECT id, name, contact_email, phone, created_at
        FROM suppliers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    id: Uuid,
    name: Option<&str>,
    contact_email: Option<&str>,
    phone: Option<&str>,
) -> Result<Option<SupplierRow>, RepoError> {
    let row = sqlx::query_as::<_, SupplierRow>(
        r#"
        UPDATE suppliers
        SET
            name = COALESCE($2, name),
            contact_email = COALESCE($3, contact_email),
            phone = COALESCE($4, phone)
        WHERE id = $1
        RETURNING id, name, contact_email, phone, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(contact_email)
    .bind(phone)
    .fetch_optional(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn delete(db: &PgPool, id: Uuid) -> Result<bool, RepoError> {
    let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
