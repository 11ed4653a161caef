/*
 * Responsibility
 * - products テーブル向け SQLx 操作 (inventory service)
 * - sku は UNIQUE
 * - 在庫の増減ロジック (入出庫の記帳) はここでは扱わない。quantity は値として上書きするだけ
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::{Page, error::RepoError};

#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub supplier_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

pub struct NewProduct<'a> {
    pub sku: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub supplier_id: Option<Uuid>,
}

#[derive(Default)]
pub struct ProductChanges<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub quantity: Option<i32>,
    pub unit_price_cents: Option<i64>,
    pub supplier_id: Option<Uuid>,
}

pub async fn list(db: &PgPool, page: Page) -> Result<Vec<ProductRow>, RepoError> {
    let rows = sqlx::query_as::<_, ProductRow>(
        r#"
        SELECT id, sku, name, description, quantity, unit_price_cents, supplier_id, created_at
        FROM products
        ORDER BY sku ASC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn create(db: &PgPool, new: NewProduct<'_>) -> Result<ProductRow, RepoError> {
    let row = sqlx::query_as::<_, ProductRow>(
        r#"
        INSERT INTO products (sku, name, description, quantity, unit_price_cents, supplier_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, sku, name, description, quantity, unit_price_cents, supplier_id, created_at
        "#,
    )
    .bind(new.sku)
    .bind(new.name)
    .bind(new.description)
    .bind(new.quantity)
    .bind(new.unit_price_cents)
    .bind(new.supplier_id)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn get(db: &PgPool, id: Uuid) -> Result<Option<ProductRow>, RepoError> {
    let row = sqlx::query_as::<_, ProductRow>(
        r#"
        SELECT id, sku, name, description, quantity, unit_price_cents, supplier_id, created_at
        FROM products
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
    changes: ProductChanges<'_>,
) -> Result<Option<ProductRow>, RepoError> {
    let row = sqlx::query_as::<_, ProductRow>(
        r#"
        UPDATE products
        SET
            name = COALESCE($2, name),
            description = COALESCE($3, description),
            quantity = COALESCE($4, quantity),
            unit_price_cents = COALESCE($5, unit_price_cents),
            supplier_id = COALESCE($6, supplier_id)
        WHERE id = $1
        RETURNING id, sku, name, description, quantity, unit_price_cents, supplier_id, created_at
        "#,
    )
    .bind(id)
    .bind(changes.name)
    .bind(changes.description)
    .bind(changes.quantity)
    .bind(changes.unit_price_cents)
    .bind(changes.supplier_id)
    .fetch_optional(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn delete(db: &PgPool, id: Uuid) -> Result<bool, RepoError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
