/*
 * Responsibility
 * - customers テーブル向け SQLx 操作
 * - email は UNIQUE (重複は RepoError::Conflict)
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::{Page, error::RepoError};

#[derive(Debug, Clone, FromRow)]
pub struct CustomerRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewCustomer<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
}

#[derive(Default)]
pub struct CustomerChanges<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
}

pub async fn list(db: &PgPool, page: Page) -> Result<Vec<CustomerRow>, RepoError> {
    let rows = sqlx::query_as::<_, CustomerRow>(
        r#"
        SELECT id, name, email, phone, address, created_at
        FROM customers
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

pub async fn create(db: &PgPool, new: NewCustomer<'_>) -> Result<CustomerRow, RepoError> {
    let row = sqlx::query_as::<_, CustomerRow>(
        r#"
        INSERT INTO customers (name, email, phone, address)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, email, phone, address, created_at
        "#,
    )
    .bind(new.name)
    .bind(new.email)
    .bind(new.phone)
    .bind(new.address)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn get(db: &PgPool, id: Uuid) -> Result<Option<CustomerRow>, RepoError> {
    let row = sqlx::query_as::<_, CustomerRow>(
        r#"
        SELECT id, name, email, phone, address, created_at
        FROM customers
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
    changes: CustomerChanges<'_>,
) -> Result<Option<CustomerRow>, RepoError> {
    let row = sqlx::query_as::<_, CustomerRow>(
        r#"
        UPDATE customers
        SET
            name = COALESCE($2, name),
            email = COALESCE($3, email),
            phone = COALESCE($4, phone),
            address = COALESCE($5, address)
        WHERE id = $1
        RETURNING id, name, email, phone, address, created_at
        "#,
    )
    .bind(id)
    .bind(changes.name)
    .bind(changes.email)
    .bind(changes.phone)
    .bind(changes.address)
    .fetch_optional(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn delete(db: &PgPool, id: Uuid) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM customers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
