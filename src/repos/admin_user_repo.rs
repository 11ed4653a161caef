/*
 * Responsibility
 * - admin_users テーブル向け SQLx 操作 (admin service)
 * - role は token の role claim にそのまま載る名前
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::{Page, error::RepoError};

#[derive(Debug, Clone, FromRow)]
pub struct AdminUserRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

pub async fn list(db: &PgPool, page: Page) -> Result<Vec<AdminUserRow>, RepoError> {
    let rows = sqlx::query_as::<_, AdminUserRow>(
        r#"
        SELECT id, email, display_name, role, created_at
        FROM admin_users
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

pub async fn create(
    db: &PgPool,
    email: &str,
    display_name: &str,
    role: &str,
) -> Result<AdminUserRow, RepoError> {
    let row = sqlx::query_as::<_, AdminUserRow>(
        r#"
        INSERT INTO admin_users (email, display_name, role)
        VALUES ($1, $2, $3)
        RETURNING id, email, display_name, role, created_at
        "#,
    )
    .bind(email)
    .bind(display_name)
    .bind(role)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn get(db: &PgPool, id: Uuid) -> Result<Option<AdminUserRow>, RepoError> {
    let row = sqlx::query_as::<_, AdminUserRow>(
        r#"
        SELECT id, email, display_name, role, created_at
        FROM admin_users
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
    display_name: Option<&str>,
    role: Option<&str>,
) -> Result<Option<AdminUserRow>, RepoError> {
    let row = sqlx::query_as::<_, AdminUserRow>(
        r#"
        UPDATE admin_users
        SET
            display_name = COALESCE($2, display_name),
            role = COALESCE($3, role)
        WHERE id = $1
        RETURNING id, email, display_name, role, created_at
        "#,
    )
    .bind(id)
    .bind(display_name)
    .bind(role)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, id: Uuid) -> Result<bool, RepoError> {
    let result = sqlx::query("DELETE FROM admin_users WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
