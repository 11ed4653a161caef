/*
 * Responsibility
 * - service ごとのテーブル操作 (sqlx / PgPool)
 * - スキーマ管理はこのリポジトリの外 (migrations/ は参照用)
 */
pub mod admin_user_repo;
pub mod customer_repo;
pub mod error;
pub mod payment_repo;
pub mod product_repo;
pub mod supplier_repo;

/// Page window for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub const DEFAULT_LIMIT: i64 = 50;
    pub const MAX_LIMIT: i64 = 200;

    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
            offset: offset.unwrap_or(0).max(0),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}
