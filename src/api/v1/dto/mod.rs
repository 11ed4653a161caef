/*
 * Responsibility
 * - request/response DTO (service ごと)
 * - validate() で形式チェック (DB 制約に届く前に 400 を返す)
 */
use serde::Deserialize;

use crate::repos::Page;

pub mod admin_users;
pub mod customers;
pub mod me;
pub mod payments;
pub mod products;
pub mod suppliers;

/// `?limit=&offset=` on list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListQuery {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

pub(crate) fn looks_like_email(s: &str) -> bool {
    let s = s.trim();
    match s.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !s.contains(' '),
        None => false,
    }
}
