/*
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - SQLSTATE を意味に変換 (23505 → Conflict, 23503 → InvalidReference)
 */
use thiserror::Error;

/// Postgres SQLSTATE for unique_violation.
const UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE for foreign_key_violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    #[error("conflict")]
    Conflict,
    #[error("referenced row does not exist")]
    InvalidReference,
}

impl RepoError {
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(dbe) = &e {
            match dbe.code().as_deref() {
                Some(UNIQUE_VIOLATION) => return RepoError::Conflict,
                Some(FOREIGN_KEY_VIOLATION) => return RepoError::InvalidReference,
                _ => {}
            }
        }
        RepoError::Db(e)
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    use sqlx::error::{DatabaseError, ErrorKind};

    use super::*;

    #[derive(Debug)]
    struct PgCode(&'static str);

    impl fmt::Display for PgCode {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "sqlstate {}", self.0)
        }
    }

    impl StdError for PgCode {}

    impl DatabaseError for PgCode {
        fn message(&self) -> &str {
            "test"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    fn db_error(code: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(PgCode(code)))
    }

    #[test]
    fn non_database_errors_stay_db_errors() {
        let err = RepoError::from_sqlx(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepoError::Db(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn maps_constraint_violations() {
        assert!(matches!(
            RepoError::from_sqlx(db_error("23505")),
            RepoError::Conflict
        ));
        assert!(matches!(
            RepoError::from_sqlx(db_error("23503")),
            RepoError::InvalidReference
        ));
        assert!(matches!(
            RepoError::from_sqlx(db_error("40001")),
            RepoError::Db(_)
        ));
    }
}
