//! Store access shared by the entity services.
//!
//! The services own their page queries (each selects different joined
//! columns); the count side of every listing is uniform and lives here so
//! page and count always run against the same predicate.

pub mod sql;

use sqlx::{PgPool, QueryBuilder};

use crate::policy::{EntityKind, Predicate};
use crate::utils::errors::AppError;

/// Counts rows of `kind` matching `predicate`. Subquery-based filters keep
/// this join-free regardless of what the page query joins in.
pub async fn count(db: &PgPool, kind: EntityKind, predicate: &Predicate) -> Result<i64, AppError> {
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {} WHERE ", sql::table(kind)));
    sql::push_predicate(&mut qb, kind, predicate);

    let total: i64 = qb.build_query_scalar().fetch_one(db).await?;
    Ok(total)
}

/// Maps constraint violations on writes to `Validation` errors the caller
/// can fix; anything else stays a repository failure.
pub fn constraint_error(err: sqlx::Error, what: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::validation(format!("{what} already exists"));
        }
        if db_err.is_foreign_key_violation() {
            return AppError::validation(format!("{what} references a record that does not exist"));
        }
    }
    AppError::from(err)
}
