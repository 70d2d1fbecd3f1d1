mod article;
pub use article::*;
mod comment;
pub use comment::*;
mod topic;
pub use topic::*;
mod user;
pub use user::*;

use sqlx::{Executor, PgPool};

pub const DEFAULT_LIMIT: i64 = 10;

pub async fn prepare_db(pool: &PgPool) -> Result<(), sqlx::Error> {
    pool.execute(include_str!("sql/schema.sql")).await?;
    Ok(())
}

/// Row offset for a zero-based page of `limit` rows.
pub(crate) fn page_offset(limit: i64, page: i64) -> i64 {
    limit.saturating_mul(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(page_offset(10, 0), 0);
        assert_eq!(page_offset(1, 1), 1);
        assert_eq!(page_offset(5, 3), 15);
    }
}
