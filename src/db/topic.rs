use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::error::AppResult;

#[derive(Debug, Serialize, FromRow)]
pub struct Topic {
    pub slug: String,
    pub description: String,
}

pub async fn list_topics(pool: &PgPool) -> AppResult<Vec<Topic>> {
    let topics = sqlx::query_as::<_, Topic>("SELECT slug, description FROM topics ORDER BY slug")
        .fetch_all(pool)
        .await?;

    Ok(topics)
}

pub async fn topic_exists(pool: &PgPool, slug: &str) -> AppResult<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM topics WHERE slug = $1)")
        .bind(slug)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}
