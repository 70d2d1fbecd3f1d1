use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult, DBError};

#[derive(Debug, Serialize, FromRow)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

pub async fn list_users(pool: &PgPool) -> AppResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>("SELECT username, name, avatar_url FROM users")
        .fetch_all(pool)
        .await?;

    Ok(users)
}

pub async fn get_user_by_username(pool: &PgPool, username: &str) -> AppResult<User> {
    let user = sqlx::query_as::<_, User>(
        "SELECT username, name, avatar_url FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    user.ok_or(AppError::DBError(DBError::UserNotFound))
}

pub async fn user_exists(pool: &PgPool, username: &str) -> AppResult<bool> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(pool)
            .await?;

    Ok(exists)
}
