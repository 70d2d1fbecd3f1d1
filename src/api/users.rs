use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use sqlx::PgPool;

use crate::{db, error::AppResult, utils::extract::AppPath};

// GET /api/users
pub async fn get_users(State(pool): State<PgPool>) -> AppResult<impl IntoResponse> {
    let users = db::list_users(&pool).await?;
    Ok(Json(json!({ "users": users })))
}

// GET /api/users/:username
pub async fn get_user(
    State(pool): State<PgPool>,
    AppPath(username): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    let user = db::get_user_by_username(&pool, &username).await?;
    Ok(Json(json!({ "user": user })))
}
