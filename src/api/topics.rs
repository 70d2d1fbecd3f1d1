use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use sqlx::PgPool;

use crate::{db, error::AppResult};

// GET /api/topics
pub async fn get_topics(State(pool): State<PgPool>) -> AppResult<impl IntoResponse> {
    let topics = db::list_topics(&pool).await?;
    Ok(Json(json!({ "topics": topics })))
}
