use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    api::articles::VoteUpdate,
    db,
    error::AppResult,
    utils::extract::{AppPath, JsonOrDefault},
};

// PATCH /api/comments/:comment_id
pub async fn update_comment_votes(
    State(pool): State<PgPool>,
    AppPath(comment_id): AppPath<i32>,
    JsonOrDefault(update): JsonOrDefault<VoteUpdate>,
) -> AppResult<impl IntoResponse> {
    let delta = update.inc_votes.unwrap_or(0);
    let comment = db::update_comment_votes(&pool, comment_id, delta).await?;
    Ok(Json(json!({ "comment": comment })))
}

// DELETE /api/comments/:comment_id
pub async fn delete_comment(
    State(pool): State<PgPool>,
    AppPath(comment_id): AppPath<i32>,
) -> AppResult<impl IntoResponse> {
    let deleted = db::delete_comment(&pool, comment_id).await?;
    log::debug!(
        "deleted comment {} from article {}",
        deleted.comment_id,
        deleted.article_id
    );
    Ok(StatusCode::NO_CONTENT)
}
