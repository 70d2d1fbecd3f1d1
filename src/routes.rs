use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer};

use crate::{api, AppState};

pub fn generate_routes(pool: PgPool) -> Router {
    let state = AppState { pool };

    // Known paths called with an unsupported method answer like unknown paths.
    Router::new()
        .route("/api", get(api::endpoints::get_endpoints).fallback(handler_404))
        // ==== TOPICS ==== //
        .route(
            "/api/topics",
            get(api::topics::get_topics).fallback(handler_404),
        )
        // ==== ARTICLES ==== //
        .route(
            "/api/articles",
            get(api::articles::get_articles).fallback(handler_404),
        )
        .route(
            "/api/articles/:article_id",
            get(api::articles::get_article)
                .patch(api::articles::update_article_votes)
                .fallback(handler_404),
        )
        .route(
            "/api/articles/:article_id/comments",
            get(api::articles::get_comments)
                .post(api::articles::create_comment)
                .fallback(handler_404),
        )
        // ==== USERS ==== //
        .route("/api/users", get(api::users::get_users).fallback(handler_404))
        .route(
            "/api/users/:username",
            get(api::users::get_user).fallback(handler_404),
        )
        // ==== COMMENTS ==== //
        .route(
            "/api/comments/:comment_id",
            patch(api::comments::update_comment_votes)
                .delete(api::comments::delete_comment)
                .fallback(handler_404),
        )
        .fallback(handler_404)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new()),
        )
}

async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "msg": "Route not found" })))
}
