use std::borrow::Cow;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type AppResult<T> = std::result::Result<T, AppError>;

const BAD_REQUEST: &str = "You have made a bad request";

// SQLSTATE codes surfaced by Postgres.
const INVALID_TEXT_REPRESENTATION: &str = "22P02";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNDEFINED_COLUMN: &str = "42703";

#[derive(thiserror::Error, Debug)]
pub enum DBError {
    #[error("article_id not found in the database")]
    ArticleNotFound,

    #[error("comment_id not found in the database")]
    CommentNotFound,

    #[error("username not found in the database")]
    UserNotFound,

    #[error("You have made a bad request - this topic does not exist")]
    TopicNotFound,
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Any error: {0:?}")]
    Anyhow(#[from] anyhow::Error),

    #[error("DB Error: {0:?}")]
    DBError(#[from] DBError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("SQL failed: {0:?}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Invalid request: {0:?}")]
    Validation(#[from] validator::ValidationErrors),
}

impl AppError {
    pub fn bad_request(reason: impl Into<String>) -> Self {
        AppError::BadRequest(reason.into())
    }

    fn sql_state(&self) -> Option<Cow<'_, str>> {
        match self {
            AppError::Sqlx(err) => err.as_database_error().and_then(|db_err| db_err.code()),
            _ => None,
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

type Classified = (StatusCode, Cow<'static, str>);

fn invalid_text(err: &AppError) -> Option<Classified> {
    (err.sql_state()? == INVALID_TEXT_REPRESENTATION)
        .then_some((StatusCode::BAD_REQUEST, Cow::Borrowed(BAD_REQUEST)))
}

fn foreign_key(err: &AppError) -> Option<Classified> {
    (err.sql_state()? == FOREIGN_KEY_VIOLATION).then_some((
        StatusCode::NOT_FOUND,
        Cow::Borrowed("Value not found in the database"),
    ))
}

fn undefined_column(err: &AppError) -> Option<Classified> {
    (err.sql_state()? == UNDEFINED_COLUMN)
        .then_some((StatusCode::BAD_REQUEST, Cow::Borrowed(BAD_REQUEST)))
}

fn explicit_status(err: &AppError) -> Option<Classified> {
    match err {
        AppError::BadRequest(_) | AppError::Validation(_) => {
            Some((StatusCode::BAD_REQUEST, Cow::Borrowed(BAD_REQUEST)))
        }
        AppError::DBError(db_error) => {
            Some((StatusCode::NOT_FOUND, Cow::Owned(db_error.to_string())))
        }
        _ => None,
    }
}

/// Classifiers are tried in order; the first match decides the response.
const PIPELINE: [fn(&AppError) -> Option<Classified>; 4] =
    [invalid_text, foreign_key, undefined_column, explicit_status];

pub fn classify(err: &AppError) -> Classified {
    PIPELINE
        .iter()
        .find_map(|classifier| classifier(err))
        .unwrap_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            Cow::Borrowed("Something went wrong!"),
        ))
}

// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = classify(&self);

        if status.is_server_error() {
            log::error!("Error: {:?}", self);
        } else {
            log::debug!("Rejected request ({}): {}", status, self);
        }

        (status, Json(json!({ "msg": msg }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::bad_request("limit"), StatusCode::BAD_REQUEST, BAD_REQUEST)]
    #[case(
        DBError::ArticleNotFound.into(),
        StatusCode::NOT_FOUND,
        "article_id not found in the database"
    )]
    #[case(
        DBError::CommentNotFound.into(),
        StatusCode::NOT_FOUND,
        "comment_id not found in the database"
    )]
    #[case(
        DBError::UserNotFound.into(),
        StatusCode::NOT_FOUND,
        "username not found in the database"
    )]
    #[case(
        DBError::TopicNotFound.into(),
        StatusCode::NOT_FOUND,
        "You have made a bad request - this topic does not exist"
    )]
    #[case(
        anyhow::anyhow!("boom").into(),
        StatusCode::INTERNAL_SERVER_ERROR,
        "Something went wrong!"
    )]
    #[case(
        sqlx::Error::PoolTimedOut.into(),
        StatusCode::INTERNAL_SERVER_ERROR,
        "Something went wrong!"
    )]
    fn classifies_errors(#[case] err: AppError, #[case] status: StatusCode, #[case] msg: &str) {
        let (got_status, got_msg) = classify(&err);
        assert_eq!(got_status, status);
        assert_eq!(got_msg, msg);
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("body", validator::ValidationError::new("required"));
        let (status, msg) = classify(&errors.into());
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(msg, BAD_REQUEST);
    }

    #[tokio::test]
    async fn response_body_carries_msg() {
        let response = AppError::from(DBError::UserNotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "msg": "username not found in the database" }));
    }
}
