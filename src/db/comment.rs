use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use validator::Validate;

use crate::{
    error::{AppError, AppResult, DBError},
    utils::timestamp,
};

use super::{article_exists, page_offset, user_exists};

#[derive(Debug, Serialize, FromRow)]
pub struct Comment {
    pub comment_id: i32,
    pub body: String,
    pub article_id: i32,
    pub author: String,
    pub votes: i32,
    #[serde(serialize_with = "timestamp::serialize")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewComment {
    #[validate(required, length(min = 1, message = "username can't be blank"))]
    pub username: Option<String>,
    #[validate(required, length(min = 1, message = "body can't be blank"))]
    pub body: Option<String>,
}

pub async fn list_comments_by_article(
    pool: &PgPool,
    article_id: i32,
    limit: i64,
    page: i64,
) -> AppResult<Vec<Comment>> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT comment_id, body, article_id, author, votes, created_at
        FROM comments
        WHERE article_id = $1
        ORDER BY created_at DESC, comment_id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(article_id)
    .bind(limit)
    .bind(page_offset(limit, page))
    .fetch_all(pool)
    .await?;

    // An empty page is only an error when the article itself is missing.
    if comments.is_empty() && !article_exists(pool, article_id).await? {
        return Err(DBError::ArticleNotFound.into());
    }

    Ok(comments)
}

pub async fn insert_comment(
    pool: &PgPool,
    article_id: i32,
    comment: NewComment,
) -> AppResult<Comment> {
    comment.validate()?;

    let (Some(username), Some(body)) = (comment.username, comment.body) else {
        return Err(AppError::bad_request("username and body are required"));
    };

    if !user_exists(pool, &username).await? {
        return Err(DBError::UserNotFound.into());
    }

    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (body, author, article_id)
        VALUES ($1, $2, $3)
        RETURNING comment_id, body, article_id, author, votes, created_at
        "#,
    )
    .bind(body)
    .bind(username)
    .bind(article_id)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

pub async fn update_comment_votes(pool: &PgPool, comment_id: i32, delta: i32) -> AppResult<Comment> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET votes = votes + $1
        WHERE comment_id = $2
        RETURNING comment_id, body, article_id, author, votes, created_at
        "#,
    )
    .bind(delta)
    .bind(comment_id)
    .fetch_optional(pool)
    .await?;

    comment.ok_or(AppError::DBError(DBError::CommentNotFound))
}

pub async fn delete_comment(pool: &PgPool, comment_id: i32) -> AppResult<Comment> {
    let deleted = sqlx::query_as::<_, Comment>(
        r#"
        DELETE FROM comments
        WHERE comment_id = $1
        RETURNING comment_id, body, article_id, author, votes, created_at
        "#,
    )
    .bind(comment_id)
    .fetch_optional(pool)
    .await?;

    deleted.ok_or(AppError::DBError(DBError::CommentNotFound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("icellusedkars"), Some("this is great!"), true)]
    #[case(Some("icellusedkars"), None, false)]
    #[case(None, Some("this is great!"), false)]
    #[case(None, None, false)]
    #[case(Some(""), Some("this is great!"), false)]
    #[case(Some("icellusedkars"), Some(""), false)]
    fn validates_required_fields(
        #[case] username: Option<&str>,
        #[case] body: Option<&str>,
        #[case] valid: bool,
    ) {
        let comment = NewComment {
            username: username.map(str::to_string),
            body: body.map(str::to_string),
        };
        assert_eq!(comment.validate().is_ok(), valid);
    }
}
