use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult, DBError},
    utils::timestamp,
};

use super::{page_offset, topic_exists, DEFAULT_LIMIT};

#[derive(Debug, Serialize, FromRow)]
pub struct Article {
    pub article_id: i32,
    pub title: String,
    pub topic: String,
    pub body: String,
    #[serde(serialize_with = "timestamp::serialize")]
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: Option<String>,
    pub comment_count: i32,
}

/// Columns an article listing may be ordered by.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    ArticleId,
    Title,
    Topic,
    Body,
    #[default]
    CreatedAt,
    Votes,
    CommentCount,
}

impl SortBy {
    fn column(self) -> &'static str {
        match self {
            SortBy::ArticleId => "articles.article_id",
            SortBy::Title => "articles.title",
            SortBy::Topic => "articles.topic",
            SortBy::Body => "articles.body",
            SortBy::CreatedAt => "articles.created_at",
            SortBy::Votes => "articles.votes",
            SortBy::CommentCount => "comment_count",
        }
    }
}

impl FromStr for SortBy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "article_id" => Ok(SortBy::ArticleId),
            "title" => Ok(SortBy::Title),
            "topic" => Ok(SortBy::Topic),
            "body" => Ok(SortBy::Body),
            "created_at" => Ok(SortBy::CreatedAt),
            "votes" => Ok(SortBy::Votes),
            "comment_count" => Ok(SortBy::CommentCount),
            other => Err(AppError::bad_request(format!("cannot sort by {other:?}"))),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(AppError::bad_request(format!("invalid order {s:?}")))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFilter {
    pub topic: Option<String>,
    pub sort_by: SortBy,
    pub order: SortOrder,
    pub limit: i64,
    pub page: i64,
}

impl Default for ArticleFilter {
    fn default() -> Self {
        Self {
            topic: None,
            sort_by: SortBy::default(),
            order: SortOrder::default(),
            limit: DEFAULT_LIMIT,
            page: 0,
        }
    }
}

const LIST_ARTICLES: &str = r#"
    SELECT
        articles.article_id,
        articles.title,
        articles.topic,
        articles.body,
        articles.created_at,
        articles.votes,
        articles.article_img_url,
        COUNT(comments.comment_id)::INT AS comment_count
    FROM articles
    LEFT JOIN comments ON comments.article_id = articles.article_id
"#;

pub async fn get_article_by_id(pool: &PgPool, article_id: i32) -> AppResult<Article> {
    let article = sqlx::query_as::<_, Article>(
        r#"
        SELECT
            articles.article_id,
            articles.title,
            articles.topic,
            articles.body,
            articles.created_at,
            articles.votes,
            articles.article_img_url,
            COUNT(comments.comment_id)::INT AS comment_count
        FROM articles
        LEFT JOIN comments ON comments.article_id = articles.article_id
        WHERE articles.article_id = $1
        GROUP BY articles.article_id
        "#,
    )
    .bind(article_id)
    .fetch_optional(pool)
    .await?;

    article.ok_or(AppError::DBError(DBError::ArticleNotFound))
}

pub async fn article_exists(pool: &PgPool, article_id: i32) -> AppResult<bool> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM articles WHERE article_id = $1)")
            .bind(article_id)
            .fetch_one(pool)
            .await?;

    Ok(exists)
}

pub async fn list_articles(pool: &PgPool, filter: &ArticleFilter) -> AppResult<Vec<Article>> {
    if let Some(topic) = filter.topic.as_deref() {
        if !topic_exists(pool, topic).await? {
            return Err(DBError::TopicNotFound.into());
        }
    }

    let mut query = QueryBuilder::<Postgres>::new(LIST_ARTICLES);

    if let Some(topic) = filter.topic.as_deref() {
        query.push(" WHERE articles.topic = ").push_bind(topic);
    }

    let order = filter.order.keyword();
    query
        .push(" GROUP BY articles.article_id ORDER BY ")
        .push(filter.sort_by.column())
        .push(" ")
        .push(order)
        .push(", articles.article_id ")
        .push(order)
        .push(" LIMIT ")
        .push_bind(filter.limit)
        .push(" OFFSET ")
        .push_bind(page_offset(filter.limit, filter.page));

    let articles = query.build_query_as::<Article>().fetch_all(pool).await?;
    Ok(articles)
}

pub async fn update_article_votes(pool: &PgPool, article_id: i32, delta: i32) -> AppResult<Article> {
    let article = sqlx::query_as::<_, Article>(
        r#"
        WITH article AS (
            UPDATE articles
            SET votes = votes + $1
            WHERE article_id = $2
            RETURNING *
        )
        SELECT
            article.article_id,
            article.title,
            article.topic,
            article.body,
            article.created_at,
            article.votes,
            article.article_img_url,
            (
                SELECT COUNT(*)::INT
                FROM comments
                WHERE comments.article_id = article.article_id
            ) AS comment_count
        FROM article
        "#,
    )
    .bind(delta)
    .bind(article_id)
    .fetch_optional(pool)
    .await?;

    article.ok_or(AppError::DBError(DBError::ArticleNotFound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("article_id", SortBy::ArticleId)]
    #[case("title", SortBy::Title)]
    #[case("topic", SortBy::Topic)]
    #[case("body", SortBy::Body)]
    #[case("created_at", SortBy::CreatedAt)]
    #[case("votes", SortBy::Votes)]
    #[case("comment_count", SortBy::CommentCount)]
    fn parses_allowed_sort_columns(#[case] input: &str, #[case] expected: SortBy) {
        assert_eq!(input.parse::<SortBy>().unwrap(), expected);
    }

    #[rstest]
    #[case("author")]
    #[case("CREATED_AT")]
    #[case("votes; DROP TABLE articles")]
    #[case("")]
    fn rejects_unknown_sort_columns(#[case] input: &str) {
        assert!(matches!(
            input.parse::<SortBy>(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[rstest]
    #[case("asc", SortOrder::Asc)]
    #[case("ASC", SortOrder::Asc)]
    #[case("Desc", SortOrder::Desc)]
    fn order_is_case_insensitive(#[case] input: &str, #[case] expected: SortOrder) {
        assert_eq!(input.parse::<SortOrder>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_order() {
        assert!("sideways".parse::<SortOrder>().is_err());
    }

    #[test]
    fn default_filter_is_newest_first() {
        let filter = ArticleFilter::default();
        assert_eq!(filter.sort_by.column(), "articles.created_at");
        assert_eq!(filter.order.keyword(), "DESC");
        assert_eq!(filter.limit, 10);
        assert_eq!(filter.page, 0);
        assert!(filter.topic.is_none());
    }
}
