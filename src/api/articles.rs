use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use crate::{
    db::{self, ArticleFilter, NewComment, SortBy, SortOrder, DEFAULT_LIMIT},
    error::{AppError, AppResult},
    utils::extract::{AppJson, AppPath, AppQuery, JsonOrDefault},
};

#[derive(Debug, Default, Deserialize)]
pub struct ListArticlesQuery {
    #[serde(default)]
    topic: Option<String>,
    #[serde(default)]
    sort_by: Option<String>,
    #[serde(default)]
    order: Option<String>,
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    p: Option<u32>,
}

impl TryFrom<ListArticlesQuery> for ArticleFilter {
    type Error = AppError;

    fn try_from(query: ListArticlesQuery) -> Result<Self, Self::Error> {
        Ok(ArticleFilter {
            topic: query.topic.filter(|topic| !topic.is_empty()),
            sort_by: query
                .sort_by
                .as_deref()
                .map(str::parse::<SortBy>)
                .transpose()?
                .unwrap_or_default(),
            order: query
                .order
                .as_deref()
                .map(str::parse::<SortOrder>)
                .transpose()?
                .unwrap_or_default(),
            limit: query.limit.map_or(DEFAULT_LIMIT, i64::from),
            page: query.p.map_or(0, i64::from),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub p: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VoteUpdate {
    #[serde(default)]
    pub inc_votes: Option<i32>,
}

// GET /api/articles
pub async fn get_articles(
    State(pool): State<PgPool>,
    AppQuery(params): AppQuery<ListArticlesQuery>,
) -> AppResult<impl IntoResponse> {
    let filter = ArticleFilter::try_from(params)?;
    let articles = db::list_articles(&pool, &filter).await?;
    Ok(Json(json!({ "articles": articles })))
}

// GET /api/articles/:article_id
pub async fn get_article(
    State(pool): State<PgPool>,
    AppPath(article_id): AppPath<i32>,
) -> AppResult<impl IntoResponse> {
    let article = db::get_article_by_id(&pool, article_id).await?;
    Ok(Json(json!({ "article": article })))
}

// PATCH /api/articles/:article_id
pub async fn update_article_votes(
    State(pool): State<PgPool>,
    AppPath(article_id): AppPath<i32>,
    JsonOrDefault(update): JsonOrDefault<VoteUpdate>,
) -> AppResult<impl IntoResponse> {
    let delta = update.inc_votes.unwrap_or(0);
    let article = db::update_article_votes(&pool, article_id, delta).await?;
    Ok(Json(json!({ "article": article })))
}

// GET /api/articles/:article_id/comments
pub async fn get_comments(
    State(pool): State<PgPool>,
    AppPath(article_id): AppPath<i32>,
    AppQuery(page): AppQuery<PageQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = page.limit.map_or(DEFAULT_LIMIT, i64::from);
    let page = page.p.map_or(0, i64::from);

    let comments = db::list_comments_by_article(&pool, article_id, limit, page).await?;
    Ok(Json(json!({ "comments": comments })))
}

// POST /api/articles/:article_id/comments
pub async fn create_comment(
    State(pool): State<PgPool>,
    AppPath(article_id): AppPath<i32>,
    AppJson(comment): AppJson<NewComment>,
) -> AppResult<impl IntoResponse> {
    let comment = db::insert_comment(&pool, article_id, comment).await?;
    Ok((StatusCode::CREATED, Json(json!({ "comment": comment }))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_uses_defaults() {
        let filter = ArticleFilter::try_from(ListArticlesQuery::default()).unwrap();
        assert_eq!(filter, ArticleFilter::default());
    }

    #[test]
    fn query_maps_onto_filter() {
        let query = ListArticlesQuery {
            topic: Some("cats".to_string()),
            sort_by: Some("votes".to_string()),
            order: Some("ASC".to_string()),
            limit: Some(5),
            p: Some(2),
        };

        let filter = ArticleFilter::try_from(query).unwrap();
        assert_eq!(filter.topic.as_deref(), Some("cats"));
        assert_eq!(filter.sort_by, SortBy::Votes);
        assert_eq!(filter.order, SortOrder::Asc);
        assert_eq!(filter.limit, 5);
        assert_eq!(filter.page, 2);
    }

    #[test]
    fn blank_topic_means_no_filter() {
        let query = ListArticlesQuery {
            topic: Some(String::new()),
            ..Default::default()
        };
        let filter = ArticleFilter::try_from(query).unwrap();
        assert!(filter.topic.is_none());
    }

    #[test]
    fn invalid_sort_is_rejected() {
        let query = ListArticlesQuery {
            sort_by: Some("author_id".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            ArticleFilter::try_from(query),
            Err(AppError::BadRequest(_))
        ));
    }
}
