use axum::{response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::error::AppResult;

const ENDPOINTS: &str = include_str!("../endpoints.json");

// GET /api
pub async fn get_endpoints() -> AppResult<impl IntoResponse> {
    let catalogue: Value = serde_json::from_str(ENDPOINTS).map_err(anyhow::Error::from)?;
    Ok(Json(json!({ "message": catalogue })))
}
