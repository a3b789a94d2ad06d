//! News search endpoint

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::error;

use newsheat_services::{SearchRequest, ServiceError};

use crate::server::AppState;

/// Query parameters for a news search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub keyword: Option<String>,
    /// Max articles fetched per source
    pub limit: Option<usize>,
    pub max_per_source: Option<usize>,
    pub balance: Option<bool>,
    #[serde(default)]
    pub all_sources: bool,
}

impl SearchQuery {
    /// Request built on `base`, which supplies defaults for the keyword;
    /// `None` without a keyword
    pub fn into_request(self, base: impl FnOnce(String) -> SearchRequest) -> Option<SearchRequest> {
        let keyword = self.keyword.filter(|k| !k.trim().is_empty())?;
        let mut request = base(keyword);
        if let Some(limit) = self.limit {
            request.limit = limit;
        }
        if let Some(cap) = self.max_per_source {
            request.max_per_source = cap;
        }
        if let Some(balance) = self.balance {
            request.balance = balance;
        }
        request.all_sources = self.all_sources;
        Some(request)
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/news/search", get(search_news))
}

/// GET /api/news/search?keyword=...
async fn search_news(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> impl IntoResponse {
    let Some(request) = params.into_request(|keyword| state.news.request(keyword)) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "keyword parameter is required"
            })),
        )
            .into_response();
    };

    match state.news.search(&request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(ServiceError::InvalidInput(msg)) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": msg })),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to search news: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": format!("Failed to search news: {}", e)
                })),
            )
                .into_response()
        }
    }
}
