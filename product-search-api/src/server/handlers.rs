//! HTTP request handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::server::response::{ApiError, ApiResponse};
use crate::server::state::AppState;
use product_search_shared::{SearchHit, SearchRequest};

/// Raw query-string parameters for product search.
///
/// Numbers are kept as text so malformed values fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub page: Option<String>,
    pub size: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "Product search API is running")
}

/// Search products by name, generic name, or company.
///
/// `GET /api/v1/products/search?q=<text>&page=<n>&size=<n>`
pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<Vec<SearchHit>>>, ApiError> {
    let request = SearchRequest::from_params(
        params.q.as_deref(),
        params.page.as_deref(),
        params.size.as_deref(),
    )?;

    let results = state.search.search(&request).await?;

    info!(
        query = %request.query,
        page = request.page,
        size = request.size,
        returned = results.len(),
        total_items = results.pagination.total_items,
        "Search served"
    );

    let message = if results.is_empty() {
        "No products found"
    } else {
        "Products retrieved successfully"
    };

    Ok(Json(ApiResponse::paginated(
        message,
        results.hits,
        results.pagination,
    )))
}
