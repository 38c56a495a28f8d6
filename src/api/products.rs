use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::{ApiError, AppState, SearchParams};
use crate::models::listing::{Listing, NewListing};

/// `GET /api/products`
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Listing>>, ApiError> {
    let products = state.catalog().list().await?;
    Ok(Json(products))
}

/// `POST /api/products`
///
/// A body that cannot be coerced into listing fields is reported like any
/// other storage failure.
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewListing>, JsonRejection>,
) -> Result<(StatusCode, Json<Listing>), ApiError> {
    let Json(fields) = payload.map_err(|rejection| ApiError::malformed(rejection.body_text()))?;
    let created = state.catalog().insert(fields).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/products/search?query=TEXT`
pub async fn search_products(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Listing>>, ApiError> {
    let Query(params) = params.map_err(|rejection| ApiError::malformed(rejection.body_text()))?;
    let results = state.catalog().search(params.query.as_deref()).await?;
    Ok(Json(results))
}
