//! Catalog API handlers for the product picker.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use stepcart_core::ProductRef;
use tracing::instrument;

use crate::{catalog::search_products, error::AppError, state::AppState};

/// Build the catalog router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/catalog/products", get(products))
}

/// Query parameters for a catalog search.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive title filter.
    #[serde(default)]
    pub query: String,
    /// Number of catalog products to search.
    pub first: Option<i64>,
}

/// Search catalog products by title.
///
/// # Errors
///
/// Returns 400 for an out-of-range `first` and 502 if Shopify fails.
#[instrument(skip_all, fields(query = %params.query))]
pub async fn products(
    State(state): State<AppState>,
    Query(params): Query<CatalogQuery>,
) -> Result<Json<Vec<ProductRef>>, AppError> {
    let first = params.first.unwrap_or_else(|| state.catalog_page_size());
    if !(1..=250).contains(&first) {
        return Err(AppError::BadRequest(format!(
            "first must be between 1 and 250, got {first}"
        )));
    }

    let catalog = state.catalog().products(first).await?;
    Ok(Json(search_products(&catalog, &params.query)))
}
