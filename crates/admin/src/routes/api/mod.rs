//! API route handlers for admin.
//!
//! JSON endpoints over the definition repository and the catalog.

pub mod catalog;
pub mod configurators;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(configurators::router())
        .merge(catalog::router())
}
