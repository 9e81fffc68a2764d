//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                              - Health check
//!
//! # Configurators (stored as online store pages)
//! GET    /api/configurators                   - List (cursor, direction, page_size)
//! POST   /api/configurators                   - Publish a new configurator
//! POST   /api/configurators/preview           - Render without publishing
//! GET    /api/configurators/{id}              - Definition of a configurator
//! PUT    /api/configurators/{id}              - Overwrite a configurator
//! DELETE /api/configurators/{id}              - Delete a configurator
//!
//! # Catalog (product picker)
//! GET    /api/catalog/products                - Search catalog products
//! ```

pub mod api;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Build the application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(api::router())
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}
