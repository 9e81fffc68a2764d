//! Shopify AJAX Cart API client.
//!
//! # Architecture
//!
//! - Plain `reqwest` JSON requests against the shop's `cart/*.js` endpoints
//! - No access token: these endpoints act on the shopper's own cart
//! - Errors come back as `{status, message, description}` and are mapped to
//!   [`CartApiError`](stepcart_core::CartApiError)
//!
//! # Example
//!
//! ```rust,ignore
//! use stepcart_storefront::shopify::CartClient;
//!
//! let client = CartClient::new(&config)?;
//! let added = client.add_items(&runtime.cart_payload()).await?;
//! ```

mod cart;
pub mod types;

pub use cart::CartClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur while setting up the cart client.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// The HTTP client could not be built.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The cart endpoint could not be derived from the shop URL.
    #[error("Invalid shop URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
