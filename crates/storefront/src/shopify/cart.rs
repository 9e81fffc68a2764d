//! `cart/add.js` client.

use std::sync::Arc;

use async_trait::async_trait;
use stepcart_core::{CartAddition, CartApiError, CartGateway, CartPayload};
use tracing::{debug, instrument, warn};
use url::Url;

use super::ShopifyError;
use super::types::{AddResponse, CartErrorBody};
use crate::config::StorefrontConfig;

/// Client for the shop's AJAX Cart API.
#[derive(Clone)]
pub struct CartClient {
    inner: Arc<CartClientInner>,
}

struct CartClientInner {
    client: reqwest::Client,
    add_endpoint: Url,
}

impl CartClient {
    /// Create a client for the configured shop.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError` if the HTTP client cannot be built or the
    /// cart endpoint cannot be derived from the shop URL.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ShopifyError> {
        let client = reqwest::Client::builder()
            .timeout(config.cart_timeout)
            .build()?;
        let add_endpoint = config.shop_url.join("cart/add.js")?;

        Ok(Self {
            inner: Arc::new(CartClientInner {
                client,
                add_endpoint,
            }),
        })
    }

    /// The `cart/add.js` URL requests go to.
    #[must_use]
    pub fn add_endpoint(&self) -> &Url {
        &self.inner.add_endpoint
    }
}

impl std::fmt::Debug for CartClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartClient")
            .field("add_endpoint", &self.inner.add_endpoint.as_str())
            .finish_non_exhaustive()
    }
}

fn transport_error(err: &reqwest::Error) -> CartApiError {
    if err.is_timeout() {
        CartApiError::Timeout
    } else {
        CartApiError::Transport(err.to_string())
    }
}

#[async_trait]
impl CartGateway for CartClient {
    #[instrument(skip(self, payload), fields(items = payload.items.len(), quantity = payload.total_quantity()))]
    async fn add_items(&self, payload: &CartPayload) -> Result<CartAddition, CartApiError> {
        let response = self
            .inner
            .client
            .post(self.inner.add_endpoint.clone())
            .header("Accept", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| transport_error(&e))?;

        if !status.is_success() {
            let error = serde_json::from_str::<CartErrorBody>(&body)
                .unwrap_or_else(|_| CartErrorBody {
                    status: None,
                    message: status.canonical_reason().unwrap_or("Cart Error").to_string(),
                    description: String::new(),
                })
                .into_error(status.as_u16());
            warn!(status = status.as_u16(), error = %error, "Cart rejected items");
            return Err(error);
        }

        let added: AddResponse = serde_json::from_str(&body).map_err(|e| {
            CartApiError::Transport(format!("unexpected cart response: {e}"))
        })?;
        debug!(lines = added.items.len(), "Items added to cart");
        Ok(added.into())
    }
}
