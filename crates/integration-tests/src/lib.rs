//! Integration tests for Stepcart.
//!
//! # Running Tests
//!
//! ```bash
//! # Offline tests (in-memory page store, local fake shop)
//! cargo test -p stepcart-integration-tests
//!
//! # Live tests against a running admin server with Shopify credentials
//! ADMIN_BASE_URL=http://localhost:3001 cargo test -p stepcart-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `configurator_lifecycle` - Repository CRUD and cursor paging
//! - `shopper_flow` - Publish, reload, walk the steps and add to a cart
//! - `admin_api_live` - HTTP API against a real store (ignored by default)

use std::sync::{Arc, Mutex};

use axum::{Json, Router, extract::State, routing::post};
use rust_decimal::Decimal;
use stepcart_core::{
    CartPayload, ConfiguratorDefinition, FormField, FormStep, ProductId, ProductRef, ProductStep,
    Step, Variant, VariantId,
};
use url::Url;

/// A product with one variant whose numeric id is `id * 100`.
#[must_use]
pub fn product(id: u64, title: &str, cents: i64) -> ProductRef {
    ProductRef {
        id: ProductId::from_numeric(id),
        title: title.to_string(),
        description: String::new(),
        image_url: format!("https://cdn.example/{id}.png"),
        variants: vec![Variant {
            id: VariantId::from_numeric(id * 100),
            price: Decimal::new(cents, 2),
            compare_at_price: None,
            sku: None,
            inventory_quantity: Some(10),
        }],
    }
}

/// Three steps: two product steps and a gift card form.
#[must_use]
pub fn gift_box() -> ConfiguratorDefinition {
    ConfiguratorDefinition {
        title: "Build Your Gift Box".to_string(),
        steps: vec![
            Step::Products(ProductStep {
                title: "Step 1: Choose a Mug".to_string(),
                items: vec![product(1, "Blue Mug", 1200), product(2, "Red Mug", 1200)],
            }),
            Step::Products(ProductStep {
                title: "Step 2: Add Treats".to_string(),
                items: vec![product(3, "Shortbread", 450), product(4, "Green Tea", 800)],
            }),
            Step::Form(FormStep {
                title: "Step 3: Gift Card".to_string(),
                fields: vec![FormField {
                    label: "Message".to_string(),
                    name: "message".to_string(),
                    placeholder: "Enter text".to_string(),
                    kind: stepcart_core::FieldKind::Textarea,
                }],
            }),
        ],
        discount: stepcart_core::DiscountPolicy::default(),
    }
}

/// Payloads received by a [`FakeShop`].
pub type Received = Arc<Mutex<Vec<CartPayload>>>;

/// A local shop that accepts every `cart/add.js` request and records it.
#[derive(Debug)]
pub struct FakeShop {
    /// Shop root to configure the cart client with.
    pub url: Url,
    /// Every payload received, in order.
    pub received: Received,
}

impl FakeShop {
    /// Start the shop on an ephemeral port.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    #[allow(clippy::unwrap_used)]
    pub async fn start() -> Self {
        let received: Received = Arc::default();
        let router = Router::new()
            .route("/cart/add.js", post(add))
            .with_state(Arc::clone(&received));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            url: Url::parse(&format!("http://{addr}/")).unwrap(),
            received,
        }
    }

    /// Snapshot of the payloads received so far.
    ///
    /// # Panics
    ///
    /// Panics if the recording lock was poisoned.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn received(&self) -> Vec<CartPayload> {
        self.received.lock().unwrap().clone()
    }
}

#[allow(clippy::unwrap_used)]
async fn add(
    State(received): State<Received>,
    Json(payload): Json<CartPayload>,
) -> Json<serde_json::Value> {
    let items: Vec<serde_json::Value> = payload
        .items
        .iter()
        .map(|line| serde_json::json!({ "variant_id": line.id, "quantity": line.quantity }))
        .collect();
    received.lock().unwrap().push(payload);
    Json(serde_json::json!({ "items": items }))
}
