//! Admin HTTP API against a running server backed by a real store.
//!
//! Start the server with Shopify credentials, then:
//!
//! ```bash
//! ADMIN_BASE_URL=http://localhost:3001 cargo test -p stepcart-integration-tests -- --ignored
//! ```

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use serde_json::Value;
use stepcart_integration_tests::gift_box;

fn base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

fn numeric(gid: &str) -> &str {
    gid.rsplit('/').next().unwrap()
}

#[tokio::test]
#[ignore = "Requires running admin server and Shopify credentials"]
async fn test_health() {
    let response = reqwest::get(format!("{}/health", base_url())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
#[ignore = "Requires running admin server and Shopify credentials"]
async fn test_catalog_search() {
    let response = reqwest::get(format!("{}/api/catalog/products?first=5", base_url()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let products: Value = response.json().await.unwrap();
    assert!(products.as_array().unwrap().len() <= 5);
}

#[tokio::test]
#[ignore = "Requires running admin server and Shopify credentials"]
async fn test_publish_update_delete() {
    let client = reqwest::Client::new();
    let base = base_url();
    let mut definition = gift_box();
    definition.title = "Stepcart Live Test".to_string();

    let response = client
        .post(format!("{base}/api/configurators"))
        .json(&definition)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    let gid = created["id"].as_str().unwrap().to_string();
    let id = numeric(&gid).to_string();

    definition.title = "Stepcart Live Test (edited)".to_string();
    let response = client
        .put(format!("{base}/api/configurators/{id}"))
        .json(&definition)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let shown: Value = client
        .get(format!("{base}/api/configurators/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(shown["definition"]["title"], "Stepcart Live Test (edited)");

    let response = client
        .delete(format!("{base}/api/configurators/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let deleted: Value = response.json().await.unwrap();
    assert_eq!(deleted["deletedId"], gid);
}

#[tokio::test]
#[ignore = "Requires running admin server and Shopify credentials"]
async fn test_listing_rejects_misused_cursor() {
    let client = reqwest::Client::new();
    let base = base_url();

    let listing: Value = client
        .get(format!("{base}/api/configurators?page_size=1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let Some(next) = listing["cursor"]["nextCursor"].as_str() else {
        return;
    };

    let response = client
        .get(format!("{base}/api/configurators?direction=prev&cursor={next}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
