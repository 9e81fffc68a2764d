//! A shopper walking a published configurator and adding it to a cart.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use stepcart_admin::render::extract_definition;
use stepcart_admin::repository::DefinitionRepository;
use stepcart_admin::store::InMemoryPageStore;
use stepcart_core::{LineItem, ProductId, SubmitError, SubmitOutcome};
use stepcart_integration_tests::{FakeShop, gift_box};
use stepcart_storefront::{CartClient, ConfiguratorSession, StorefrontConfig};

async fn published_session(shop: &FakeShop) -> ConfiguratorSession {
    let repository = DefinitionRepository::new(Arc::new(InMemoryPageStore::new()));
    let published = repository.create(&gift_box()).await.unwrap();
    let stored = repository.get(&published.id).await.unwrap();

    let cart = CartClient::new(&StorefrontConfig {
        shop_url: shop.url.clone(),
        cart_timeout: Duration::from_secs(5),
    })
    .unwrap();
    ConfiguratorSession::new(stored.definition, Arc::new(cart)).unwrap()
}

#[tokio::test]
async fn test_walk_steps_and_add_to_cart() {
    let shop = FakeShop::start().await;
    let session = published_session(&shop).await;

    // Step 1: two of the same mug.
    assert_eq!(session.select_product(&ProductId::from_numeric(1)).await, Some(1));
    assert_eq!(session.select_product(&ProductId::from_numeric(1)).await, Some(2));
    // Treats are offered by step 2, not step 1.
    assert_eq!(session.select_product(&ProductId::from_numeric(3)).await, None);
    assert!(session.next().await);

    session.select_product(&ProductId::from_numeric(3)).await;
    session.select_product(&ProductId::from_numeric(4)).await;
    assert!(session.next().await);
    assert!(!session.next().await);

    let summary = session.summary().await;
    assert_eq!(summary.total_quantity, 4);
    assert_eq!(summary.subtotal, Decimal::new(3650, 2));
    assert_eq!(summary.percent, Decimal::from(15));

    assert!(session.set_form_value(2, "message", "Happy birthday!").await);

    match session.submit().await.unwrap() {
        SubmitOutcome::Added { cart, cleared } => {
            assert!(cleared);
            assert_eq!(cart.items.len(), 3);
        }
        SubmitOutcome::Discarded => panic!("submission was discarded"),
    }

    let received = shop.received();
    assert_eq!(received.len(), 1);
    assert_eq!(
        received[0].items,
        vec![
            LineItem { id: 100, quantity: 2 },
            LineItem { id: 300, quantity: 1 },
            LineItem { id: 400, quantity: 1 },
        ]
    );

    let runtime = session.lock().await;
    assert!(runtime.aggregate().is_empty());
    assert!(!runtime.is_submitting());
}

#[tokio::test]
async fn test_submit_guards_do_not_reach_the_shop() {
    let shop = FakeShop::start().await;
    let session = published_session(&shop).await;

    session.select_product(&ProductId::from_numeric(2)).await;
    assert_eq!(
        session.submit().await.unwrap_err(),
        SubmitError::StepsRemaining { remaining: 2 }
    );

    session.next().await;
    session.next().await;
    session.remove_product(&ProductId::from_numeric(2)).await;
    assert_eq!(session.submit().await.unwrap_err(), SubmitError::EmptyCart);

    assert!(shop.received().is_empty());
}

#[tokio::test]
async fn test_selection_survives_navigation() {
    let shop = FakeShop::start().await;
    let session = published_session(&shop).await;

    session.select_product(&ProductId::from_numeric(2)).await;
    session.next().await;
    session.select_product(&ProductId::from_numeric(4)).await;
    session.back().await;
    assert_eq!(session.decrement_product(&ProductId::from_numeric(2)).await, Some(0));

    let runtime = session.lock().await;
    assert_eq!(runtime.aggregate().len(), 1);
    assert_eq!(runtime.aggregate().quantity_of(&ProductId::from_numeric(4)), 1);
    assert_eq!(runtime.summary().percent, Decimal::from(5));
}

#[tokio::test]
async fn test_page_body_round_trips_definition() {
    let store = Arc::new(InMemoryPageStore::new());
    let repository = DefinitionRepository::new(store.clone());
    let published = repository.create(&gift_box()).await.unwrap();

    let page = stepcart_admin::store::PageStore::get_page(store.as_ref(), &published.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(extract_definition(&page.body).unwrap(), gift_box());
}
