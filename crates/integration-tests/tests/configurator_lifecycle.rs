//! Repository lifecycle against the in-memory page store.
//!
//! The in-memory store mirrors the Admin API's cursor and `userErrors`
//! behavior, so these cover the same paths the live store takes.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use stepcart_admin::render::extract_definition;
use stepcart_admin::repository::{
    DefinitionRepository, Direction, ListRequest, Listing, RepositoryError,
};
use stepcart_admin::store::{InMemoryPageStore, PageStore};
use stepcart_core::{ConfiguratorDefinition, StepKind, ValidationError};
use stepcart_integration_tests::{gift_box, product};

fn repository() -> (DefinitionRepository, Arc<InMemoryPageStore>) {
    let store = Arc::new(InMemoryPageStore::new());
    (DefinitionRepository::new(store.clone()), store)
}

fn titles(listing: &Listing) -> Vec<String> {
    listing.items.iter().map(|s| s.title.clone()).collect()
}

#[tokio::test]
async fn test_publish_stores_rendered_document() {
    let (repo, store) = repository();
    let definition = gift_box();

    let published = repo.create(&definition).await.unwrap();
    assert_eq!(published.handle, "build-your-gift-box");

    let page = store.get_page(&published.id).await.unwrap().unwrap();
    assert_eq!(page.title, "Build Your Gift Box");
    assert!(page.body.contains("Step 1: Choose a Mug"));
    assert_eq!(extract_definition(&page.body).unwrap(), definition);
}

#[tokio::test]
async fn test_authoring_edits_round_trip_through_store() {
    let (repo, _) = repository();

    let mut draft = ConfiguratorDefinition::new("Holiday Box");
    draft.add_product(0, product(1, "Blue Mug", 1200)).unwrap();
    let card = draft.add_step();
    draft.set_step_kind(card, StepKind::Form).unwrap();
    draft.rename_step(card, "Step 2: Card").unwrap();
    draft.add_field(card).unwrap();

    let published = repo.create(&draft).await.unwrap();
    let mut stored = repo.get(&published.id).await.unwrap().definition;
    assert_eq!(stored, draft);

    stored.remove_field(card, 0).unwrap();
    stored.add_product(0, product(2, "Red Mug", 1200)).unwrap();
    repo.update(&published.id, &stored).await.unwrap();

    let reloaded = repo.get(&published.id).await.unwrap().definition;
    assert_eq!(reloaded.steps[0].items().len(), 2);
    assert_eq!(reloaded.steps[1].fields().len(), 1);
    assert_eq!(reloaded.steps[1].fields()[0].name, "field2");
}

#[tokio::test]
async fn test_invalid_definitions_never_reach_the_store() {
    let (repo, store) = repository();

    let mut no_title = gift_box();
    no_title.title = "  ".to_string();
    assert!(matches!(
        repo.create(&no_title).await,
        Err(RepositoryError::Validation(ValidationError::EmptyTitle))
    ));

    let mut duplicate = gift_box();
    duplicate.add_step();
    let last = duplicate.steps.len() - 1;
    duplicate.add_product(last, product(9, "Cookie", 300)).unwrap();
    if let stepcart_core::Step::Products(step) = &mut duplicate.steps[last] {
        step.items.push(product(9, "Cookie", 300));
    }
    assert!(matches!(
        repo.create(&duplicate).await,
        Err(RepositoryError::Validation(ValidationError::DuplicateProduct { .. }))
    ));

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_walk_all_pages_forward_then_back() {
    let (repo, _) = repository();
    let names: Vec<String> = (1..=25).map(|n| format!("Box {n:02}")).collect();
    for name in &names {
        let mut def = gift_box();
        def.title.clone_from(name);
        repo.create(&def).await.unwrap();
    }

    // Forward with the default page size of 10.
    let mut seen = Vec::new();
    let mut pages = Vec::new();
    let mut cursor = None;
    loop {
        let listing = repo
            .list(ListRequest {
                cursor: cursor.clone(),
                ..ListRequest::default()
            })
            .await
            .unwrap();
        seen.extend(titles(&listing));
        let more = listing.cursor.has_next_page;
        cursor.clone_from(&listing.cursor.next_cursor);
        pages.push(listing);
        if !more {
            break;
        }
    }
    assert_eq!(seen, names);
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[2].items.len(), 5);

    // Back from the last page.
    let back = repo
        .list(ListRequest {
            cursor: pages[2].cursor.prev_cursor.clone(),
            direction: Direction::Prev,
            ..ListRequest::default()
        })
        .await
        .unwrap();
    assert_eq!(titles(&back), titles(&pages[1]));
    assert!(back.cursor.has_previous_page);
}

#[tokio::test]
async fn test_cursor_direction_is_enforced() {
    let (repo, _) = repository();
    for n in 0..3 {
        let mut def = gift_box();
        def.title = format!("Box {n}");
        repo.create(&def).await.unwrap();
    }
    let first = repo
        .list(ListRequest {
            page_size: 1,
            ..ListRequest::default()
        })
        .await
        .unwrap();

    let wrong_way = repo
        .list(ListRequest {
            page_size: 1,
            cursor: first.cursor.next_cursor.clone(),
            direction: Direction::Prev,
        })
        .await;
    assert!(matches!(wrong_way, Err(RepositoryError::PaginationMisuse(_))));

    let foreign = repo
        .list(ListRequest {
            page_size: 1,
            cursor: Some("eyJsYXN0X2lkIjo0Mn0".to_string()),
            direction: Direction::Next,
        })
        .await;
    assert!(matches!(foreign, Err(RepositoryError::PaginationMisuse(_))));
}

#[tokio::test]
async fn test_delete_removes_from_listing() {
    let (repo, _) = repository();
    let a = repo.create(&gift_box()).await.unwrap();
    let b = repo.create(&gift_box()).await.unwrap();
    assert_ne!(a.handle, b.handle);

    repo.delete(&a.id).await.unwrap();
    let listing = repo.list(ListRequest::default()).await.unwrap();
    assert_eq!(listing.items.len(), 1);
    assert_eq!(listing.items[0].id, b.id);

    match repo.delete(&a.id).await {
        Err(RepositoryError::Upstream(errors)) => {
            assert_eq!(errors[0].code.as_deref(), Some("NOT_FOUND"));
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}
