//! Configurator management against the live store.
//!
//! # Usage
//!
//! ```bash
//! stepcart configurators list --page-size 20
//! stepcart configurators list --cursor <nextCursor> --direction next
//! stepcart configurators show 108828000
//! stepcart configurators publish gift-box.json
//! stepcart configurators update 108828000 gift-box.json
//! stepcart configurators delete 108828000
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPIFY_STORE` - Store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_ADMIN_ACCESS_TOKEN` - Admin API access token
//! - `SHOPIFY_API_VERSION` - API version (default: 2026-01)

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use stepcart_admin::config::ShopifyAdminConfig;
use stepcart_admin::repository::{DefinitionRepository, Direction, ListRequest};
use stepcart_admin::shopify::AdminClient;
use stepcart_core::PageId;
use tracing::info;

use super::{CliError, definition};

/// Build a repository backed by the Admin API.
///
/// # Errors
///
/// Returns `Config` for missing or placeholder credentials.
pub fn repository_from_env() -> Result<DefinitionRepository, CliError> {
    dotenvy::dotenv().ok();
    let config = ShopifyAdminConfig::from_env()?;
    info!(store = %config.store, "Connecting to Shopify Admin API");
    let client = AdminClient::new(&config)?;
    Ok(DefinitionRepository::new(Arc::new(client)))
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// List one page of configurators.
///
/// # Errors
///
/// Returns `Repository` for a misused cursor or an upstream failure.
pub async fn list(
    repository: &DefinitionRepository,
    request: ListRequest,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let listing = repository.list(request).await?;
    write_json(out, &listing)
}

/// Print a configurator with its definition.
///
/// # Errors
///
/// Returns `Repository` for an unknown id or a page that is not a
/// configurator.
pub async fn show(
    repository: &DefinitionRepository,
    id: u64,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let stored = repository.get(&PageId::from_numeric(id)).await?;
    write_json(out, &stored)
}

/// Publish a definition file as a new configurator.
///
/// # Errors
///
/// Returns `Validation` before any request for an invalid definition.
pub async fn publish(
    repository: &DefinitionRepository,
    path: &Path,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let definition = definition::load_valid(path)?;
    let published = repository.create(&definition).await?;
    write_json(out, &published)
}

/// Overwrite a configurator with a definition file.
///
/// # Errors
///
/// Returns `Validation` before any request for an invalid definition.
pub async fn update(
    repository: &DefinitionRepository,
    id: u64,
    path: &Path,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let definition = definition::load_valid(path)?;
    let published = repository
        .update(&PageId::from_numeric(id), &definition)
        .await?;
    write_json(out, &published)
}

/// Delete a configurator.
///
/// # Errors
///
/// Returns `Repository` for an unknown id.
pub async fn delete(
    repository: &DefinitionRepository,
    id: u64,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let deleted = repository.delete(&PageId::from_numeric(id)).await?;
    writeln!(out, "deleted {deleted}")?;
    Ok(())
}

/// Convert CLI listing arguments into a request.
#[must_use]
pub fn list_request(cursor: Option<String>, direction: Direction, page_size: i64) -> ListRequest {
    ListRequest {
        page_size,
        cursor,
        direction,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use stepcart_admin::store::InMemoryPageStore;
    use stepcart_core::ConfiguratorDefinition;

    use super::*;

    fn repository() -> DefinitionRepository {
        DefinitionRepository::new(Arc::new(InMemoryPageStore::new()))
    }

    #[tokio::test]
    async fn test_show_and_delete_print_results() {
        let repo = repository();
        let published = repo
            .create(&ConfiguratorDefinition::new("Gift Box"))
            .await
            .unwrap();
        let id = published.id.numeric_id().unwrap();

        let mut out = Vec::new();
        show(&repo, id, &mut out).await.unwrap();
        let shown: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(shown["definition"]["title"], "Gift Box");

        let mut out = Vec::new();
        delete(&repo, id, &mut out).await.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("deleted {}\n", published.id)
        );
    }

    #[tokio::test]
    async fn test_list_prints_cursor() {
        let repo = repository();
        for title in ["a", "b"] {
            repo.create(&ConfiguratorDefinition::new(title)).await.unwrap();
        }
        let mut out = Vec::new();
        list(&repo, list_request(None, Direction::Next, 1), &mut out)
            .await
            .unwrap();
        let listing: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(listing["cursor"]["hasNextPage"], true);
        assert!(listing["cursor"]["nextCursor"].is_string());
    }
}
