//! Definition repository.
//!
//! Configurators are stored as online store pages: the page title is the
//! configurator title and the page body is the rendered document, which
//! embeds the definition. The repository validates definitions before any
//! request is sent and hands out direction-bound listing cursors.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use stepcart_core::{ConfiguratorDefinition, PageId, ValidationError};
use thiserror::Error;
use tracing::instrument;

use crate::render::{RenderError, extract_definition, render_document};
use crate::shopify::{AdminShopifyError, FieldError, PageInfo, PageSummary, PageWindow};
use crate::store::PageStore;

/// Page size used when a listing request does not name one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size the Admin API accepts.
pub const MAX_PAGE_SIZE: i64 = 250;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The definition breaks a model invariant. Nothing was sent.
    #[error("invalid definition: {0}")]
    Validation(#[from] ValidationError),

    /// The page store reported field errors.
    #[error("upstream rejected the request: {}", format_field_errors(.0))]
    Upstream(Vec<FieldError>),

    /// A cursor was used with the wrong direction, or is not one of ours.
    #[error("pagination misuse: {0}")]
    PaginationMisuse(String),

    /// The stored page is not a configurator document.
    #[error("page {id} is not a configurator document: {source}")]
    MalformedDocument {
        /// Page that failed to parse.
        id: PageId,
        /// Why extraction failed.
        #[source]
        source: RenderError,
    },

    /// Rendering a definition failed.
    #[error("render failed: {0}")]
    Render(#[source] RenderError),

    /// No page with this id.
    #[error("configurator not found: {0}")]
    NotFound(PageId),

    /// Transport or GraphQL failure.
    #[error(transparent)]
    Shopify(AdminShopifyError),
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<AdminShopifyError> for RepositoryError {
    fn from(err: AdminShopifyError) -> Self {
        match err {
            AdminShopifyError::UserErrors(errors) => Self::Upstream(errors),
            other => Self::Shopify(other),
        }
    }
}

/// Which way to walk from a cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Pages after the cursor.
    #[default]
    Next,
    /// Pages before the cursor.
    Prev,
}

impl Direction {
    const fn tag(self) -> &'static str {
        match self {
            Self::Next => "n",
            Self::Prev => "p",
        }
    }
}

/// Encode a store cursor so it can only be used in `direction`.
#[must_use]
pub fn encode_cursor(direction: Direction, raw: &str) -> String {
    URL_SAFE_NO_PAD.encode(format!("{}:{raw}", direction.tag()))
}

/// Decode a cursor issued by [`encode_cursor`], checking its direction.
///
/// # Errors
///
/// Returns `PaginationMisuse` if the cursor is not ours or was issued for the
/// other direction.
pub fn decode_cursor(direction: Direction, cursor: &str) -> Result<String, RepositoryError> {
    let misuse = || RepositoryError::PaginationMisuse(format!("unrecognized cursor {cursor:?}"));
    let bytes = URL_SAFE_NO_PAD.decode(cursor).map_err(|_| misuse())?;
    let text = String::from_utf8(bytes).map_err(|_| misuse())?;
    let (tag, raw) = text.split_once(':').ok_or_else(misuse)?;
    if tag == direction.tag() {
        Ok(raw.to_string())
    } else if tag == Direction::Next.tag() || tag == Direction::Prev.tag() {
        Err(RepositoryError::PaginationMisuse(format!(
            "cursor was issued for the other direction than {direction:?}"
        )))
    } else {
        Err(misuse())
    }
}

/// A listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub page_size: i64,
    pub cursor: Option<String>,
    pub direction: Direction,
}

impl Default for ListRequest {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            cursor: None,
            direction: Direction::Next,
        }
    }
}

/// Cursors for the neighbouring pages of a listing.
///
/// `next_cursor` is only valid with [`Direction::Next`], `prev_cursor` only
/// with [`Direction::Prev`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingCursor {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub next_cursor: Option<String>,
    pub prev_cursor: Option<String>,
}

impl ListingCursor {
    fn from_page_info(info: &PageInfo) -> Self {
        Self {
            has_next_page: info.has_next_page,
            has_previous_page: info.has_previous_page,
            next_cursor: info
                .end_cursor
                .as_deref()
                .map(|c| encode_cursor(Direction::Next, c)),
            prev_cursor: info
                .start_cursor
                .as_deref()
                .map(|c| encode_cursor(Direction::Prev, c)),
        }
    }
}

/// One page of configurator summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub items: Vec<PageSummary>,
    pub cursor: ListingCursor,
}

/// Result of a create or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Published {
    pub id: PageId,
    pub handle: String,
}

/// A stored configurator with its recovered definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredConfigurator {
    pub id: PageId,
    pub handle: String,
    pub definition: ConfiguratorDefinition,
}

/// Configurator CRUD over a page store.
#[derive(Clone)]
pub struct DefinitionRepository {
    store: Arc<dyn PageStore>,
}

impl DefinitionRepository {
    #[must_use]
    pub fn new(store: Arc<dyn PageStore>) -> Self {
        Self { store }
    }

    /// Validate, render and publish a new configurator.
    ///
    /// # Errors
    ///
    /// `Validation` before any request; `Upstream` for store field errors.
    #[instrument(skip(self, definition), fields(title = %definition.title))]
    pub async fn create(
        &self,
        definition: &ConfiguratorDefinition,
    ) -> Result<Published, RepositoryError> {
        definition.validate()?;
        let body = render_document(definition).map_err(RepositoryError::Render)?;
        let page = self.store.create_page(&definition.title, &body).await?;
        tracing::info!(page_id = %page.id, handle = %page.handle, "Configurator published");
        Ok(Published {
            id: page.id,
            handle: page.handle,
        })
    }

    /// List one page of configurators.
    ///
    /// # Errors
    ///
    /// `PaginationMisuse` for a foreign or wrong-direction cursor, before any
    /// request is sent.
    #[instrument(skip(self), fields(direction = ?request.direction, cursor = ?request.cursor))]
    pub async fn list(&self, request: ListRequest) -> Result<Listing, RepositoryError> {
        if !(1..=MAX_PAGE_SIZE).contains(&request.page_size) {
            return Err(RepositoryError::PaginationMisuse(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                request.page_size
            )));
        }
        let raw = request
            .cursor
            .as_deref()
            .map(|c| decode_cursor(request.direction, c))
            .transpose()?;

        let window = match request.direction {
            Direction::Next => PageWindow::Forward {
                first: request.page_size,
                after: raw,
            },
            Direction::Prev => PageWindow::Backward {
                last: request.page_size,
                before: raw,
            },
        };

        let connection = self.store.list_pages(window).await?;
        tracing::debug!(count = connection.edges.len(), "Listed configurators");

        Ok(Listing {
            cursor: ListingCursor::from_page_info(&connection.page_info),
            items: connection.edges.into_iter().map(|e| e.node).collect(),
        })
    }

    /// Load a configurator and recover its definition.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id; `MalformedDocument` when the page body
    /// carries no readable definition.
    #[instrument(skip(self), fields(page_id = %id))]
    pub async fn get(&self, id: &PageId) -> Result<StoredConfigurator, RepositoryError> {
        let page = self
            .store
            .get_page(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))?;
        let definition =
            extract_definition(&page.body).map_err(|source| RepositoryError::MalformedDocument {
                id: page.id.clone(),
                source,
            })?;
        Ok(StoredConfigurator {
            id: page.id,
            handle: page.handle,
            definition,
        })
    }

    /// Overwrite a configurator with a new definition. Last write wins.
    ///
    /// # Errors
    ///
    /// Same as [`create`](Self::create); an unknown id is an `Upstream` error.
    #[instrument(skip(self, definition), fields(page_id = %id, title = %definition.title))]
    pub async fn update(
        &self,
        id: &PageId,
        definition: &ConfiguratorDefinition,
    ) -> Result<Published, RepositoryError> {
        definition.validate()?;
        let body = render_document(definition).map_err(RepositoryError::Render)?;
        let page = self
            .store
            .update_page(id, &definition.title, &body)
            .await?;
        tracing::info!(page_id = %page.id, "Configurator updated");
        Ok(Published {
            id: page.id,
            handle: page.handle,
        })
    }

    /// Delete a configurator and return its id.
    ///
    /// # Errors
    ///
    /// An unknown id is an `Upstream` error.
    #[instrument(skip(self), fields(page_id = %id))]
    pub async fn delete(&self, id: &PageId) -> Result<PageId, RepositoryError> {
        let deleted = self.store.delete_page(id).await?;
        tracing::info!(page_id = %deleted, "Configurator deleted");
        Ok(deleted)
    }
}

impl std::fmt::Debug for DefinitionRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefinitionRepository").finish_non_exhaustive()
    }
}
