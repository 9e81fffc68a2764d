//! Page storage seam.
//!
//! [`PageStore`] is the subset of the Admin API the definition repository
//! needs. [`AdminClient`] implements it against Shopify; [`InMemoryPageStore`]
//! implements it in memory with the same cursor and `userErrors` behavior for
//! tests and local previews.

use async_trait::async_trait;
use stepcart_core::PageId;
use tokio::sync::RwLock;

use crate::shopify::{
    AdminClient, AdminShopifyError, FieldError, Page, PageConnection, PageEdge, PageInfo,
    PageWindow,
};

/// Hosted document storage.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Create a published page.
    async fn create_page(&self, title: &str, body: &str) -> Result<Page, AdminShopifyError>;

    /// Overwrite a page's title and body.
    async fn update_page(
        &self,
        id: &PageId,
        title: &str,
        body: &str,
    ) -> Result<Page, AdminShopifyError>;

    /// Get a page, `None` if it does not exist.
    async fn get_page(&self, id: &PageId) -> Result<Option<Page>, AdminShopifyError>;

    /// List a window of pages.
    async fn list_pages(&self, window: PageWindow) -> Result<PageConnection, AdminShopifyError>;

    /// Delete a page and return its id.
    async fn delete_page(&self, id: &PageId) -> Result<PageId, AdminShopifyError>;
}

#[async_trait]
impl PageStore for AdminClient {
    async fn create_page(&self, title: &str, body: &str) -> Result<Page, AdminShopifyError> {
        Self::create_page(self, title, body).await
    }

    async fn update_page(
        &self,
        id: &PageId,
        title: &str,
        body: &str,
    ) -> Result<Page, AdminShopifyError> {
        Self::update_page(self, id, title, body).await
    }

    async fn get_page(&self, id: &PageId) -> Result<Option<Page>, AdminShopifyError> {
        Self::get_page(self, id).await
    }

    async fn list_pages(&self, window: PageWindow) -> Result<PageConnection, AdminShopifyError> {
        self.get_pages(window).await
    }

    async fn delete_page(&self, id: &PageId) -> Result<PageId, AdminShopifyError> {
        Self::delete_page(self, id).await
    }
}

// =============================================================================
// In-memory store
// =============================================================================

const FIRST_PAGE_ID: u64 = 108_828_000;

/// Page store kept in memory, in creation order.
///
/// Cursors are the numeric page id, handles are derived from the title and
/// made unique with a `-n` suffix, and missing pages are reported as
/// `NOT_FOUND` user errors, matching what the Admin API does.
#[derive(Debug, Default)]
pub struct InMemoryPageStore {
    state: RwLock<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    pages: Vec<Page>,
    created: u64,
}

impl InMemoryPageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored pages.
    pub async fn len(&self) -> usize {
        self.state.read().await.pages.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.pages.is_empty()
    }
}

fn not_found(id: &PageId) -> AdminShopifyError {
    AdminShopifyError::UserErrors(vec![FieldError {
        code: Some("NOT_FOUND".to_string()),
        field: vec!["id".to_string()],
        message: format!("Page {id} does not exist"),
    }])
}

fn blank_title() -> AdminShopifyError {
    AdminShopifyError::UserErrors(vec![FieldError {
        code: Some("BLANK".to_string()),
        field: vec!["page".to_string(), "title".to_string()],
        message: "Title can't be blank".to_string(),
    }])
}

/// Lowercase, dash-separated handle for a title.
fn slugify(title: &str) -> String {
    let mut handle = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            handle.extend(c.to_lowercase());
        } else if !handle.is_empty() && !handle.ends_with('-') {
            handle.push('-');
        }
    }
    let handle = handle.trim_end_matches('-');
    if handle.is_empty() {
        "page".to_string()
    } else {
        handle.to_string()
    }
}

fn cursor_of(page: &Page) -> String {
    page.id
        .numeric_id()
        .map_or_else(|| page.id.to_string(), |n| n.to_string())
}

impl MemoryState {
    fn unique_handle(&self, title: &str) -> String {
        let base = slugify(title);
        let taken = |candidate: &str| self.pages.iter().any(|p| p.handle == candidate);
        if !taken(&base) {
            return base;
        }
        (1..)
            .map(|n| format!("{base}-{n}"))
            .find(|candidate| !taken(candidate))
            .unwrap_or(base)
    }

    fn position_of_cursor(&self, cursor: &str) -> Result<usize, AdminShopifyError> {
        self.pages
            .iter()
            .position(|p| cursor_of(p) == cursor)
            .ok_or_else(|| {
                AdminShopifyError::GraphQL(vec![crate::shopify::GraphQLError {
                    message: format!("Invalid cursor: {cursor}"),
                    locations: vec![],
                    path: vec![serde_json::Value::String("pages".to_string())],
                }])
            })
    }
}

#[async_trait]
impl PageStore for InMemoryPageStore {
    async fn create_page(&self, title: &str, body: &str) -> Result<Page, AdminShopifyError> {
        if title.trim().is_empty() {
            return Err(blank_title());
        }
        let mut state = self.state.write().await;
        let id = PageId::from_numeric(FIRST_PAGE_ID + state.created);
        state.created += 1;
        let page = Page {
            id,
            title: title.to_string(),
            handle: state.unique_handle(title),
            body: body.to_string(),
        };
        state.pages.push(page.clone());
        Ok(page)
    }

    async fn update_page(
        &self,
        id: &PageId,
        title: &str,
        body: &str,
    ) -> Result<Page, AdminShopifyError> {
        if title.trim().is_empty() {
            return Err(blank_title());
        }
        let mut state = self.state.write().await;
        let page = state
            .pages
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| not_found(id))?;
        // Shopify keeps the handle when a page is renamed.
        page.title = title.to_string();
        page.body = body.to_string();
        Ok(page.clone())
    }

    async fn get_page(&self, id: &PageId) -> Result<Option<Page>, AdminShopifyError> {
        let state = self.state.read().await;
        Ok(state.pages.iter().find(|p| &p.id == id).cloned())
    }

    async fn list_pages(&self, window: PageWindow) -> Result<PageConnection, AdminShopifyError> {
        let state = self.state.read().await;
        let total = state.pages.len();

        let (start, end) = match window {
            PageWindow::Forward { first, after } => {
                let start = match after {
                    Some(cursor) => state.position_of_cursor(&cursor)? + 1,
                    None => 0,
                };
                let count = usize::try_from(first.max(0)).unwrap_or(usize::MAX);
                (start, start.saturating_add(count).min(total))
            }
            PageWindow::Backward { last, before } => {
                let end = match before {
                    Some(cursor) => state.position_of_cursor(&cursor)?,
                    None => total,
                };
                let count = usize::try_from(last.max(0)).unwrap_or(usize::MAX);
                (end.saturating_sub(count), end)
            }
        };

        let edges: Vec<PageEdge> = state
            .pages
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|page| PageEdge {
                cursor: cursor_of(page),
                node: page.summary(),
            })
            .collect();

        let page_info = PageInfo {
            has_next_page: end < total,
            has_previous_page: start > 0,
            start_cursor: edges.first().map(|e| e.cursor.clone()),
            end_cursor: edges.last().map(|e| e.cursor.clone()),
        };

        Ok(PageConnection { edges, page_info })
    }

    async fn delete_page(&self, id: &PageId) -> Result<PageId, AdminShopifyError> {
        let mut state = self.state.write().await;
        let position = state
            .pages
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| not_found(id))?;
        Ok(state.pages.remove(position).id)
    }
}
