//! Domain types for Shopify Admin API.
//!
//! These types provide a clean, ergonomic API separate from the raw
//! GraphQL response shapes in `admin::queries`.

use std::fmt;

use serde::{Deserialize, Serialize};
use stepcart_core::PageId;

// =============================================================================
// Error Types
// =============================================================================

/// A `userErrors` entry returned by a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Machine-readable error code (e.g., `NOT_FOUND`, `TAKEN`).
    pub code: Option<String>,
    /// Path to the offending input field.
    pub field: Vec<String>,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.field.join("."), self.message)
        }
    }
}

// =============================================================================
// Page Types
// =============================================================================

/// An online store page, including its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page ID (`gid://shopify/Page/...`).
    pub id: PageId,
    /// Page title.
    pub title: String,
    /// URL handle (`/pages/{handle}`).
    pub handle: String,
    /// HTML body.
    pub body: String,
}

impl Page {
    /// Summary without the body.
    #[must_use]
    pub fn summary(&self) -> PageSummary {
        PageSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            handle: self.handle.clone(),
        }
    }
}

/// An online store page as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    /// Page ID (`gid://shopify/Page/...`).
    pub id: PageId,
    /// Page title.
    pub title: String,
    /// URL handle.
    pub handle: String,
}

/// One page in a listing together with its cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEdge {
    /// Opaque cursor positioned at this page.
    pub cursor: String,
    /// The page itself.
    pub node: PageSummary,
}

/// A window of pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConnection {
    /// Pages in this window.
    pub edges: Vec<PageEdge>,
    /// Pagination info.
    pub page_info: PageInfo,
}

/// Which window of pages to request.
///
/// Forward and backward parameters are mutually exclusive; the enum makes it
/// impossible to send `first`/`after` together with `last`/`before`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageWindow {
    /// `first: n, after: cursor`
    Forward {
        /// Number of pages to return.
        first: i64,
        /// Start after this cursor (`None` for the beginning).
        after: Option<String>,
    },
    /// `last: n, before: cursor`
    Backward {
        /// Number of pages to return.
        last: i64,
        /// End before this cursor (`None` for the end).
        before: Option<String>,
    },
}

// =============================================================================
// Pagination Types
// =============================================================================

/// Pagination information for connections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Whether there are items before this page.
    pub has_previous_page: bool,
    /// Cursor for the first item.
    pub start_cursor: Option<String>,
    /// Cursor for the last item.
    pub end_cursor: Option<String>,
}
