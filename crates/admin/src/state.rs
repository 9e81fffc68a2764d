//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::repository::DefinitionRepository;
use crate::store::PageStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    repository: DefinitionRepository,
    catalog: Arc<dyn Catalog>,
    catalog_page_size: i64,
}

impl AppState {
    /// Build state over a page store and a catalog.
    ///
    /// In production both are the same `AdminClient`; tests pass in-memory
    /// stand-ins.
    #[must_use]
    pub fn new(
        pages: Arc<dyn PageStore>,
        catalog: Arc<dyn Catalog>,
        catalog_page_size: i64,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                repository: DefinitionRepository::new(pages),
                catalog,
                catalog_page_size,
            }),
        }
    }

    #[must_use]
    pub fn repository(&self) -> &DefinitionRepository {
        &self.inner.repository
    }

    #[must_use]
    pub fn catalog(&self) -> &dyn Catalog {
        self.inner.catalog.as_ref()
    }

    /// Products fetched when a catalog request does not say how many.
    #[must_use]
    pub fn catalog_page_size(&self) -> i64 {
        self.inner.catalog_page_size
    }
}
