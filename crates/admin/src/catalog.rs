//! Catalog source for the product picker.

use std::sync::Arc;

use async_trait::async_trait;
use stepcart_core::ProductRef;

use crate::shopify::{AdminClient, AdminShopifyError};

/// Where catalog products come from.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// The first `first` products of the catalog.
    async fn products(&self, first: i64) -> Result<Arc<Vec<ProductRef>>, AdminShopifyError>;
}

#[async_trait]
impl Catalog for AdminClient {
    async fn products(&self, first: i64) -> Result<Arc<Vec<ProductRef>>, AdminShopifyError> {
        self.get_catalog(first).await
    }
}

/// A fixed list of products.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Arc<Vec<ProductRef>>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new(products: Vec<ProductRef>) -> Self {
        Self {
            products: Arc::new(products),
        }
    }
}

#[async_trait]
impl Catalog for StaticCatalog {
    async fn products(&self, first: i64) -> Result<Arc<Vec<ProductRef>>, AdminShopifyError> {
        let limit = usize::try_from(first.max(0)).unwrap_or(usize::MAX);
        if limit >= self.products.len() {
            return Ok(Arc::clone(&self.products));
        }
        Ok(Arc::new(self.products.iter().take(limit).cloned().collect()))
    }
}

/// Products whose title contains `query`, ignoring case. A blank query
/// matches everything.
#[must_use]
pub fn search_products(products: &[ProductRef], query: &str) -> Vec<ProductRef> {
    let needle = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| needle.is_empty() || p.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use stepcart_core::ProductId;

    use super::*;

    fn product(id: u64, title: &str) -> ProductRef {
        ProductRef {
            id: ProductId::from_numeric(id),
            title: title.to_string(),
            description: String::new(),
            image_url: String::new(),
            variants: vec![],
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let products = vec![product(1, "Green Tea"), product(2, "Black Coffee")];
        let found = search_products(&products, "TEA");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Green Tea");
    }

    #[test]
    fn test_blank_search_matches_all() {
        let products = vec![product(1, "Green Tea"), product(2, "Black Coffee")];
        assert_eq!(search_products(&products, "  ").len(), 2);
    }

    #[tokio::test]
    async fn test_static_catalog_limits() {
        let catalog = StaticCatalog::new(vec![product(1, "a"), product(2, "b"), product(3, "c")]);
        assert_eq!(catalog.products(2).await.unwrap().len(), 2);
        assert_eq!(catalog.products(50).await.unwrap().len(), 3);
    }
}
