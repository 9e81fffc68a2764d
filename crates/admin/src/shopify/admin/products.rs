//! Catalog reads for the configurator builder's product picker.

use std::sync::Arc;

use stepcart_core::ProductRef;
use tracing::{debug, instrument};

use super::{
    AdminClient, AdminShopifyError,
    conversions::convert_catalog_product,
    queries::{GetProducts, get_products},
};

impl AdminClient {
    /// Get the first `first` catalog products with up to ten variants each.
    ///
    /// Results are cached for five minutes per page size.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or a variant price is not a
    /// decimal amount.
    #[instrument(skip(self))]
    pub async fn get_catalog(&self, first: i64) -> Result<Arc<Vec<ProductRef>>, AdminShopifyError> {
        if let Some(products) = self.inner.catalog.get(&first).await {
            debug!("Cache hit for catalog");
            return Ok(products);
        }

        let variables = get_products::Variables { first, query: None };
        let response = self.execute::<GetProducts>(variables).await?;

        let products: Arc<Vec<ProductRef>> = Arc::new(
            response
                .products
                .edges
                .into_iter()
                .map(|edge| convert_catalog_product(edge.node))
                .collect::<Result<_, _>>()?,
        );

        self.inner.catalog.insert(first, Arc::clone(&products)).await;

        Ok(products)
    }
}
