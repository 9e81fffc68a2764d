//! Conversions from GraphQL response shapes to domain types.

use rust_decimal::Decimal;
use stepcart_core::{PageId, ProductId, ProductRef, Variant, VariantId};

use super::queries::{UserError, get_pages, get_products};
use crate::shopify::AdminShopifyError;
use crate::shopify::types::{FieldError, PageConnection, PageEdge, PageInfo, PageSummary};

/// Image shown for catalog products without a featured image.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/200x250?text=No+Image";

pub fn convert_user_errors(errors: Vec<UserError>) -> Vec<FieldError> {
    errors
        .into_iter()
        .map(|e| FieldError {
            code: e.code,
            field: e.field.unwrap_or_default(),
            message: e.message,
        })
        .collect()
}

pub fn convert_page_connection(pages: get_pages::GetPagesPages) -> PageConnection {
    PageConnection {
        edges: pages
            .edges
            .into_iter()
            .map(|edge| PageEdge {
                cursor: edge.cursor,
                node: PageSummary {
                    id: PageId::new(edge.node.id),
                    title: edge.node.title,
                    handle: edge.node.handle,
                },
            })
            .collect(),
        page_info: PageInfo {
            has_next_page: pages.page_info.has_next_page,
            has_previous_page: pages.page_info.has_previous_page,
            start_cursor: pages.page_info.start_cursor,
            end_cursor: pages.page_info.end_cursor,
        },
    }
}

fn parse_money(amount: &str) -> Result<Decimal, AdminShopifyError> {
    amount.parse().map_err(|e| {
        tracing::warn!(amount, error = %e, "Unparseable money amount from Shopify");
        AdminShopifyError::InvalidMoney(amount.to_string())
    })
}

/// Convert a catalog node, failing if any variant carries an unreadable price.
pub fn convert_catalog_product(
    node: get_products::GetProductsNode,
) -> Result<ProductRef, AdminShopifyError> {
    let variants = node
        .variants
        .edges
        .into_iter()
        .map(|edge| {
            let v = edge.node;
            Ok(Variant {
                id: VariantId::new(v.id),
                price: parse_money(&v.price)?,
                compare_at_price: v.compare_at_price.as_deref().map(parse_money).transpose()?,
                sku: v.sku.filter(|sku| !sku.is_empty()),
                inventory_quantity: v.inventory_quantity,
            })
        })
        .collect::<Result<Vec<_>, AdminShopifyError>>()?;

    Ok(ProductRef {
        id: ProductId::new(node.id),
        title: node.title,
        description: node.description,
        image_url: node
            .featured_image
            .map_or_else(|| PLACEHOLDER_IMAGE_URL.to_string(), |image| image.url),
        variants,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn node(json: &str) -> get_products::GetProductsNode {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_catalog_product_without_image_uses_placeholder() {
        let product = convert_catalog_product(node(
            r#"{"id":"gid://shopify/Product/1","title":"Tea","featuredImage":null,"variants":{"edges":[]}}"#,
        ))
        .unwrap();
        assert_eq!(product.image_url, PLACEHOLDER_IMAGE_URL);
        assert_eq!(product.description, "");
        assert_eq!(product.price(), Decimal::ZERO);
    }

    #[test]
    fn test_catalog_product_variants() {
        let product = convert_catalog_product(node(
            r#"{
                "id": "gid://shopify/Product/1",
                "title": "Tea",
                "description": "Green",
                "featuredImage": {"url": "https://cdn.example/tea.png"},
                "variants": {"edges": [{"node": {
                    "id": "gid://shopify/ProductVariant/11",
                    "price": "4.50",
                    "compareAtPrice": "6.00",
                    "sku": "",
                    "inventoryQuantity": 0
                }}]}
            }"#,
        ))
        .unwrap();
        assert_eq!(product.price(), Decimal::new(450, 2));
        let variant = &product.variants[0];
        assert_eq!(variant.compare_at_price, Some(Decimal::new(600, 2)));
        assert_eq!(variant.sku, None);
        assert!(product.is_sold_out());
        assert_eq!(product.variant_id().and_then(VariantId::numeric_id), Some(11));
    }

    #[test]
    fn test_unparseable_price_is_an_error() {
        let variant = |price: &str, compare_at: &str| {
            node(&format!(
                r#"{{
                    "id": "gid://shopify/Product/1",
                    "title": "Tea",
                    "featuredImage": null,
                    "variants": {{"edges": [{{"node": {{
                        "id": "gid://shopify/ProductVariant/11",
                        "price": {price},
                        "compareAtPrice": {compare_at},
                        "sku": null,
                        "inventoryQuantity": 5
                    }}}}]}}
                }}"#
            ))
        };

        let err = convert_catalog_product(variant(r#""4,50""#, "null")).unwrap_err();
        assert!(matches!(err, AdminShopifyError::InvalidMoney(ref amount) if amount == "4,50"));

        let err = convert_catalog_product(variant(r#""4.50""#, r#""""#)).unwrap_err();
        assert!(matches!(err, AdminShopifyError::InvalidMoney(ref amount) if amount.is_empty()));
    }

    #[test]
    fn test_user_errors_default_field() {
        let errors = convert_user_errors(vec![UserError {
            code: None,
            field: None,
            message: "Title can't be blank".to_string(),
        }]);
        assert!(errors[0].field.is_empty());
    }
}
