//! GraphQL operations for the Shopify Admin API.
//!
//! Each operation implements `graphql_client::GraphQLQuery` and keeps its
//! variables and response shapes in a module named after the operation, the
//! same layout `#[derive(GraphQLQuery)]` generates.

use graphql_client::{GraphQLQuery, QueryBody};

// =============================================================================
// Custom scalar type aliases
// =============================================================================

/// Money amount as decimal string.
type Money = String;

/// URL string.
#[allow(clippy::upper_case_acronyms)]
type URL = String;

/// HTML string.
#[allow(clippy::upper_case_acronyms)]
type HTML = String;

/// Global ID string.
#[allow(clippy::upper_case_acronyms)]
type ID = String;

/// Implement `GraphQLQuery` for an operation whose shapes live in `$module`.
macro_rules! operation {
    ($name:ident, $module:ident, $document:expr) => {
        pub struct $name;

        impl GraphQLQuery for $name {
            type Variables = $module::Variables;
            type ResponseData = $module::ResponseData;

            fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
                QueryBody {
                    variables,
                    query: $document,
                    operation_name: stringify!($name),
                }
            }
        }
    };
}

/// Selection shared by every mutation returning `userErrors`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct UserError {
    pub code: Option<String>,
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

// =============================================================================
// Page mutations and queries
// =============================================================================

operation!(
    PageCreate,
    page_create,
    r"mutation PageCreate($page: PageCreateInput!) {
  pageCreate(page: $page) {
    page { id title handle body }
    userErrors { code field message }
  }
}"
);

pub mod page_create {
    use serde::{Deserialize, Serialize};

    use super::{HTML, ID, UserError};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PageCreateInput {
        pub title: String,
        pub body: HTML,
        pub is_published: bool,
        pub template_suffix: Option<String>,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub page: PageCreateInput,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub page_create: Option<PageCreatePayload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PageCreatePayload {
        pub page: Option<PageCreatePage>,
        pub user_errors: Vec<UserError>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct PageCreatePage {
        pub id: ID,
        pub title: String,
        pub handle: String,
        pub body: HTML,
    }
}

operation!(
    PageUpdate,
    page_update,
    r"mutation PageUpdate($id: ID!, $page: PageUpdateInput!) {
  pageUpdate(id: $id, page: $page) {
    page { id title handle body }
    userErrors { code field message }
  }
}"
);

pub mod page_update {
    use serde::{Deserialize, Serialize};

    use super::{HTML, ID, UserError};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PageUpdateInput {
        pub title: String,
        pub body: HTML,
        pub is_published: bool,
        pub template_suffix: Option<String>,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub id: ID,
        pub page: PageUpdateInput,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub page_update: Option<PageUpdatePayload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PageUpdatePayload {
        pub page: Option<PageUpdatePage>,
        pub user_errors: Vec<UserError>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct PageUpdatePage {
        pub id: ID,
        pub title: String,
        pub handle: String,
        pub body: HTML,
    }
}

operation!(
    PageDelete,
    page_delete,
    r"mutation PageDelete($id: ID!) {
  pageDelete(id: $id) {
    deletedPageId
    userErrors { code field message }
  }
}"
);

pub mod page_delete {
    use serde::{Deserialize, Serialize};

    use super::{ID, UserError};

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub id: ID,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub page_delete: Option<PageDeletePayload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PageDeletePayload {
        pub deleted_page_id: Option<ID>,
        pub user_errors: Vec<UserError>,
    }
}

operation!(
    GetPage,
    get_page,
    r"query GetPage($id: ID!) {
  page(id: $id) { id title handle body }
}"
);

pub mod get_page {
    use serde::{Deserialize, Serialize};

    use super::{HTML, ID};

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub id: ID,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub page: Option<GetPagePage>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct GetPagePage {
        pub id: ID,
        pub title: String,
        pub handle: String,
        pub body: HTML,
    }
}

operation!(
    GetPages,
    get_pages,
    r"query GetPages($first: Int, $after: String, $last: Int, $before: String) {
  pages(first: $first, after: $after, last: $last, before: $before) {
    edges { cursor node { id title handle } }
    pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
  }
}"
);

pub mod get_pages {
    use serde::{Deserialize, Serialize};

    use super::ID;

    /// Only one direction is ever populated; absent fields are omitted so the
    /// request never carries both `after` and `before`.
    #[derive(Debug, Clone, Default, Serialize)]
    pub struct Variables {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub first: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub after: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub last: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub before: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub pages: GetPagesPages,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GetPagesPages {
        pub edges: Vec<GetPagesEdge>,
        pub page_info: GetPagesPageInfo,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct GetPagesEdge {
        pub cursor: String,
        pub node: GetPagesNode,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct GetPagesNode {
        pub id: ID,
        pub title: String,
        pub handle: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GetPagesPageInfo {
        pub has_next_page: bool,
        pub has_previous_page: bool,
        pub start_cursor: Option<String>,
        pub end_cursor: Option<String>,
    }
}

// =============================================================================
// Catalog queries
// =============================================================================

operation!(
    GetProducts,
    get_products,
    r"query GetProducts($first: Int!, $query: String) {
  products(first: $first, query: $query) {
    edges {
      node {
        id
        title
        description
        featuredImage { url }
        variants(first: 10) {
          edges { node { id price compareAtPrice sku inventoryQuantity } }
        }
      }
    }
  }
}"
);

pub mod get_products {
    use serde::{Deserialize, Serialize};

    use super::{ID, Money, URL};

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
        pub query: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: GetProductsProducts,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct GetProductsProducts {
        pub edges: Vec<GetProductsEdge>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct GetProductsEdge {
        pub node: GetProductsNode,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GetProductsNode {
        pub id: ID,
        pub title: String,
        #[serde(default)]
        pub description: String,
        pub featured_image: Option<GetProductsImage>,
        pub variants: GetProductsVariants,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct GetProductsImage {
        pub url: URL,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct GetProductsVariants {
        pub edges: Vec<GetProductsVariantEdge>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct GetProductsVariantEdge {
        pub node: GetProductsVariant,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GetProductsVariant {
        pub id: ID,
        pub price: Money,
        pub compare_at_price: Option<Money>,
        pub sku: Option<String>,
        pub inventory_quantity: Option<i64>,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_sets_operation_name() {
        let body = GetPage::build_query(get_page::Variables {
            id: "gid://shopify/Page/1".to_string(),
        });
        assert_eq!(body.operation_name, "GetPage");
        assert!(body.query.starts_with("query GetPage"));
    }

    #[test]
    fn test_page_window_variables_omit_other_direction() {
        let variables = get_pages::Variables {
            last: Some(10),
            before: Some("abc".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&variables).unwrap();
        assert_eq!(json, serde_json::json!({"last": 10, "before": "abc"}));
    }

    #[test]
    fn test_page_create_input_is_camel_case() {
        let variables = page_create::Variables {
            page: page_create::PageCreateInput {
                title: "Bundle".to_string(),
                body: "<div></div>".to_string(),
                is_published: true,
                template_suffix: Some("custom".to_string()),
            },
        };
        let json = serde_json::to_value(&variables).unwrap();
        assert_eq!(json["page"]["isPublished"], true);
        assert_eq!(json["page"]["templateSuffix"], "custom");
    }

    #[test]
    fn test_page_delete_response() {
        let data: page_delete::ResponseData = serde_json::from_str(
            r#"{"pageDelete":{"deletedPageId":null,"userErrors":[{"code":"NOT_FOUND","field":["id"],"message":"Page does not exist"}]}}"#,
        )
        .unwrap();
        let payload = data.page_delete.unwrap();
        assert!(payload.deleted_page_id.is_none());
        assert_eq!(payload.user_errors[0].code.as_deref(), Some("NOT_FOUND"));
    }
}
