//! Online store page operations for the Admin API.

use stepcart_core::PageId;
use tracing::instrument;

use super::{
    AdminClient, AdminShopifyError,
    conversions::{convert_page_connection, convert_user_errors},
    queries::{
        GetPage, GetPages, PageCreate, PageDelete, PageUpdate, get_page, get_pages, page_create,
        page_delete, page_update,
    },
};
use crate::shopify::types::{Page, PageConnection, PageWindow};

/// Theme template suffix configurator pages are rendered with
/// (`templates/page.custom.liquid`).
pub const PAGE_TEMPLATE_SUFFIX: &str = "custom";

impl AdminClient {
    /// Create a published page.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` when Shopify rejects the input, or any transport
    /// or GraphQL error.
    #[instrument(skip(self, body), fields(body_len = body.len()))]
    pub async fn create_page(&self, title: &str, body: &str) -> Result<Page, AdminShopifyError> {
        let variables = page_create::Variables {
            page: page_create::PageCreateInput {
                title: title.to_string(),
                body: body.to_string(),
                is_published: true,
                template_suffix: Some(PAGE_TEMPLATE_SUFFIX.to_string()),
            },
        };

        let payload = self
            .execute::<PageCreate>(variables)
            .await?
            .page_create
            .ok_or_else(|| AdminShopifyError::NotFound("pageCreate payload".to_string()))?;

        if !payload.user_errors.is_empty() {
            return Err(AdminShopifyError::UserErrors(convert_user_errors(
                payload.user_errors,
            )));
        }

        let page = payload
            .page
            .ok_or_else(|| AdminShopifyError::NotFound("created page".to_string()))?;

        tracing::info!(page_id = %page.id, handle = %page.handle, "Page created");

        Ok(Page {
            id: PageId::new(page.id),
            title: page.title,
            handle: page.handle,
            body: page.body,
        })
    }

    /// Overwrite a page's title and body.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` when the page does not exist or the input is
    /// rejected, or any transport or GraphQL error.
    #[instrument(skip(self, body), fields(page_id = %id, body_len = body.len()))]
    pub async fn update_page(
        &self,
        id: &PageId,
        title: &str,
        body: &str,
    ) -> Result<Page, AdminShopifyError> {
        let variables = page_update::Variables {
            id: id.to_string(),
            page: page_update::PageUpdateInput {
                title: title.to_string(),
                body: body.to_string(),
                is_published: true,
                template_suffix: Some(PAGE_TEMPLATE_SUFFIX.to_string()),
            },
        };

        let payload = self
            .execute::<PageUpdate>(variables)
            .await?
            .page_update
            .ok_or_else(|| AdminShopifyError::NotFound(format!("pageUpdate payload for {id}")))?;

        if !payload.user_errors.is_empty() {
            return Err(AdminShopifyError::UserErrors(convert_user_errors(
                payload.user_errors,
            )));
        }

        let page = payload
            .page
            .ok_or_else(|| AdminShopifyError::NotFound(id.to_string()))?;

        Ok(Page {
            id: PageId::new(page.id),
            title: page.title,
            handle: page.handle,
            body: page.body,
        })
    }

    /// Get a page with its body.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(page_id = %id))]
    pub async fn get_page(&self, id: &PageId) -> Result<Option<Page>, AdminShopifyError> {
        let variables = get_page::Variables { id: id.to_string() };

        let response = self.execute::<GetPage>(variables).await?;

        Ok(response.page.map(|page| Page {
            id: PageId::new(page.id),
            title: page.title,
            handle: page.handle,
            body: page.body,
        }))
    }

    /// List a window of pages.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_pages(&self, window: PageWindow) -> Result<PageConnection, AdminShopifyError> {
        let variables = match window {
            PageWindow::Forward { first, after } => get_pages::Variables {
                first: Some(first),
                after,
                ..Default::default()
            },
            PageWindow::Backward { last, before } => get_pages::Variables {
                last: Some(last),
                before,
                ..Default::default()
            },
        };

        let response = self.execute::<GetPages>(variables).await?;

        Ok(convert_page_connection(response.pages))
    }

    /// Delete a page and return the deleted id.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` when the page does not exist, or any transport or
    /// GraphQL error.
    #[instrument(skip(self), fields(page_id = %id))]
    pub async fn delete_page(&self, id: &PageId) -> Result<PageId, AdminShopifyError> {
        let variables = page_delete::Variables { id: id.to_string() };

        let payload = self
            .execute::<PageDelete>(variables)
            .await?
            .page_delete
            .ok_or_else(|| AdminShopifyError::NotFound(format!("pageDelete payload for {id}")))?;

        if !payload.user_errors.is_empty() {
            return Err(AdminShopifyError::UserErrors(convert_user_errors(
                payload.user_errors,
            )));
        }

        let deleted = payload
            .deleted_page_id
            .ok_or_else(|| AdminShopifyError::NotFound(id.to_string()))?;

        tracing::info!(page_id = %deleted, "Page deleted");

        Ok(PageId::new(deleted))
    }
}
