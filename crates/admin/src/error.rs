//! Unified error handling for admin.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use stepcart_core::ValidationError;
use thiserror::Error;

use crate::render::RenderError;
use crate::repository::RepositoryError;
use crate::shopify::{AdminShopifyError, FieldError};

/// Application-level error type for the admin API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Repository operation failed.
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Shopify API operation failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] AdminShopifyError),

    /// The definition is invalid.
    #[error("invalid definition: {0}")]
    Validation(#[from] ValidationError),

    /// Rendering a document failed.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    field_errors: Vec<FieldError>,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Repository(err) => match err {
                RepositoryError::Validation(_) | RepositoryError::MalformedDocument { .. } => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                RepositoryError::Upstream(errors) => {
                    if errors
                        .iter()
                        .any(|e| e.code.as_deref() == Some("NOT_FOUND"))
                    {
                        StatusCode::NOT_FOUND
                    } else {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                }
                RepositoryError::PaginationMisuse(_) => StatusCode::BAD_REQUEST,
                RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
                RepositoryError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
                RepositoryError::Shopify(err) => shopify_status(err),
            },
            Self::Shopify(err) => shopify_status(err),
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn field_errors(&self) -> Vec<FieldError> {
        match self {
            Self::Repository(RepositoryError::Upstream(errors))
            | Self::Shopify(AdminShopifyError::UserErrors(errors)) => errors.clone(),
            _ => Vec::new(),
        }
    }
}

const fn shopify_status(err: &AdminShopifyError) -> StatusCode {
    match err {
        AdminShopifyError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        AdminShopifyError::NotFound(_) => StatusCode::NOT_FOUND,
        AdminShopifyError::UserErrors(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        // Don't expose internal error details to clients
        let error = match status {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            StatusCode::BAD_GATEWAY => "External service error".to_string(),
            _ => self.to_string(),
        };

        let body = ErrorBody {
            error,
            field_errors: self.field_errors(),
        };

        (status, Json(body)).into_response()
    }
}
