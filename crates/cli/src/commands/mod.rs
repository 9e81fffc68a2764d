//! CLI command implementations.

pub mod configurators;
pub mod definition;

use stepcart_admin::config::ConfigError;
use stepcart_admin::render::RenderError;
use stepcart_admin::repository::RepositoryError;
use stepcart_admin::shopify::AdminShopifyError;
use stepcart_core::ValidationError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading a file or writing output failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing to stdout failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// A definition file is not valid JSON for a definition.
    #[error("Invalid definition file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// JSON output could not be produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The definition breaks a model invariant.
    #[error("Invalid definition: {0}")]
    Validation(#[from] ValidationError),

    /// Rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Shopify configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The Shopify client could not be created.
    #[error("Shopify error: {0}")]
    Shopify(#[from] AdminShopifyError),

    /// A repository operation failed.
    #[error("{0}")]
    Repository(#[from] RepositoryError),
}
