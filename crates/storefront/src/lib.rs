//! Stepcart Storefront library.
//!
//! Shopper-side plumbing for a published configurator: the AJAX Cart API
//! client that implements [`CartGateway`](stepcart_core::CartGateway), and a
//! session type that shares one selection runtime between tasks.
//!
//! # Modules
//!
//! - [`config`] - Environment configuration
//! - [`shopify`] - AJAX Cart API client
//! - [`session`] - Shopper sessions with non-blocking cart submission

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod session;
pub mod shopify;

pub use config::StorefrontConfig;
pub use session::ConfiguratorSession;
pub use shopify::CartClient;
