//! Stepcart Admin library.
//!
//! This crate provides the configurator authoring side as a library,
//! allowing it to be tested and reused by the CLI.
//!
//! # Security
//!
//! This crate holds the Shopify Admin API access token, which can rewrite
//! and delete online store pages. Only deploy on protected infrastructure.
//!
//! # Modules
//!
//! - [`config`] - Environment configuration
//! - [`shopify`] - Admin GraphQL client (pages and catalog)
//! - [`store`] - Page storage seam and its in-memory implementation
//! - [`render`] - Definition to page body, and back
//! - [`repository`] - Configurator CRUD with direction-bound cursors
//! - [`catalog`] - Catalog source for the product picker
//! - [`routes`] - JSON HTTP API

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod render;
pub mod repository;
pub mod routes;
pub mod shopify;
pub mod state;
pub mod store;
