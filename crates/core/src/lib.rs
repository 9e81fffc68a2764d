//! Stepcart Core - configurator model and shopper runtime.
//!
//! This crate provides everything that runs without a network:
//! - `admin` - authors, stores and lists configurator pages
//! - `storefront` - submits a shopper's selection to the cart
//! - `cli` - operator tooling
//!
//! # Architecture
//!
//! The core crate contains only types, pure functions and traits - no HTTP
//! clients, no platform credentials. I/O happens behind [`cart::CartGateway`],
//! which the storefront crate implements.
//!
//! # Modules
//!
//! - [`types`] - Typed global ids and money helpers
//! - [`definition`] - Configurator definitions and authoring edits
//! - [`discount`] - Tiered discount rules
//! - [`selection`] - Step navigation and the shopper's selection aggregate
//! - [`cart`] - Cart line items and the cart gateway seam

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod definition;
pub mod discount;
pub mod selection;
pub mod types;

pub use cart::{CartAddition, CartApiError, CartGateway, CartLine, CartPayload, LineItem};
pub use definition::{
    ConfiguratorDefinition, FieldKind, FieldUpdate, FormField, FormStep, ProductRef, ProductStep,
    Step, StepKind, ValidationError, Variant,
};
pub use discount::{DiscountMetric, DiscountPolicy, DiscountRule, DiscountSummary};
pub use selection::{
    Selection, SelectionAggregate, SelectionRuntime, SubmissionTicket, SubmitError,
    SubmitOutcome,
};
pub use types::*;
