//! Core types for Stepcart.
//!
//! This module provides type-safe wrappers for platform identifiers and
//! helpers for money amounts.

pub mod gid;
pub mod money;

pub use gid::{GidError, PageId, ProductId, VariantId};
pub use money::{format_money, round_money};
