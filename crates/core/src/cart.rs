//! Cart line items and the gateway that submits them.
//!
//! The storefront's AJAX Cart API takes bare numeric variant ids, so the
//! payload strips each variant's global id down to its trailing number.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::selection::SelectionAggregate;

/// One `{id, quantity}` line submitted to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineItem {
    /// Numeric variant id.
    pub id: u64,
    pub quantity: u32,
}

/// Body of an add-to-cart request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartPayload {
    pub items: Vec<LineItem>,
}

impl CartPayload {
    /// Build the payload for a selection.
    ///
    /// Entries without a variant, or whose variant id does not end in a
    /// number, are left out. Entries resolving to the same variant are
    /// merged into one line so a variant never appears twice.
    #[must_use]
    pub fn from_aggregate(aggregate: &SelectionAggregate) -> Self {
        let mut items: Vec<LineItem> = Vec::with_capacity(aggregate.len());
        for selection in aggregate {
            let Some(id) = selection.variant_id().and_then(|v| v.numeric_id()) else {
                continue;
            };
            match items.iter_mut().find(|line| line.id == id) {
                Some(line) => line.quantity = line.quantity.saturating_add(selection.quantity),
                None => items.push(LineItem {
                    id,
                    quantity: selection.quantity,
                }),
            }
        }
        Self { items }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |acc, line| acc.saturating_add(line.quantity))
    }
}

/// A line the cart reports back after an add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub variant_id: u64,
    pub quantity: u32,
    #[serde(default)]
    pub title: String,
}

/// Lines added by a successful submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartAddition {
    #[serde(default)]
    pub items: Vec<CartLine>,
}

/// Errors reported by a cart gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartApiError {
    /// The cart answered with an error status.
    #[error("cart rejected the items ({status}): {description}")]
    Rejected {
        status: u16,
        /// Short error title (e.g. `"Cart Error"`).
        message: String,
        /// Human-readable explanation suitable for the shopper.
        description: String,
    },
    /// The request never produced a response.
    #[error("cart request failed: {0}")]
    Transport(String),
    /// The request timed out.
    #[error("cart request timed out")]
    Timeout,
}

/// Where selections are submitted.
#[async_trait]
pub trait CartGateway: Send + Sync {
    /// Add the payload's lines to the shopper's cart.
    async fn add_items(&self, payload: &CartPayload) -> Result<CartAddition, CartApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::tests::product;
    use crate::types::VariantId;

    #[test]
    fn test_payload_uses_numeric_variant_ids() {
        let mut aggregate = SelectionAggregate::default();
        aggregate.add(product(1, "4.00"));
        aggregate.add(product(1, "4.00"));
        aggregate.add(product(2, "6.00"));

        let payload = CartPayload::from_aggregate(&aggregate);
        assert_eq!(
            payload.items,
            vec![
                LineItem { id: 10, quantity: 2 },
                LineItem { id: 20, quantity: 1 },
            ]
        );
        assert_eq!(payload.total_quantity(), 3);
    }

    #[test]
    fn test_payload_skips_unresolvable_variants() {
        let mut no_variants = product(1, "4.00");
        no_variants.variants.clear();
        let mut custom = product(2, "4.00");
        if let Some(variant) = custom.variants.first_mut() {
            variant.id = VariantId::new("custom-variant");
        }

        let mut aggregate = SelectionAggregate::default();
        aggregate.add(no_variants);
        aggregate.add(custom);

        assert!(CartPayload::from_aggregate(&aggregate).is_empty());
        assert_eq!(aggregate.len(), 2);
    }

    #[test]
    fn test_payload_merges_shared_variant() {
        let first = product(1, "4.00");
        let mut second = product(2, "4.00");
        second.variants = first.variants.clone();

        let mut aggregate = SelectionAggregate::default();
        aggregate.add(first);
        aggregate.add(second);

        let payload = CartPayload::from_aggregate(&aggregate);
        assert_eq!(payload.items, vec![LineItem { id: 10, quantity: 2 }]);
    }

    #[test]
    fn test_payload_wire_format() {
        let payload = CartPayload {
            items: vec![LineItem { id: 45, quantity: 3 }],
        };
        assert_eq!(
            serde_json::to_string(&payload).unwrap_or_default(),
            r#"{"items":[{"id":45,"quantity":3}]}"#
        );
    }

    #[test]
    fn test_rejected_display() {
        let err = CartApiError::Rejected {
            status: 422,
            message: "Cart Error".to_string(),
            description: "Only 2 items available".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cart rejected the items (422): Only 2 items available"
        );
    }
}
