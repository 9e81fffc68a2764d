//! The shopper's in-progress selection.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::definition::ProductRef;
use crate::types::{ProductId, VariantId};

/// A selected product and how many units of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub product: ProductRef,
    /// Always at least 1 while the entry is present.
    pub quantity: u32,
}

impl Selection {
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.product.price()
    }

    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity)
    }

    #[must_use]
    pub fn variant_id(&self) -> Option<&VariantId> {
        self.product.variant_id()
    }
}

/// Selected products keyed by product id, in the order first selected.
///
/// Every mutation goes through [`add`](Self::add),
/// [`decrement`](Self::decrement), [`remove`](Self::remove) or
/// [`clear`](Self::clear). An entry is removed as soon as its quantity would
/// reach zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionAggregate {
    entries: Vec<Selection>,
}

impl SelectionAggregate {
    /// Add one unit of a product and return its new quantity.
    pub fn add(&mut self, product: ProductRef) -> u32 {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.product.id == product.id) {
            entry.quantity = entry.quantity.saturating_add(1);
            return entry.quantity;
        }
        self.entries.push(Selection {
            product,
            quantity: 1,
        });
        1
    }

    /// Take one unit away. Returns the remaining quantity (`Some(0)` when the
    /// entry was dropped) or `None` when the product was not selected.
    pub fn decrement(&mut self, id: &ProductId) -> Option<u32> {
        let position = self.position(id)?;
        let entry = self.entries.get_mut(position)?;
        if entry.quantity > 1 {
            entry.quantity -= 1;
            Some(entry.quantity)
        } else {
            self.entries.remove(position);
            Some(0)
        }
    }

    /// Drop a product regardless of quantity.
    pub fn remove(&mut self, id: &ProductId) -> Option<Selection> {
        let position = self.position(id)?;
        Some(self.entries.remove(position))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Selection> {
        self.entries.iter().find(|e| &e.product.id == id)
    }

    /// Quantity of a product, zero when not selected.
    #[must_use]
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.get(id).map_or(0, |e| e.quantity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Selection> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.entries
            .iter()
            .fold(0, |acc, e| acc.saturating_add(e.quantity))
    }

    /// Sum of unit price times quantity, unrounded.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.entries.iter().map(Selection::line_total).sum()
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.entries.iter().position(|e| &e.product.id == id)
    }
}

impl<'a> IntoIterator for &'a SelectionAggregate {
    type Item = &'a Selection;
    type IntoIter = std::slice::Iter<'a, Selection>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
