//! The shopper-facing runtime of a configurator.
//!
//! [`SelectionRuntime`] walks a shopper through a definition's steps, keeps
//! the [`SelectionAggregate`] of chosen products, recomputes the discount
//! summary after every change and hands the final selection to a
//! [`CartGateway`](crate::cart::CartGateway).
//!
//! Every transition is synchronous and never fails; only submission touches
//! the network (see [`submit`](SelectionRuntime::submit)).

mod aggregate;
mod submit;

use std::collections::BTreeMap;

use crate::cart::CartPayload;
use crate::definition::{ConfiguratorDefinition, Step, ValidationError};
use crate::discount::DiscountSummary;
use crate::types::ProductId;

pub use aggregate::{Selection, SelectionAggregate};
pub use submit::{SubmissionTicket, SubmitError, SubmitOutcome};

/// Runtime state for one shopper working through one configurator.
#[derive(Debug, Clone)]
pub struct SelectionRuntime {
    definition: ConfiguratorDefinition,
    step_index: usize,
    aggregate: SelectionAggregate,
    form_values: BTreeMap<(usize, String), String>,
    summary: DiscountSummary,
    /// Bumped on every aggregate change.
    revision: u64,
    next_sequence: u64,
    in_flight: Option<u64>,
}

impl SelectionRuntime {
    /// Start a runtime on the first step with an empty selection.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the definition is not publishable.
    pub fn new(definition: ConfiguratorDefinition) -> Result<Self, ValidationError> {
        definition.validate()?;
        let mut runtime = Self {
            definition,
            step_index: 0,
            aggregate: SelectionAggregate::default(),
            form_values: BTreeMap::new(),
            summary: DiscountSummary::default(),
            revision: 0,
            next_sequence: 0,
            in_flight: None,
        };
        runtime.recompute();
        Ok(runtime)
    }

    #[must_use]
    pub const fn definition(&self) -> &ConfiguratorDefinition {
        &self.definition
    }

    /// Zero-based index of the current step, always below the step count.
    #[must_use]
    pub const fn step_index(&self) -> usize {
        self.step_index
    }

    /// The step the shopper is on.
    #[must_use]
    #[allow(clippy::indexing_slicing)]
    pub fn current_step(&self) -> &Step {
        // `new` rejects definitions without steps and navigation keeps
        // `step_index` in range.
        &self.definition.steps[self.step_index]
    }

    #[must_use]
    pub fn is_first_step(&self) -> bool {
        self.step_index == 0
    }

    /// Whether the submit action is available.
    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.step_index + 1 >= self.definition.step_count()
    }

    /// Advance one step. Returns `false` (and stays put) on the last step.
    pub fn next(&mut self) -> bool {
        if self.is_last_step() {
            return false;
        }
        self.step_index += 1;
        true
    }

    /// Go back one step. Returns `false` (and stays put) on the first step.
    pub fn back(&mut self) -> bool {
        if self.is_first_step() {
            return false;
        }
        self.step_index -= 1;
        true
    }

    /// Add one unit of a product offered by the current step.
    ///
    /// Returns the product's new quantity, or `None` when the current step
    /// does not offer it or it is sold out.
    pub fn select_product(&mut self, id: &ProductId) -> Option<u32> {
        let product = self
            .current_step()
            .find_item(id)
            .filter(|product| !product.is_sold_out())?
            .clone();
        let quantity = self.aggregate.add(product);
        self.touch();
        Some(quantity)
    }

    /// Take away one unit of a selected product, dropping it at zero.
    ///
    /// Returns the remaining quantity, or `None` when it was not selected.
    pub fn decrement_product(&mut self, id: &ProductId) -> Option<u32> {
        let remaining = self.aggregate.decrement(id)?;
        self.touch();
        Some(remaining)
    }

    /// Drop a product from the selection. Returns whether it was selected.
    pub fn remove_product(&mut self, id: &ProductId) -> bool {
        if self.aggregate.remove(id).is_none() {
            return false;
        }
        self.touch();
        true
    }

    /// Record a form value.
    ///
    /// Values are advisory: nothing is validated and navigation never waits
    /// for them. Returns `false` only when `step` does not exist.
    pub fn set_form_value(
        &mut self,
        step: usize,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> bool {
        if step >= self.definition.step_count() {
            return false;
        }
        self.form_values.insert((step, name.into()), value.into());
        true
    }

    #[must_use]
    pub fn form_value(&self, step: usize, name: &str) -> Option<&str> {
        self.form_values
            .get(&(step, name.to_string()))
            .map(String::as_str)
    }

    /// Values entered for one step, ordered by field name.
    pub fn form_values(&self, step: usize) -> impl Iterator<Item = (&str, &str)> {
        self.form_values
            .iter()
            .filter(move |((s, _), _)| *s == step)
            .map(|((_, name), value)| (name.as_str(), value.as_str()))
    }

    #[must_use]
    pub const fn aggregate(&self) -> &SelectionAggregate {
        &self.aggregate
    }

    /// Discount summary for the current selection.
    #[must_use]
    pub const fn summary(&self) -> &DiscountSummary {
        &self.summary
    }

    /// Cart payload for the current selection.
    #[must_use]
    pub fn cart_payload(&self) -> CartPayload {
        CartPayload::from_aggregate(&self.aggregate)
    }

    /// Whether a submission is waiting for the cart.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.summary = self.definition.discount.evaluate(&self.aggregate);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
pub(crate) mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::definition::tests::{field, product};
    use crate::definition::{FormStep, ProductStep};
    use crate::discount::DiscountPolicy;

    pub(crate) fn three_step_definition() -> ConfiguratorDefinition {
        ConfiguratorDefinition {
            title: "Gift box".to_string(),
            steps: vec![
                Step::Products(ProductStep {
                    title: "Box".to_string(),
                    items: vec![product(1, "10.00"), product(2, "4.00")],
                }),
                Step::Products(ProductStep {
                    title: "Treats".to_string(),
                    items: vec![product(3, "2.00")],
                }),
                Step::Form(FormStep {
                    title: "Card".to_string(),
                    fields: vec![field("message")],
                }),
            ],
            discount: DiscountPolicy::default(),
        }
    }

    fn id(n: u64) -> ProductId {
        ProductId::from_numeric(n)
    }

    #[test]
    fn test_new_rejects_invalid_definition() {
        let mut def = three_step_definition();
        def.steps.clear();
        assert_eq!(
            SelectionRuntime::new(def).unwrap_err(),
            ValidationError::NoSteps
        );
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut runtime = SelectionRuntime::new(three_step_definition()).unwrap();
        assert!(!runtime.back());
        assert_eq!(runtime.step_index(), 0);

        assert!(runtime.next());
        assert!(runtime.next());
        assert!(runtime.is_last_step());
        assert!(!runtime.next());
        assert_eq!(runtime.step_index(), 2);

        assert!(runtime.back());
        assert_eq!(runtime.current_step().title(), "Treats");
    }

    #[test]
    fn test_select_only_from_current_step() {
        let mut runtime = SelectionRuntime::new(three_step_definition()).unwrap();
        assert_eq!(runtime.select_product(&id(3)), None);
        assert_eq!(runtime.select_product(&id(1)), Some(1));
        assert_eq!(runtime.select_product(&id(1)), Some(2));
        assert_eq!(runtime.aggregate().len(), 1);

        runtime.next();
        assert_eq!(runtime.select_product(&id(3)), Some(1));
        assert_eq!(runtime.aggregate().len(), 2);
    }

    #[test]
    fn test_sold_out_products_cannot_be_selected() {
        let mut def = three_step_definition();
        if let Step::Products(step) = &mut def.steps[0] {
            step.items[1].variants[0].inventory_quantity = Some(0);
        }
        let mut runtime = SelectionRuntime::new(def).unwrap();

        assert_eq!(runtime.select_product(&id(2)), None);
        assert!(runtime.aggregate().is_empty());
        assert_eq!(runtime.summary().total_quantity, 0);
        assert_eq!(runtime.select_product(&id(1)), Some(1));
    }

    #[test]
    fn test_summary_follows_every_change() {
        let mut runtime = SelectionRuntime::new(three_step_definition()).unwrap();
        assert_eq!(runtime.summary().percent, Decimal::ZERO);

        runtime.select_product(&id(1));
        assert_eq!(runtime.summary().percent, Decimal::from(5));
        assert_eq!(runtime.summary().discounted_total, Decimal::new(950, 2));

        runtime.select_product(&id(2));
        runtime.select_product(&id(2));
        assert_eq!(runtime.summary().total_quantity, 3);
        assert_eq!(runtime.summary().percent, Decimal::from(15));

        runtime.decrement_product(&id(2));
        assert_eq!(runtime.summary().percent, Decimal::from(5));

        assert!(runtime.remove_product(&id(1)));
        assert!(!runtime.remove_product(&id(1)));
        assert_eq!(runtime.summary().total_quantity, 1);
    }

    #[test]
    fn test_decrement_from_other_step() {
        let mut runtime = SelectionRuntime::new(three_step_definition()).unwrap();
        runtime.select_product(&id(1));
        runtime.next();
        assert_eq!(runtime.decrement_product(&id(1)), Some(0));
        assert!(runtime.aggregate().is_empty());
        assert_eq!(runtime.decrement_product(&id(1)), None);
    }

    #[test]
    fn test_form_values_are_advisory() {
        let mut runtime = SelectionRuntime::new(three_step_definition()).unwrap();
        assert!(runtime.set_form_value(2, "message", "Happy birthday"));
        assert!(runtime.set_form_value(2, "unlisted", ""));
        assert!(!runtime.set_form_value(9, "message", "lost"));
        assert_eq!(runtime.form_value(2, "message"), Some("Happy birthday"));

        let values: Vec<_> = runtime.form_values(2).collect();
        assert_eq!(values, vec![("message", "Happy birthday"), ("unlisted", "")]);

        assert!(runtime.next());
        assert!(runtime.next());
    }
}
