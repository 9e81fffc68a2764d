//! Configurator definitions.
//!
//! A definition is the authored description of a multi-step selection flow:
//! an ordered list of product-selection and form steps plus the discount
//! policy the shopper runtime applies. It is the single source of truth for a
//! published configurator page; the rendered document is derived from it.
//!
//! The wire format is camelCase JSON with steps tagged by `type`
//! (`"products"` or `"form"`), which is also what the embedded storefront
//! runtime reads.

mod edit;

use std::collections::HashSet;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::discount::DiscountPolicy;
use crate::types::{ProductId, VariantId};

pub use edit::FieldUpdate;

/// Errors raised when a definition breaks one of its invariants, or when an
/// authoring edit addresses something that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The configurator title is empty or whitespace.
    #[error("title cannot be empty")]
    EmptyTitle,
    /// The configurator has no steps.
    #[error("a configurator needs at least one step")]
    NoSteps,
    /// A form step has no fields.
    #[error("form step {step} has no fields")]
    EmptyForm {
        /// Zero-based step index.
        step: usize,
    },
    /// A form field has an empty submission name.
    #[error("form step {step} has a field without a name")]
    EmptyFieldName {
        /// Zero-based step index.
        step: usize,
    },
    /// Two fields of a form step share a submission name.
    #[error("form step {step} repeats field name '{name}'")]
    DuplicateFieldName {
        /// Zero-based step index.
        step: usize,
        /// The repeated name.
        name: String,
    },
    /// A product step lists the same product twice.
    #[error("product step {step} lists product {id} more than once")]
    DuplicateProduct {
        /// Zero-based step index.
        step: usize,
        /// The repeated product.
        id: ProductId,
    },
    /// An edit addressed a step that does not exist.
    #[error("step {index} does not exist")]
    StepOutOfRange {
        /// The requested step index.
        index: usize,
    },
    /// An edit addressed a form field that does not exist.
    #[error("field {index} does not exist in step {step}")]
    FieldOutOfRange {
        /// Zero-based step index.
        step: usize,
        /// The requested field index.
        index: usize,
    },
    /// An edit expected a different kind of step.
    #[error("step {step} is not a {expected} step")]
    WrongStepKind {
        /// Zero-based step index.
        step: usize,
        /// The kind the edit needs.
        expected: StepKind,
    },
    /// The only remaining step cannot be removed.
    #[error("the last step cannot be removed")]
    LastStep,
    /// The only remaining field of a form step cannot be removed.
    #[error("the last field of form step {step} cannot be removed")]
    LastField {
        /// Zero-based step index.
        step: usize,
    },
}

/// An authored configurator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfiguratorDefinition {
    /// Page title shown to merchants and used for the storefront handle.
    pub title: String,
    /// Ordered steps the shopper walks through.
    pub steps: Vec<Step>,
    /// Discount tiers applied to the shopper's selection.
    #[serde(default)]
    pub discount: DiscountPolicy,
}

impl ConfiguratorDefinition {
    /// Check every invariant a definition must hold before it is published.
    ///
    /// # Errors
    ///
    /// Returns the first violation found: an empty title, no steps, a form
    /// step without fields, a blank or repeated field name, or a product
    /// listed twice in one step.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.steps.is_empty() {
            return Err(ValidationError::NoSteps);
        }

        for (index, step) in self.steps.iter().enumerate() {
            match step {
                Step::Products(products) => {
                    let mut seen = HashSet::new();
                    for item in &products.items {
                        if !seen.insert(&item.id) {
                            return Err(ValidationError::DuplicateProduct {
                                step: index,
                                id: item.id.clone(),
                            });
                        }
                    }
                }
                Step::Form(form) => {
                    if form.fields.is_empty() {
                        return Err(ValidationError::EmptyForm { step: index });
                    }
                    let mut seen = HashSet::new();
                    for field in &form.fields {
                        if field.name.trim().is_empty() {
                            return Err(ValidationError::EmptyFieldName { step: index });
                        }
                        if !seen.insert(field.name.as_str()) {
                            return Err(ValidationError::DuplicateFieldName {
                                step: index,
                                name: field.name.clone(),
                            });
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Number of steps.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Get a step by index.
    #[must_use]
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }
}

/// The two kinds of step a configurator can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// The shopper picks products.
    Products,
    /// The shopper fills in free-text fields.
    Form,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Products => f.write_str("products"),
            Self::Form => f.write_str("form"),
        }
    }
}

/// One page of the flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Step {
    /// Product-selection step.
    #[serde(rename = "products")]
    Products(ProductStep),
    /// Form-input step.
    #[serde(rename = "form")]
    Form(FormStep),
}

impl Step {
    /// Step title shown above the step.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Products(step) => &step.title,
            Self::Form(step) => &step.title,
        }
    }

    /// Which kind of step this is.
    #[must_use]
    pub const fn kind(&self) -> StepKind {
        match self {
            Self::Products(_) => StepKind::Products,
            Self::Form(_) => StepKind::Form,
        }
    }

    /// Products offered by this step (empty for form steps).
    #[must_use]
    pub fn items(&self) -> &[ProductRef] {
        match self {
            Self::Products(step) => &step.items,
            Self::Form(_) => &[],
        }
    }

    /// Form fields of this step (empty for product steps).
    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        match self {
            Self::Products(_) => &[],
            Self::Form(step) => &step.fields,
        }
    }

    /// Find a product offered by this step.
    #[must_use]
    pub fn find_item(&self, id: &ProductId) -> Option<&ProductRef> {
        self.items().iter().find(|item| &item.id == id)
    }
}

/// A step in which the shopper picks products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductStep {
    pub title: String,
    #[serde(default)]
    pub items: Vec<ProductRef>,
}

/// A step in which the shopper fills in fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormStep {
    pub title: String,
    pub fields: Vec<FormField>,
}

/// A catalog product offered in a product step.
///
/// Carries a snapshot of the catalog data at authoring time, so the runtime
/// never has to call back into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Featured image URL (or the catalog placeholder).
    #[serde(default, alias = "featuredImage")]
    pub image_url: String,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl ProductRef {
    /// Unit price: the first variant's price, or zero without variants.
    #[must_use]
    pub fn price(&self) -> Decimal {
        self.variants.first().map_or(Decimal::ZERO, |v| v.price)
    }

    /// Variant added to the cart when this product is selected.
    #[must_use]
    pub fn variant_id(&self) -> Option<&VariantId> {
        self.variants.first().map(|v| &v.id)
    }

    /// Whether every known inventory count is zero or below.
    #[must_use]
    pub fn is_sold_out(&self) -> bool {
        !self.variants.is_empty()
            && self
                .variants
                .iter()
                .all(|v| v.inventory_quantity.is_some_and(|q| q <= 0))
    }
}

/// A purchasable variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: VariantId,
    pub price: Decimal,
    #[serde(default)]
    pub compare_at_price: Option<Decimal>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
}

/// Input control used for a form field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text input.
    #[default]
    Text,
    /// Multi-line text area.
    Textarea,
}

/// A free-text field in a form step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub label: String,
    /// Submission key, unique within the step.
    pub name: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(rename = "type", default)]
    pub kind: FieldKind,
}
