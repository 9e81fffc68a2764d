//! Authoring edits on a draft definition.
//!
//! These mirror what the merchant does in the page builder: add and remove
//! steps, switch a step between products and form, pick catalog products and
//! manage form fields. Edits keep the per-step invariants (unique products,
//! unique field names, at least one step, at least one field per form) so a
//! draft built only through them always validates once it has a title.

use super::{
    ConfiguratorDefinition, FieldKind, FormField, FormStep, ProductRef, ProductStep, Step,
    StepKind, ValidationError,
};
use crate::discount::DiscountPolicy;
use crate::types::ProductId;

const DEFAULT_PLACEHOLDER: &str = "Enter text";

/// Partial update of a form field. `None` leaves the attribute unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldUpdate {
    pub label: Option<String>,
    pub name: Option<String>,
    pub placeholder: Option<String>,
    pub kind: Option<FieldKind>,
}

impl ConfiguratorDefinition {
    /// Start a draft with a single empty product step.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            steps: vec![Step::Products(ProductStep {
                title: "Step 1: Choose Products".to_string(),
                items: Vec::new(),
            })],
            discount: DiscountPolicy::default(),
        }
    }

    /// Append an empty product step and return its index.
    pub fn add_step(&mut self) -> usize {
        let number = self.steps.len() + 1;
        self.steps.push(Step::Products(ProductStep {
            title: format!("Step {number}: New Step"),
            items: Vec::new(),
        }));
        number - 1
    }

    /// Remove a step.
    ///
    /// # Errors
    ///
    /// Returns `StepOutOfRange` for an unknown index and `LastStep` when the
    /// step is the only one left.
    pub fn remove_step(&mut self, index: usize) -> Result<Step, ValidationError> {
        if index >= self.steps.len() {
            return Err(ValidationError::StepOutOfRange { index });
        }
        if self.steps.len() == 1 {
            return Err(ValidationError::LastStep);
        }
        Ok(self.steps.remove(index))
    }

    /// Change a step's title.
    ///
    /// # Errors
    ///
    /// Returns `StepOutOfRange` for an unknown index.
    pub fn rename_step(
        &mut self,
        index: usize,
        title: impl Into<String>,
    ) -> Result<(), ValidationError> {
        match self.step_mut(index)? {
            Step::Products(step) => step.title = title.into(),
            Step::Form(step) => step.title = title.into(),
        }
        Ok(())
    }

    /// Switch a step between products and form, keeping its title.
    ///
    /// A new form step starts with one text field; a new product step starts
    /// with no products. Switching to the current kind changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `StepOutOfRange` for an unknown index.
    pub fn set_step_kind(&mut self, index: usize, kind: StepKind) -> Result<(), ValidationError> {
        let step = self.step_mut(index)?;
        if step.kind() == kind {
            return Ok(());
        }
        let title = step.title().to_string();
        *step = match kind {
            StepKind::Products => Step::Products(ProductStep {
                title,
                items: Vec::new(),
            }),
            StepKind::Form => Step::Form(FormStep {
                title,
                fields: vec![FormField {
                    label: "Field 1".to_string(),
                    name: "field1".to_string(),
                    placeholder: DEFAULT_PLACEHOLDER.to_string(),
                    kind: FieldKind::Text,
                }],
            }),
        };
        Ok(())
    }

    /// Offer a catalog product in a product step.
    ///
    /// Returns `false` when the step already offers that product.
    ///
    /// # Errors
    ///
    /// Returns `StepOutOfRange` or `WrongStepKind` when `step` is not a
    /// product step.
    pub fn add_product(&mut self, step: usize, product: ProductRef) -> Result<bool, ValidationError> {
        let products = self.product_step_mut(step)?;
        if products.items.iter().any(|item| item.id == product.id) {
            return Ok(false);
        }
        products.items.push(product);
        Ok(true)
    }

    /// Stop offering a product in a product step.
    ///
    /// Returns `false` when the step did not offer it.
    ///
    /// # Errors
    ///
    /// Returns `StepOutOfRange` or `WrongStepKind` when `step` is not a
    /// product step.
    pub fn remove_product(&mut self, step: usize, id: &ProductId) -> Result<bool, ValidationError> {
        let products = self.product_step_mut(step)?;
        let before = products.items.len();
        products.items.retain(|item| &item.id != id);
        Ok(products.items.len() != before)
    }

    /// Append a text field to a form step and return its index.
    ///
    /// The field is labelled `Field {n}` and named `field{n}`; the number is
    /// bumped until the name is free within the step.
    ///
    /// # Errors
    ///
    /// Returns `StepOutOfRange` or `WrongStepKind` when `step` is not a form
    /// step.
    pub fn add_field(&mut self, step: usize) -> Result<usize, ValidationError> {
        let form = self.form_step_mut(step)?;
        let mut number = form.fields.len() + 1;
        while form.fields.iter().any(|f| f.name == format!("field{number}")) {
            number += 1;
        }
        form.fields.push(FormField {
            label: format!("Field {number}"),
            name: format!("field{number}"),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            kind: FieldKind::Text,
        });
        Ok(form.fields.len() - 1)
    }

    /// Apply a partial update to a form field.
    ///
    /// # Errors
    ///
    /// Returns `StepOutOfRange`, `WrongStepKind` or `FieldOutOfRange` for a
    /// bad address, and `EmptyFieldName` / `DuplicateFieldName` when the new
    /// name would break the step's submission keys.
    pub fn update_field(
        &mut self,
        step: usize,
        index: usize,
        update: FieldUpdate,
    ) -> Result<(), ValidationError> {
        let form = self.form_step_mut(step)?;

        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyFieldName { step });
            }
            let taken = form
                .fields
                .iter()
                .enumerate()
                .any(|(i, f)| i != index && &f.name == name);
            if taken {
                return Err(ValidationError::DuplicateFieldName {
                    step,
                    name: name.clone(),
                });
            }
        }

        let field = form
            .fields
            .get_mut(index)
            .ok_or(ValidationError::FieldOutOfRange { step, index })?;
        if let Some(label) = update.label {
            field.label = label;
        }
        if let Some(name) = update.name {
            field.name = name;
        }
        if let Some(placeholder) = update.placeholder {
            field.placeholder = placeholder;
        }
        if let Some(kind) = update.kind {
            field.kind = kind;
        }
        Ok(())
    }

    /// Remove a form field.
    ///
    /// # Errors
    ///
    /// Returns `StepOutOfRange`, `WrongStepKind` or `FieldOutOfRange` for a
    /// bad address and `LastField` when it is the step's only field.
    pub fn remove_field(&mut self, step: usize, index: usize) -> Result<FormField, ValidationError> {
        let form = self.form_step_mut(step)?;
        if index >= form.fields.len() {
            return Err(ValidationError::FieldOutOfRange { step, index });
        }
        if form.fields.len() == 1 {
            return Err(ValidationError::LastField { step });
        }
        Ok(form.fields.remove(index))
    }

    fn step_mut(&mut self, index: usize) -> Result<&mut Step, ValidationError> {
        self.steps
            .get_mut(index)
            .ok_or(ValidationError::StepOutOfRange { index })
    }

    fn product_step_mut(&mut self, index: usize) -> Result<&mut ProductStep, ValidationError> {
        match self.step_mut(index)? {
            Step::Products(step) => Ok(step),
            Step::Form(_) => Err(ValidationError::WrongStepKind {
                step: index,
                expected: StepKind::Products,
            }),
        }
    }

    fn form_step_mut(&mut self, index: usize) -> Result<&mut FormStep, ValidationError> {
        match self.step_mut(index)? {
            Step::Form(step) => Ok(step),
            Step::Products(_) => Err(ValidationError::WrongStepKind {
                step: index,
                expected: StepKind::Form,
            }),
        }
    }
}
