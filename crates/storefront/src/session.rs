//! Shopper sessions.
//!
//! A [`ConfiguratorSession`] shares one [`SelectionRuntime`] between tasks.
//! Transitions take the lock briefly; [`submit`](ConfiguratorSession::submit)
//! takes it to start the submission, releases it for the cart request, and
//! takes it again to apply the answer, so the shopper can keep editing while
//! the cart is busy.

use std::sync::Arc;

use stepcart_core::{
    CartGateway, ConfiguratorDefinition, DiscountSummary, ProductId, SelectionRuntime,
    SubmitError, SubmitOutcome, ValidationError,
};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

/// One shopper's configurator state plus the cart it submits to.
pub struct ConfiguratorSession {
    runtime: Mutex<SelectionRuntime>,
    cart: Arc<dyn CartGateway>,
}

impl ConfiguratorSession {
    /// Start a session on the first step with an empty selection.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the definition is not publishable.
    pub fn new(
        definition: ConfiguratorDefinition,
        cart: Arc<dyn CartGateway>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            runtime: Mutex::new(SelectionRuntime::new(definition)?),
            cart,
        })
    }

    /// Lock the runtime for reads or several transitions at once.
    ///
    /// Do not hold the guard across an await on the network.
    pub async fn lock(&self) -> MutexGuard<'_, SelectionRuntime> {
        self.runtime.lock().await
    }

    /// Advance one step. `false` at the last step.
    pub async fn next(&self) -> bool {
        self.runtime.lock().await.next()
    }

    /// Go back one step. `false` at the first step.
    pub async fn back(&self) -> bool {
        self.runtime.lock().await.back()
    }

    /// Add one unit of a product from the current step.
    pub async fn select_product(&self, id: &ProductId) -> Option<u32> {
        self.runtime.lock().await.select_product(id)
    }

    /// Remove one unit of a product.
    pub async fn decrement_product(&self, id: &ProductId) -> Option<u32> {
        self.runtime.lock().await.decrement_product(id)
    }

    /// Drop a product from the selection entirely.
    pub async fn remove_product(&self, id: &ProductId) -> bool {
        self.runtime.lock().await.remove_product(id)
    }

    /// Record a form value for a step.
    pub async fn set_form_value(&self, step: usize, name: &str, value: &str) -> bool {
        self.runtime.lock().await.set_form_value(step, name, value)
    }

    /// Discount summary for the current selection.
    pub async fn summary(&self) -> DiscountSummary {
        *self.runtime.lock().await.summary()
    }

    /// Give up on a pending submission. Its answer will be discarded.
    pub async fn abandon_submission(&self) {
        self.runtime.lock().await.abandon_submission();
    }

    /// Submit the selection to the cart.
    ///
    /// # Errors
    ///
    /// `InFlight` if another submission is pending, `StepsRemaining` before
    /// the last step, `EmptyCart` for a selection with nothing to add, and
    /// `CartApi` if the cart rejected the items (the selection is kept).
    #[instrument(skip(self))]
    pub async fn submit(&self) -> Result<SubmitOutcome, SubmitError> {
        let ticket = self.runtime.lock().await.begin_submission()?;
        debug!(
            lines = ticket.payload().items.len(),
            quantity = ticket.payload().total_quantity(),
            "Submitting selection"
        );

        let result = self.cart.add_items(ticket.payload()).await;

        let outcome = self.runtime.lock().await.finish_submission(ticket, result);
        match &outcome {
            Ok(SubmitOutcome::Added { cleared, .. }) => {
                info!(cleared, "Selection added to cart");
            }
            Ok(SubmitOutcome::Discarded) => debug!("Discarded answer for superseded submission"),
            Err(err) => warn!(error = %err, "Cart submission failed"),
        }
        outcome
    }
}

impl std::fmt::Debug for ConfiguratorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfiguratorSession").finish_non_exhaustive()
    }
}
