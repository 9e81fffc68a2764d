//! Submitting a selection to the cart.
//!
//! Submission is split in two so the network call can run without holding
//! the runtime: [`SelectionRuntime::begin_submission`] snapshots the payload
//! and marks a submission in flight, and
//! [`SelectionRuntime::finish_submission`] applies the cart's answer. While a
//! submission is in flight the shopper may keep changing the selection; a
//! successful answer only clears the selection if it was not changed in the
//! meantime, and an answer for a submission that is no longer the current one
//! is discarded.

use thiserror::Error;

use super::SelectionRuntime;
use crate::cart::{CartAddition, CartApiError, CartGateway, CartPayload};

/// Why a submission did not reach the cart, or what the cart said.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Another submission is still waiting for the cart.
    #[error("a submission is already in progress")]
    InFlight,
    /// The shopper has not reached the last step.
    #[error("{remaining} more step(s) before the selection can be submitted")]
    StepsRemaining {
        /// Steps left until the last one.
        remaining: usize,
    },
    /// Nothing in the selection can be added to a cart.
    #[error("select at least one product before adding to cart")]
    EmptyCart,
    /// The cart rejected the items. The selection is unchanged.
    #[error(transparent)]
    CartApi(#[from] CartApiError),
}

/// A submission that has been started but not finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    sequence: u64,
    revision: u64,
    payload: CartPayload,
}

impl SubmissionTicket {
    /// Lines to send to the cart.
    #[must_use]
    pub const fn payload(&self) -> &CartPayload {
        &self.payload
    }
}

/// What happened to a finished submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The cart accepted the items.
    Added {
        cart: CartAddition,
        /// Whether the selection was cleared. It is kept when the shopper
        /// changed it while the submission was in flight.
        cleared: bool,
    },
    /// The submission was superseded; its result was ignored.
    Discarded,
}

impl SelectionRuntime {
    /// Start a submission of the current selection.
    ///
    /// # Errors
    ///
    /// - `InFlight` while an earlier submission is pending
    /// - `StepsRemaining` before the last step
    /// - `EmptyCart` when no entry resolves to a numeric variant id
    pub fn begin_submission(&mut self) -> Result<SubmissionTicket, SubmitError> {
        if self.in_flight.is_some() {
            return Err(SubmitError::InFlight);
        }
        if !self.is_last_step() {
            return Err(SubmitError::StepsRemaining {
                remaining: self.definition.step_count() - 1 - self.step_index,
            });
        }
        let payload = self.cart_payload();
        if payload.is_empty() {
            return Err(SubmitError::EmptyCart);
        }

        self.next_sequence = self.next_sequence.wrapping_add(1);
        self.in_flight = Some(self.next_sequence);
        Ok(SubmissionTicket {
            sequence: self.next_sequence,
            revision: self.revision,
            payload,
        })
    }

    /// Give up on the pending submission, re-enabling submit. A late answer
    /// for it will be discarded.
    pub fn abandon_submission(&mut self) {
        self.in_flight = None;
    }

    /// Apply the cart's answer to a submission.
    ///
    /// # Errors
    ///
    /// Returns `CartApi` when the cart rejected the current submission. The
    /// selection is left untouched so the shopper can retry.
    pub fn finish_submission(
        &mut self,
        ticket: SubmissionTicket,
        result: Result<CartAddition, CartApiError>,
    ) -> Result<SubmitOutcome, SubmitError> {
        if self.in_flight != Some(ticket.sequence) {
            return Ok(SubmitOutcome::Discarded);
        }
        self.in_flight = None;

        let cart = result?;
        let cleared = self.revision == ticket.revision;
        if cleared {
            self.aggregate.clear();
            self.touch();
        }
        Ok(SubmitOutcome::Added { cart, cleared })
    }

    /// Submit the selection through `cart` and apply the answer.
    ///
    /// # Errors
    ///
    /// See [`begin_submission`](Self::begin_submission) and
    /// [`finish_submission`](Self::finish_submission).
    pub async fn submit<C>(&mut self, cart: &C) -> Result<SubmitOutcome, SubmitError>
    where
        C: CartGateway + ?Sized,
    {
        let ticket = self.begin_submission()?;
        let result = cart.add_items(ticket.payload()).await;
        self.finish_submission(ticket, result)
    }
}
