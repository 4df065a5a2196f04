//! Simulated payment processor.
//!
//! Every payment is approved after a fixed delay unless it is cancelled
//! first. In-flight payments are tracked by checkout id so that a second
//! request (or a Ctrl+C handler) can cancel one that is being awaited
//! elsewhere.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use bistro_core::CheckoutId;
use tokio::sync::oneshot;

type Registry = Arc<Mutex<HashMap<CheckoutId, oneshot::Sender<()>>>>;

/// How a pending payment ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The delay elapsed; the processor never declines.
    Approved,
    /// The payment was cancelled before the delay elapsed.
    Cancelled,
}

/// Hands out cancellable pending payments.
///
/// Cheap to clone; clones share the in-flight registry.
#[derive(Debug, Clone)]
pub struct PaymentSimulator {
    delay: Duration,
    in_flight: Registry,
}

impl PaymentSimulator {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            in_flight: Arc::default(),
        }
    }

    /// Time a payment takes to be approved.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Register a payment for `checkout_id` and return the handle to await.
    ///
    /// A payment already registered under the same id is cancelled.
    #[must_use]
    pub fn begin(&self, checkout_id: CheckoutId) -> PendingPayment {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        self.registry().insert(checkout_id, cancel_tx);
        tracing::debug!(%checkout_id, delay_ms = self.delay.as_millis(), "payment started");

        PendingPayment {
            checkout_id,
            delay: self.delay,
            cancel_rx,
            registry: Arc::clone(&self.in_flight),
        }
    }

    /// Cancel the in-flight payment for `checkout_id`.
    ///
    /// Returns `false` if no such payment is pending.
    pub fn cancel(&self, checkout_id: CheckoutId) -> bool {
        let Some(cancel_tx) = self.registry().remove(&checkout_id) else {
            return false;
        };
        tracing::info!(%checkout_id, "payment cancelled");
        // The receiver may already be gone if the wait finished concurrently.
        cancel_tx.send(()).is_ok()
    }

    /// Cancel every in-flight payment; returns how many were cancelled.
    pub fn cancel_all(&self) -> usize {
        let senders: Vec<_> = self.registry().drain().collect();
        let cancelled = senders
            .into_iter()
            .filter(|(_, cancel_tx)| !cancel_tx.is_closed())
            .map(|(_, cancel_tx)| cancel_tx.send(()))
            .filter(Result::is_ok)
            .count();
        if cancelled > 0 {
            tracing::info!(cancelled, "cancelled all in-flight payments");
        }
        cancelled
    }

    /// Whether a payment for `checkout_id` is currently pending.
    #[must_use]
    pub fn is_pending(&self, checkout_id: CheckoutId) -> bool {
        self.registry().contains_key(&checkout_id)
    }

    /// Number of payments currently pending.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.registry().len()
    }

    fn registry(&self) -> std::sync::MutexGuard<'_, HashMap<CheckoutId, oneshot::Sender<()>>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A payment that resolves once awaited via [`PendingPayment::wait`].
///
/// Dropping it without waiting deregisters it from the simulator.
#[derive(Debug)]
pub struct PendingPayment {
    checkout_id: CheckoutId,
    delay: Duration,
    cancel_rx: oneshot::Receiver<()>,
    registry: Registry,
}

impl PendingPayment {
    #[must_use]
    pub const fn checkout_id(&self) -> CheckoutId {
        self.checkout_id
    }

    /// Wait for approval or cancellation, whichever comes first.
    pub async fn wait(mut self) -> PaymentOutcome {
        let outcome = tokio::select! {
            biased;
            // A dropped sender means the registry entry was replaced.
            _ = &mut self.cancel_rx => PaymentOutcome::Cancelled,
            () = tokio::time::sleep(self.delay) => PaymentOutcome::Approved,
        };
        tracing::debug!(checkout_id = %self.checkout_id, ?outcome, "payment resolved");
        outcome
    }
}

impl Drop for PendingPayment {
    fn drop(&mut self) {
        // Closing first marks our own sender, leaving a replacement entry alone.
        self.cancel_rx.close();
        let mut in_flight = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        if in_flight
            .get(&self.checkout_id)
            .is_some_and(oneshot::Sender::is_closed)
        {
            in_flight.remove(&self.checkout_id);
        }
    }
}
