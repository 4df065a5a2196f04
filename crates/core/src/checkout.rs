//! Checkout form and state machine.
//!
//! ```text
//! Idle --submit--> Processing --complete--> Idle   (cart cleared)
//!                            \--abandon---> Idle   (cart kept)
//! ```
//!
//! The payment step itself is simulated elsewhere; this module only owns
//! the transitions and the required-field check. Fields are checked for
//! presence only: no email, card number or expiry format validation.

use core::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartStore;
use crate::pricing::OrderSummary;
use crate::types::CheckoutId;

/// Delivery window quoted on every confirmation, in minutes.
pub const DELIVERY_WINDOW_MINUTES: (i64, i64) = (30, 45);

/// Errors raised by checkout transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// One or more required fields are blank.
    #[error("missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<CheckoutField>),
    /// There is nothing in the cart to pay for.
    #[error("cart is empty")]
    EmptyCart,
    /// A checkout is already waiting on payment.
    #[error("a checkout is already processing")]
    AlreadyProcessing,
    /// `complete` was called with no checkout in flight.
    #[error("no checkout is processing")]
    NotProcessing,
}

fn join_fields(fields: &[CheckoutField]) -> String {
    fields
        .iter()
        .map(CheckoutField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A required checkout form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutField {
    Name,
    Email,
    Phone,
    Address,
    CardNumber,
    ExpiryDate,
    Cvv,
}

impl CheckoutField {
    /// All fields in form order.
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::CardNumber,
        Self::ExpiryDate,
        Self::Cvv,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Address => "Delivery Address",
            Self::CardNumber => "Card Number",
            Self::ExpiryDate => "Expiry Date",
            Self::Cvv => "CVV",
        }
    }
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Customer and payment details collected at checkout.
///
/// Implements `Debug` manually to redact card data. Absent fields
/// deserialize as empty so they surface as missing rather than malformed.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
}

impl fmt::Debug for CheckoutForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("address", &self.address)
            .field("card_number", &"[REDACTED]")
            .field("expiry_date", &"[REDACTED]")
            .field("cvv", &"[REDACTED]")
            .finish()
    }
}

impl CheckoutForm {
    /// Raw value of a field.
    #[must_use]
    pub fn value(&self, field: CheckoutField) -> &str {
        match field {
            CheckoutField::Name => &self.name,
            CheckoutField::Email => &self.email,
            CheckoutField::Phone => &self.phone,
            CheckoutField::Address => &self.address,
            CheckoutField::CardNumber => &self.card_number,
            CheckoutField::ExpiryDate => &self.expiry_date,
            CheckoutField::Cvv => &self.cvv,
        }
    }

    /// Fields that are empty or whitespace only, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<CheckoutField> {
        CheckoutField::ALL
            .into_iter()
            .filter(|field| self.value(*field).trim().is_empty())
            .collect()
    }

    /// Whether every required field is filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Check every required field.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingFields`] listing the blank fields.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CheckoutError::MissingFields(missing))
        }
    }
}

/// Where the checkout currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum CheckoutPhase {
    #[default]
    Idle,
    Processing {
        checkout_id: CheckoutId,
        customer_name: String,
        started_at: DateTime<Utc>,
    },
}

/// A checkout accepted for payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOrder {
    pub checkout_id: CheckoutId,
    /// Totals at the moment of submission.
    pub summary: OrderSummary,
}

/// Quoted delivery window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryEstimate {
    pub earliest: DateTime<Utc>,
    pub latest: DateTime<Utc>,
}

impl DeliveryEstimate {
    /// The standard window counted from `placed_at`.
    #[must_use]
    pub fn from_placed_at(placed_at: DateTime<Utc>) -> Self {
        let (earliest, latest) = DELIVERY_WINDOW_MINUTES;
        Self {
            earliest: placed_at + Duration::minutes(earliest),
            latest: placed_at + Duration::minutes(latest),
        }
    }

    /// Window as shown to the guest, e.g. "30-45 minutes".
    #[must_use]
    pub fn describe(&self) -> String {
        let (earliest, latest) = DELIVERY_WINDOW_MINUTES;
        format!("{earliest}-{latest} minutes")
    }
}

/// Receipt for a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: CheckoutId,
    pub customer_name: String,
    pub placed_at: DateTime<Utc>,
    pub summary: OrderSummary,
    pub delivery: DeliveryEstimate,
}

/// Checkout state machine for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutFlow {
    phase: CheckoutPhase,
}

impl CheckoutFlow {
    /// A flow in the idle state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: CheckoutPhase::Idle,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> &CheckoutPhase {
        &self.phase
    }

    /// Whether a payment is in flight.
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        matches!(self.phase, CheckoutPhase::Processing { .. })
    }

    /// Id of the in-flight checkout, if any.
    #[must_use]
    pub const fn processing_id(&self) -> Option<CheckoutId> {
        match &self.phase {
            CheckoutPhase::Processing { checkout_id, .. } => Some(*checkout_id),
            CheckoutPhase::Idle => None,
        }
    }

    /// Move from `Idle` to `Processing`.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::AlreadyProcessing`] if a checkout is in flight
    /// - [`CheckoutError::MissingFields`] if any field is blank
    /// - [`CheckoutError::EmptyCart`] if the cart has no rows
    pub fn submit(
        &mut self,
        form: &CheckoutForm,
        cart: &CartStore,
    ) -> Result<PendingOrder, CheckoutError> {
        if self.is_processing() {
            return Err(CheckoutError::AlreadyProcessing);
        }
        form.validate()?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let checkout_id = CheckoutId::generate();
        self.phase = CheckoutPhase::Processing {
            checkout_id,
            customer_name: form.name.trim().to_owned(),
            started_at: Utc::now(),
        };

        Ok(PendingOrder {
            checkout_id,
            summary: cart.summary(),
        })
    }

    /// Finish the in-flight checkout: clear the cart and return to `Idle`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NotProcessing`] if nothing is in flight; the
    /// cart is left untouched in that case.
    pub fn complete(&mut self, cart: &mut CartStore) -> Result<OrderConfirmation, CheckoutError> {
        let CheckoutPhase::Processing {
            checkout_id,
            customer_name,
            ..
        } = std::mem::take(&mut self.phase)
        else {
            return Err(CheckoutError::NotProcessing);
        };

        let summary = cart.summary();
        cart.clear();

        let placed_at = Utc::now();
        Ok(OrderConfirmation {
            order_id: checkout_id,
            customer_name,
            placed_at,
            summary,
            delivery: DeliveryEstimate::from_placed_at(placed_at),
        })
    }

    /// Drop the in-flight checkout without touching the cart.
    ///
    /// Returns the id that was abandoned, if any.
    pub fn abandon(&mut self) -> Option<CheckoutId> {
        let id = self.processing_id();
        self.phase = CheckoutPhase::Idle;
        id
    }
}
