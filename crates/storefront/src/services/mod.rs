//! Services backing the storefront routes.
//!
//! # Services
//!
//! - `payment` - Simulated payment processor with cancellation

pub mod payment;

pub use payment::{PaymentOutcome, PaymentSimulator, PendingPayment};
