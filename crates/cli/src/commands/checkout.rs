//! Run a simulated checkout for an order file.
//!
//! The payment delay is the same cancellable one the storefront uses;
//! pressing Ctrl+C while it runs cancels the payment and leaves the order
//! unplaced.

use std::path::Path;
use std::time::Duration;

use bistro_core::{CartStore, Catalog, CheckoutError, CheckoutFlow, CheckoutForm, OrderConfirmation};
use bistro_storefront::services::{PaymentOutcome, PaymentSimulator};
use thiserror::Error;

use super::order::{self, OrderError};

/// Errors raised by the checkout command.
#[derive(Debug, Error)]
pub enum CheckoutCommandError {
    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("payment cancelled; no order was placed")]
    Cancelled,
}

/// Submit `cart` with `form` and wait for `payments` to approve.
///
/// On approval the cart is cleared. On cancellation the cart is left as is.
///
/// # Errors
///
/// Returns `CheckoutCommandError::Checkout` if the form or cart is rejected,
/// or `CheckoutCommandError::Cancelled` if the payment is cancelled.
pub async fn place_order(
    cart: &mut CartStore,
    form: &CheckoutForm,
    payments: &PaymentSimulator,
) -> Result<OrderConfirmation, CheckoutCommandError> {
    let mut flow = CheckoutFlow::new();
    let pending = flow.submit(form, cart)?;
    tracing::info!(
        checkout_id = %pending.checkout_id,
        total = %pending.summary.total_price(),
        delay_ms = u64::try_from(payments.delay().as_millis()).unwrap_or(u64::MAX),
        "processing payment"
    );

    match payments.begin(pending.checkout_id).wait().await {
        PaymentOutcome::Approved => Ok(flow.complete(cart)?),
        PaymentOutcome::Cancelled => {
            flow.abandon();
            Err(CheckoutCommandError::Cancelled)
        }
    }
}

/// Render a confirmation the way the storefront shows it.
#[must_use]
pub fn render_confirmation(confirmation: &OrderConfirmation) -> String {
    format!(
        "{receipt}\nOrder confirmed for {name}!\nOrder id: {id}\nEstimated delivery: {delivery}\n",
        receipt = order::render_receipt(&confirmation.summary),
        name = confirmation.customer_name,
        id = confirmation.order_id,
        delivery = confirmation.delivery.describe(),
    )
}

/// Load an order file and check it out, cancelling on Ctrl+C.
///
/// # Errors
///
/// Returns an error if the order file is invalid, the checkout is rejected,
/// or the payment is cancelled.
pub async fn run(
    catalog: &Catalog,
    path: &Path,
    form: &CheckoutForm,
    delay: Duration,
) -> Result<String, CheckoutCommandError> {
    let lines = order::load_order(path).await?;
    let mut cart = order::build_cart(catalog, &lines)?;

    let payments = PaymentSimulator::new(delay);
    let canceller = payments.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling payment");
            canceller.cancel_all();
        }
    });

    let result = place_order(&mut cart, form, &payments).await;
    interrupt.abort();

    result.map(|confirmation| render_confirmation(&confirmation))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(2000);

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
            phone: "555-0199".to_string(),
            address: "1 Compiler Court".to_string(),
            card_number: "4111111111111111".to_string(),
            expiry_date: "12/30".to_string(),
            cvv: "123".to_string(),
        }
    }

    fn cart_with_salads() -> CartStore {
        let catalog = Catalog::house_menu();
        let salad = catalog.find("1").unwrap();
        let mut cart = CartStore::new();
        cart.add_item(salad, Vec::<String>::new());
        cart.add_item(salad, Vec::<String>::new());
        cart
    }

    #[tokio::test(start_paused = true)]
    async fn test_place_order_clears_cart() {
        let payments = PaymentSimulator::new(DELAY);
        let mut cart = cart_with_salads();

        let confirmation = place_order(&mut cart, &form(), &payments).await.unwrap();

        assert!(cart.is_empty());
        assert_eq!(confirmation.customer_name, "Grace Hopper");
        assert_eq!(confirmation.summary.item_count(), 2);
        let text = render_confirmation(&confirmation);
        assert!(text.contains("$32.98"));
        assert!(text.contains("Estimated delivery: 30-45 minutes"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_payment_keeps_cart() {
        let payments = PaymentSimulator::new(DELAY);
        let canceller = payments.clone();
        let mut cart = cart_with_salads();

        let cancel = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            canceller.cancel_all()
        });

        let result = place_order(&mut cart, &form(), &payments).await;
        assert!(matches!(result, Err(CheckoutCommandError::Cancelled)));
        assert_eq!(cancel.await.unwrap(), 1);
        assert_eq!(cart.total_item_count(), 2);
    }

    #[tokio::test]
    async fn test_missing_fields_rejected_before_payment() {
        let payments = PaymentSimulator::new(DELAY);
        let mut cart = cart_with_salads();
        let mut form = form();
        form.cvv = "  ".to_string();

        let result = place_order(&mut cart, &form, &payments).await;
        assert!(matches!(
            result,
            Err(CheckoutCommandError::Checkout(CheckoutError::MissingFields(_)))
        ));
        assert_eq!(payments.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let payments = PaymentSimulator::new(DELAY);
        let mut cart = CartStore::new();
        let result = place_order(&mut cart, &form(), &payments).await;
        assert!(matches!(
            result,
            Err(CheckoutCommandError::Checkout(CheckoutError::EmptyCart))
        ));
    }
}
