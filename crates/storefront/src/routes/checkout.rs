//! Checkout route handlers.
//!
//! Submitting the form moves the session's checkout into `Processing`,
//! persists that immediately, then holds the request open while the
//! simulated payment runs. A concurrent `POST /checkout/cancel` from the
//! same session cancels the payment and the held request redirects back to
//! the cart with the cart intact.

use std::time::Duration;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use bistro_core::{CheckoutError, CheckoutForm, OrderConfirmation};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::models::session::{load_cart, load_checkout, save_cart, save_checkout};
use crate::routes::cart::CartView;
use crate::services::PaymentOutcome;
use crate::state::AppState;

/// Non-sensitive form values echoed back after a failed submit.
///
/// Card details are never rendered back into the page.
#[derive(Clone, Default)]
pub struct CheckoutFormValues {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl From<&CheckoutForm> for CheckoutFormValues {
    fn from(form: &CheckoutForm) -> Self {
        Self {
            name: form.name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            address: form.address.clone(),
        }
    }
}

/// Checkout form page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/form.html")]
pub struct CheckoutFormTemplate {
    pub cart: CartView,
    pub values: CheckoutFormValues,
    pub errors: Vec<String>,
    pub processing: bool,
    pub delay: String,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmed.html")]
pub struct CheckoutConfirmedTemplate {
    pub order_id: String,
    pub customer_name: String,
    pub item_count: u64,
    pub total: String,
    pub delivery: String,
}

impl From<&OrderConfirmation> for CheckoutConfirmedTemplate {
    fn from(confirmation: &OrderConfirmation) -> Self {
        Self {
            order_id: confirmation.order_id.to_string(),
            customer_name: confirmation.customer_name.clone(),
            item_count: confirmation.summary.item_count(),
            total: confirmation.summary.total_price().display(),
            delivery: confirmation.delivery.describe(),
        }
    }
}

/// Human-readable payment delay, e.g. "about 2 seconds" or "about 50 milliseconds".
fn describe_delay(delay: Duration) -> String {
    if delay < Duration::from_secs(1) {
        return format!("about {} milliseconds", delay.as_millis());
    }
    let seconds = delay.as_secs() + u64::from(delay.subsec_nanos() > 0);
    if seconds == 1 {
        "about 1 second".to_string()
    } else {
        format!("about {seconds} seconds")
    }
}

/// Display the checkout form with the order summary.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<CheckoutFormTemplate> {
    let cart = load_cart(&session).await?;
    let flow = load_checkout(&session).await?;

    Ok(CheckoutFormTemplate {
        cart: CartView::from(&cart),
        values: CheckoutFormValues::default(),
        errors: Vec::new(),
        processing: flow.is_processing(),
        delay: describe_delay(state.config().checkout_delay),
    })
}

/// Submit the checkout and wait for the simulated payment.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await?;
    let mut flow = load_checkout(&session).await?;

    // A request that went away mid-payment leaves its checkout behind.
    if let Some(stale) = flow.processing_id() {
        if !state.payments().is_pending(stale) {
            tracing::warn!(checkout_id = %stale, "abandoning stale checkout");
            flow.abandon();
        }
    }

    let pending = match flow.submit(&form, &cart) {
        Ok(pending) => pending,
        Err(err @ (CheckoutError::MissingFields(_) | CheckoutError::EmptyCart)) => {
            tracing::debug!(error = %err, "checkout rejected");
            let page = CheckoutFormTemplate {
                cart: CartView::from(&cart),
                values: CheckoutFormValues::from(&form),
                errors: vec![err.to_string()],
                processing: false,
                delay: describe_delay(state.config().checkout_delay),
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
        Err(err) => return Err(err.into()),
    };

    let checkout_id = pending.checkout_id;
    let payment = state.payments().begin(checkout_id);
    save_checkout(&session, &flow).await?;
    // Make the processing state visible to a cancel request before waiting.
    session.save().await?;

    tracing::info!(
        %checkout_id,
        total = %pending.summary.total_price(),
        "checkout processing"
    );
    add_breadcrumb("checkout", "Payment started", None);

    match payment.wait().await {
        PaymentOutcome::Approved => {
            let confirmation = flow.complete(&mut cart)?;
            save_cart(&session, &cart).await?;
            save_checkout(&session, &flow).await?;

            tracing::info!(order_id = %confirmation.order_id, "order confirmed");
            add_breadcrumb("checkout", "Order confirmed", None);
            Ok(CheckoutConfirmedTemplate::from(&confirmation).into_response())
        }
        PaymentOutcome::Cancelled => {
            flow.abandon();
            save_checkout(&session, &flow).await?;

            tracing::info!(%checkout_id, "checkout cancelled");
            Ok(Redirect::to("/cart").into_response())
        }
    }
}

/// Cancel the session's in-flight payment.
#[instrument(skip(state, session))]
pub async fn cancel(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let mut flow = load_checkout(&session).await?;
    let checkout_id = flow.abandon().ok_or(CheckoutError::NotProcessing)?;

    if !state.payments().cancel(checkout_id) {
        tracing::debug!(%checkout_id, "no payment in flight to cancel");
    }
    save_checkout(&session, &flow).await?;

    Ok(Redirect::to("/cart"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_delay() {
        assert_eq!(describe_delay(Duration::from_millis(50)), "about 50 milliseconds");
        assert_eq!(describe_delay(Duration::from_secs(1)), "about 1 second");
        assert_eq!(describe_delay(Duration::from_millis(2000)), "about 2 seconds");
        assert_eq!(describe_delay(Duration::from_millis(2500)), "about 3 seconds");
    }
}
