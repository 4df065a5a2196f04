//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Requests without the `HX-Request` header get a redirect to the cart page
//! instead of a fragment, so plain HTML forms work too. The cart itself
//! lives in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use bistro_core::{CartStore, CustomizationDraft, LineEntry, LineId, OrderSummary, Price};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session::{load_cart, save_cart};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub line_id: String,
    pub item_id: String,
    pub name: String,
    pub image: String,
    pub customizations: Vec<String>,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&LineEntry> for CartItemView {
    fn from(line: &LineEntry) -> Self {
        Self {
            line_id: line.line_id().to_string(),
            item_id: line.item_id().to_string(),
            name: line.item().name.clone(),
            image: line.item().image.clone(),
            customizations: line.customizations().to_vec(),
            quantity: line.quantity(),
            price: Price::usd(line.item().price).display(),
            line_price: Price::usd(line.line_total()).display(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    /// Distinct rows, shown as "Your Cart (N items)".
    pub line_count: usize,
    /// Sum of quantities, shown on the badge.
    pub item_count: u64,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

impl From<&CartStore> for CartView {
    fn from(cart: &CartStore) -> Self {
        let summary = cart.summary();
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            line_count: cart.len(),
            item_count: cart.total_item_count(),
            subtotal: summary.subtotal_price().display(),
            tax: summary.tax_price().display(),
            total: summary.total_price().display(),
        }
    }
}

/// Add to cart form data.
///
/// `customization` may repeat, so this is parsed from the raw body rather
/// than through `Form`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AddToCartForm {
    pub item_id: String,
    pub customizations: Vec<String>,
    pub quantity: Option<u32>,
}

impl AddToCartForm {
    /// Parse an `application/x-www-form-urlencoded` body.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if `item_id` is absent or `quantity`
    /// is not a number.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let mut form = Self::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            match key.as_ref() {
                "item_id" => form.item_id = value.into_owned(),
                "customization" => form.customizations.push(value.into_owned()),
                "quantity" => {
                    let quantity = value
                        .trim()
                        .parse()
                        .map_err(|_| AppError::BadRequest(format!("invalid quantity: {value}")))?;
                    form.quantity = Some(quantity);
                }
                _ => {}
            }
        }
        if form.item_id.is_empty() {
            return Err(AppError::BadRequest("missing item_id".to_string()));
        }
        Ok(form)
    }
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub line_id: LineId,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub line_id: LineId,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key("HX-Request")
}

/// Respond to a cart mutation with a fragment for HTMX or a redirect.
fn cart_changed(headers: &HeaderMap, cart: &CartStore) -> Response {
    if is_htmx(headers) {
        (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartItemsTemplate {
                cart: CartView::from(cart),
            },
        )
            .into_response()
    } else {
        Redirect::to("/cart").into_response()
    }
}

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartShowTemplate> {
    let cart = load_cart(&session).await?;
    Ok(CartShowTemplate {
        cart: CartView::from(&cart),
    })
}

/// Add a customized item to the cart.
///
/// The selection goes through a [`CustomizationDraft`], so options the item
/// does not offer are dropped and quantity must be within the dialog's range.
#[instrument(skip(state, session, headers, body))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let form = AddToCartForm::parse(&body)?;
    let item = state
        .catalog()
        .find(&form.item_id)
        .ok_or_else(|| AppError::NotFound(format!("menu item {}", form.item_id)))?;

    let mut draft = CustomizationDraft::new(item);
    for customization in &form.customizations {
        draft.toggle(customization, true);
    }
    let quantity = form.quantity.unwrap_or(1);
    if !draft.set_quantity(quantity) {
        return Err(AppError::BadRequest(format!(
            "quantity must be between 1 and {}",
            bistro_core::MAX_DRAFT_QUANTITY
        )));
    }

    let mut cart = load_cart(&session).await?;
    let line_id = draft.apply(&mut cart);
    save_cart(&session, &cart).await?;

    tracing::info!(item_id = %item.id, %line_id, quantity, "added to cart");
    add_breadcrumb("cart", "Added item", Some(&[("item_id", item.id.as_str())]));

    if is_htmx(&headers) {
        Ok((
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartCountTemplate {
                count: cart.total_item_count(),
            },
        )
            .into_response())
    } else {
        Ok(Redirect::to("/cart").into_response())
    }
}

/// Set a line's quantity; zero or below removes the line.
#[instrument(skip(session, headers))]
pub async fn update(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await?;
    if !cart.update_line_quantity(form.line_id, form.quantity) {
        tracing::debug!(line_id = %form.line_id, "update for unknown line ignored");
    }
    save_cart(&session, &cart).await?;

    Ok(cart_changed(&headers, &cart))
}

/// Remove one line from the cart.
#[instrument(skip(session, headers))]
pub async fn remove(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await?;
    if cart.remove_line(form.line_id) {
        add_breadcrumb("cart", "Removed line", None);
    }
    save_cart(&session, &cart).await?;

    Ok(cart_changed(&headers, &cart))
}

/// Empty the cart.
#[instrument(skip(session, headers))]
pub async fn clear(session: Session, headers: HeaderMap) -> Result<Response> {
    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(cart_changed(&headers, &cart))
}

/// Cart count badge fragment.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<CartCountTemplate> {
    let cart = load_cart(&session).await?;
    Ok(CartCountTemplate {
        count: cart.total_item_count(),
    })
}

/// Current cart priced as JSON.
#[instrument(skip(session))]
pub async fn summary(session: Session) -> Result<Json<OrderSummary>> {
    let cart = load_cart(&session).await?;
    Ok(Json(cart.summary()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bistro_core::Catalog;

    use super::*;

    #[test]
    fn test_parse_add_form_collects_repeated_customizations() {
        let form =
            AddToCartForm::parse(b"item_id=2&customization=Bacon&customization=Extra+cheese&quantity=3")
                .unwrap();
        assert_eq!(form.item_id, "2");
        assert_eq!(form.customizations, ["Bacon", "Extra cheese"]);
        assert_eq!(form.quantity, Some(3));
    }

    #[test]
    fn test_parse_add_form_requires_item() {
        assert!(matches!(
            AddToCartForm::parse(b"quantity=1"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_parse_add_form_rejects_bad_quantity() {
        assert!(matches!(
            AddToCartForm::parse(b"item_id=1&quantity=lots"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_cart_view_formats_money() {
        let catalog = Catalog::house_menu();
        let mut cart = CartStore::new();
        let salad = catalog.find("1").unwrap();
        cart.add_item(salad, Vec::<String>::new());
        cart.add_item(salad, Vec::<String>::new());
        cart.add_item(catalog.find("2").unwrap(), ["Bacon"]);

        let view = CartView::from(&cart);
        assert_eq!(view.line_count, 2);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.items[0].line_price, "$29.98");
        assert_eq!(view.subtotal, "$48.97");
        assert_eq!(view.tax, "$4.90");
        assert_eq!(view.total, "$53.87");
    }
}
