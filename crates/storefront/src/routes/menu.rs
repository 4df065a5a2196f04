//! Menu route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use bistro_core::{MAX_DRAFT_QUANTITY, MenuItem, Price};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Menu item display data for templates.
#[derive(Clone)]
pub struct MenuItemView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub customizable: bool,
}

impl From<&MenuItem> for MenuItemView {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: Price::usd(item.price).display(),
            image: item.image.clone(),
            category: item.category.clone(),
            customizable: item.is_customizable(),
        }
    }
}

/// Category filter tab.
#[derive(Clone)]
pub struct CategoryTab {
    pub name: String,
    pub active: bool,
}

/// Menu listing query parameters.
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
}

/// Menu grid template.
#[derive(Template, WebTemplate)]
#[template(path = "menu/index.html")]
pub struct MenuIndexTemplate {
    pub items: Vec<MenuItemView>,
    pub categories: Vec<CategoryTab>,
    pub showing_all: bool,
}

/// Customize page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu/customize.html")]
pub struct MenuCustomizeTemplate {
    pub item: MenuItemView,
    pub ingredients: Vec<String>,
    pub options: Vec<String>,
    pub max_quantity: u32,
}

/// Display the menu grid, optionally filtered by category.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> MenuIndexTemplate {
    let catalog = state.catalog();
    let selected = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|category| !category.is_empty());

    let items = match selected {
        Some(category) => catalog.in_category(category).map(MenuItemView::from).collect(),
        None => catalog.items().iter().map(MenuItemView::from).collect(),
    };

    let categories = catalog
        .categories()
        .into_iter()
        .map(|name| CategoryTab {
            active: selected.is_some_and(|s| s.eq_ignore_ascii_case(name)),
            name: name.to_string(),
        })
        .collect();

    MenuIndexTemplate {
        items,
        categories,
        showing_all: selected.is_none(),
    }
}

/// Display the customize page for one item.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<MenuCustomizeTemplate> {
    let item = state
        .catalog()
        .find(&id)
        .ok_or_else(|| AppError::NotFound(format!("menu item {id}")))?;

    Ok(MenuCustomizeTemplate {
        item: MenuItemView::from(item),
        ingredients: item.ingredients.clone(),
        options: item.customizable_ingredients.clone(),
        max_quantity: MAX_DRAFT_QUANTITY,
    })
}
