//! Kitchen recipe pages.
//!
//! Step ticks are kept per session and per recipe.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use bistro_core::{Recipe, RecipeProgress};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::models::session::{load_recipe_progress, save_recipe_progress};
use crate::state::AppState;

/// Ingredient display data.
#[derive(Clone)]
pub struct IngredientView {
    pub name: String,
    pub weight: String,
    pub notes: Option<String>,
}

/// Step display data.
#[derive(Clone)]
pub struct StepView {
    pub id: u32,
    pub instruction: String,
    pub time_minutes: u32,
    pub temperature: Option<String>,
    pub notes: Option<String>,
    pub completed: bool,
}

/// Recipe page template.
#[derive(Template, WebTemplate)]
#[template(path = "kitchen/recipe.html")]
pub struct RecipeTemplate {
    pub id: String,
    pub name: String,
    pub servings: u32,
    pub total_time: u32,
    pub active_minutes: u32,
    pub difficulty: String,
    pub difficulty_class: &'static str,
    pub ingredients: Vec<IngredientView>,
    pub steps: Vec<StepView>,
    pub tips: Vec<String>,
    pub completed_count: usize,
    pub percent_complete: u8,
}

/// Step list fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/recipe_steps.html")]
pub struct RecipeStepsTemplate {
    pub id: String,
    pub steps: Vec<StepView>,
    pub completed_count: usize,
    pub percent_complete: u8,
}

fn step_views(recipe: &Recipe, progress: &RecipeProgress) -> Vec<StepView> {
    recipe
        .steps
        .iter()
        .map(|step| StepView {
            id: step.id,
            instruction: step.instruction.clone(),
            time_minutes: step.time_minutes,
            temperature: step.temperature.clone(),
            notes: step.notes.clone(),
            completed: progress.is_completed(step.id),
        })
        .collect()
}

impl RecipeTemplate {
    fn new(recipe: &Recipe, progress: &RecipeProgress) -> Self {
        Self {
            id: recipe.id.to_string(),
            name: recipe.name.clone(),
            servings: recipe.servings,
            total_time: recipe.total_time,
            active_minutes: recipe.active_minutes(),
            difficulty: recipe.difficulty.to_string(),
            difficulty_class: recipe.difficulty.slug(),
            ingredients: recipe
                .ingredients
                .iter()
                .map(|ingredient| IngredientView {
                    name: ingredient.name.clone(),
                    weight: ingredient.weight.clone(),
                    notes: ingredient.notes.clone(),
                })
                .collect(),
            steps: step_views(recipe, progress),
            tips: recipe.tips.clone(),
            completed_count: progress.completed_count(),
            percent_complete: progress.percent_complete(recipe),
        }
    }
}

fn find_recipe<'a>(state: &'a AppState, id: &str) -> Result<&'a Recipe> {
    state
        .recipes()
        .find(id)
        .ok_or_else(|| AppError::NotFound(format!("recipe {id}")))
}

/// Display a recipe with this session's step progress.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<RecipeTemplate> {
    let recipe = find_recipe(&state, &id)?;
    let progress = load_recipe_progress(&session, &id).await?;
    Ok(RecipeTemplate::new(recipe, &progress))
}

/// Toggle one step's completion.
#[instrument(skip(state, session, headers))]
pub async fn toggle_step(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path((id, step_id)): Path<(String, u32)>,
) -> Result<Response> {
    let recipe = find_recipe(&state, &id)?;
    if recipe.step(step_id).is_none() {
        return Err(AppError::NotFound(format!("step {step_id} of recipe {id}")));
    }

    let mut progress = load_recipe_progress(&session, &id).await?;
    let completed = progress.toggle(step_id);
    save_recipe_progress(&session, &id, &progress).await?;
    tracing::debug!(recipe = %id, step_id, completed, "step toggled");

    if headers.contains_key("HX-Request") {
        Ok(RecipeStepsTemplate {
            id: recipe.id.to_string(),
            steps: step_views(recipe, &progress),
            completed_count: progress.completed_count(),
            percent_complete: progress.percent_complete(recipe),
        }
        .into_response())
    } else {
        Ok(Redirect::to(&format!("/kitchen/recipes/{id}")).into_response())
    }
}
