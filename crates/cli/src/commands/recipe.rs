//! Print a kitchen recipe.

use std::fmt::Write as _;

use bistro_core::RecipeBook;

/// Render recipe `id` as plain text.
///
/// # Errors
///
/// Returns an error naming the available recipes if `id` is unknown.
pub fn render(book: &RecipeBook, id: &str) -> Result<String, String> {
    let Some(recipe) = book.find(id) else {
        let known: Vec<&str> = book.recipes().iter().map(|r| r.id.as_str()).collect();
        return Err(format!("unknown recipe '{id}' (available: {})", known.join(", ")));
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", recipe.name);
    let _ = writeln!(
        out,
        "Serves {} | {} minutes | {}",
        recipe.servings, recipe.total_time, recipe.difficulty
    );

    let _ = writeln!(out, "\nIngredients");
    for ingredient in &recipe.ingredients {
        let _ = write!(out, "  - {} ({})", ingredient.name, ingredient.weight);
        if let Some(notes) = &ingredient.notes {
            let _ = write!(out, ": {notes}");
        }
        out.push('\n');
    }

    let _ = writeln!(out, "\nSteps");
    for step in &recipe.steps {
        let _ = write!(out, "  {:>2}. {} [{} min", step.id, step.instruction, step.time_minutes);
        if let Some(temperature) = &step.temperature {
            let _ = write!(out, ", {temperature}");
        }
        out.push_str("]\n");
        if let Some(notes) = &step.notes {
            let _ = writeln!(out, "      {notes}");
        }
    }

    if !recipe.tips.is_empty() {
        let _ = writeln!(out, "\nTips");
        for tip in &recipe.tips {
            let _ = writeln!(out, "  * {tip}");
        }
    }
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_render_caesar_salad() {
        let text = render(&RecipeBook::house(), "caesar-salad").unwrap();
        assert!(text.starts_with("Caesar Salad\nServes 4 | 15 minutes | Easy"));
        assert!(text.contains("Romaine lettuce (2 heads (600g))"));
        assert!(text.contains("[8 min, 200°C]"));
        assert!(text.contains("Tips"));
    }

    #[test]
    fn test_unknown_recipe_lists_available() {
        let err = render(&RecipeBook::house(), "tiramisu").unwrap_err();
        assert!(err.contains("caesar-salad"));
    }
}
