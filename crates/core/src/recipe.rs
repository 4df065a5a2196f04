//! Kitchen recipes and step tracking.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{Difficulty, RecipeId};

/// One ingredient line with its measured amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub weight: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A numbered preparation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeStep {
    pub id: u32,
    pub instruction: String,
    pub time_minutes: u32,
    #[serde(default)]
    pub temperature: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A dish as the kitchen prepares it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub servings: u32,
    /// Quoted total time in minutes.
    pub total_time: u32,
    pub difficulty: Difficulty,
    pub ingredients: Vec<RecipeIngredient>,
    pub steps: Vec<RecipeStep>,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl Recipe {
    /// Look up a step by its number.
    #[must_use]
    pub fn step(&self, id: u32) -> Option<&RecipeStep> {
        self.steps.iter().find(|step| step.id == id)
    }

    /// Sum of the per-step times.
    #[must_use]
    pub fn active_minutes(&self) -> u32 {
        self.steps.iter().map(|step| step.time_minutes).sum()
    }
}

/// Which steps of a recipe the cook has ticked off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeProgress {
    completed: BTreeSet<u32>,
}

impl RecipeProgress {
    /// Nothing completed yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            completed: BTreeSet::new(),
        }
    }

    /// Flip a step between done and not done; returns the new state.
    pub fn toggle(&mut self, step_id: u32) -> bool {
        if self.completed.remove(&step_id) {
            false
        } else {
            self.completed.insert(step_id);
            true
        }
    }

    #[must_use]
    pub fn is_completed(&self, step_id: u32) -> bool {
        self.completed.contains(&step_id)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Share of `recipe`'s steps that are done, 0 to 100.
    ///
    /// Ids that are not steps of `recipe` are not counted.
    #[must_use]
    pub fn percent_complete(&self, recipe: &Recipe) -> u8 {
        if recipe.steps.is_empty() {
            return 0;
        }
        let done = recipe
            .steps
            .iter()
            .filter(|step| self.completed.contains(&step.id))
            .count();
        let percent = done * 100 / recipe.steps.len();
        u8::try_from(percent).unwrap_or(100)
    }

    /// Clear every tick.
    pub fn reset(&mut self) {
        self.completed.clear();
    }
}

/// The kitchen's recipe collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    /// Wrap an arbitrary list of recipes.
    #[must_use]
    pub const fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// The house recipes.
    #[must_use]
    pub fn house() -> Self {
        Self::new(vec![caesar_salad()])
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id.as_str() == id)
    }

    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }
}

fn ingredient(name: &str, weight: &str, notes: &str) -> RecipeIngredient {
    RecipeIngredient {
        name: name.to_owned(),
        weight: weight.to_owned(),
        notes: Some(notes.to_owned()),
    }
}

fn step(
    id: u32,
    instruction: &str,
    time_minutes: u32,
    temperature: Option<&str>,
    notes: &str,
) -> RecipeStep {
    RecipeStep {
        id,
        instruction: instruction.to_owned(),
        time_minutes,
        temperature: temperature.map(str::to_owned),
        notes: Some(notes.to_owned()),
    }
}

fn caesar_salad() -> Recipe {
    Recipe {
        id: RecipeId::new("caesar-salad"),
        name: "Caesar Salad".to_owned(),
        servings: 4,
        total_time: 15,
        difficulty: Difficulty::Easy,
        ingredients: vec![
            ingredient("Romaine lettuce", "2 heads (600g)", "Crisp, cold lettuce"),
            ingredient("Parmesan cheese", "100g", "Freshly grated"),
            ingredient("Day-old bread", "150g", "For croutons"),
            ingredient("Garlic", "3 cloves (15g)", "Minced"),
            ingredient("Anchovies", "4 fillets (20g)", "Optional"),
            ingredient("Egg yolk", "1 large (20g)", "Room temperature"),
            ingredient("Lemon juice", "60ml", "Fresh squeezed"),
            ingredient("Olive oil", "120ml", "Extra virgin"),
            ingredient("Dijon mustard", "5ml", "1 tsp"),
            ingredient("Worcestershire sauce", "5ml", "1 tsp"),
            ingredient("Salt", "To taste", "Sea salt preferred"),
            ingredient("Black pepper", "To taste", "Freshly ground"),
        ],
        steps: vec![
            step(
                1,
                "Preheat oven and prepare croutons. Cut day-old bread into 1cm cubes, toss with olive oil and minced garlic.",
                3,
                Some("200°C"),
                "Use 2 tbsp olive oil and 1 clove garlic for croutons",
            ),
            step(
                2,
                "Bake croutons in preheated oven until golden brown and crispy.",
                8,
                Some("200°C"),
                "Shake pan halfway through for even browning",
            ),
            step(
                3,
                "Wash romaine lettuce thoroughly, dry completely, and tear into bite-sized pieces.",
                2,
                None,
                "Pat dry with paper towels - wet lettuce will dilute dressing",
            ),
            step(
                4,
                "Make dressing: In a large bowl, mash anchovies and remaining garlic into a paste.",
                1,
                None,
                "Use the back of a spoon or fork",
            ),
            step(
                5,
                "Whisk egg yolk, lemon juice, Dijon mustard, and Worcestershire sauce into the anchovy paste.",
                1,
                None,
                "Whisk vigorously to emulsify",
            ),
            step(
                6,
                "Slowly drizzle in olive oil while whisking constantly to create a creamy emulsion.",
                2,
                None,
                "Add oil drop by drop at first, then in a thin stream",
            ),
            step(
                7,
                "Season dressing with salt and pepper to taste.",
                1,
                None,
                "Start with 1/4 tsp salt, adjust as needed",
            ),
            step(
                8,
                "Add lettuce to bowl with dressing and toss gently to coat evenly.",
                1,
                None,
                "Use clean hands for best mixing",
            ),
            step(
                9,
                "Add half the Parmesan cheese and croutons, toss again.",
                1,
                None,
                "Reserve remaining cheese and croutons for garnish",
            ),
            step(
                10,
                "Plate immediately and top with remaining Parmesan and croutons. Serve fresh.",
                1,
                None,
                "Serve on chilled plates for best presentation",
            ),
        ],
        tips: vec![
            "Use only the freshest romaine lettuce for the best crunch".to_owned(),
            "Make sure lettuce is completely dry before dressing".to_owned(),
            "For food safety, use pasteurized eggs if serving to pregnant women or elderly"
                .to_owned(),
            "Dressing can be made 2 hours ahead and refrigerated".to_owned(),
            "Add croutons just before serving to maintain crispness".to_owned(),
        ],
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_house_book_has_caesar_salad() {
        let book = RecipeBook::house();
        let recipe = book.find("caesar-salad").unwrap();
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert_eq!(recipe.steps.len(), 10);
        assert_eq!(recipe.ingredients.len(), 12);
        assert!(book.find("beef-wellington").is_none());
    }

    #[test]
    fn test_active_minutes_sums_steps() {
        let book = RecipeBook::house();
        assert_eq!(book.find("caesar-salad").unwrap().active_minutes(), 21);
    }

    #[test]
    fn test_step_lookup() {
        let book = RecipeBook::house();
        let recipe = book.find("caesar-salad").unwrap();
        assert_eq!(recipe.step(2).unwrap().temperature.as_deref(), Some("200°C"));
        assert!(recipe.step(3).unwrap().temperature.is_none());
        assert!(recipe.step(11).is_none());
    }

    #[test]
    fn test_progress_toggle_and_percent() {
        let book = RecipeBook::house();
        let recipe = book.find("caesar-salad").unwrap();
        let mut progress = RecipeProgress::new();

        assert!(progress.toggle(1));
        assert!(progress.toggle(2));
        assert!(progress.toggle(3));
        assert_eq!(progress.percent_complete(recipe), 30);

        assert!(!progress.toggle(2));
        assert!(!progress.is_completed(2));
        assert_eq!(progress.completed_count(), 2);
        assert_eq!(progress.percent_complete(recipe), 20);
    }

    #[test]
    fn test_progress_ignores_foreign_step_ids() {
        let book = RecipeBook::house();
        let recipe = book.find("caesar-salad").unwrap();
        let mut progress = RecipeProgress::new();
        progress.toggle(42);
        assert_eq!(progress.percent_complete(recipe), 0);
    }

    #[test]
    fn test_progress_full_and_reset() {
        let book = RecipeBook::house();
        let recipe = book.find("caesar-salad").unwrap();
        let mut progress = RecipeProgress::new();
        for step in &recipe.steps {
            progress.toggle(step.id);
        }
        assert_eq!(progress.percent_complete(recipe), 100);

        progress.reset();
        assert_eq!(progress.completed_count(), 0);
    }
}
