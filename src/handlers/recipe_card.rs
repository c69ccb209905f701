use serde::Serialize;

use crate::models::Recipe;
use crate::services::matcher;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientView {
    pub name: String,
    pub full_text: String,
    pub available: bool,
}

/// A recipe as the client renders it: each ingredient flagged against the
/// current pantry, plus the favorite heart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView {
    pub recipe_name: String,
    pub description: String,
    pub ingredients: Vec<IngredientView>,
    pub instructions: Vec<String>,
    pub difficulty: u8,
    pub preparation_time: String,
    pub is_favorite: bool,
}

impl RecipeView {
    pub fn new(recipe: &Recipe, pantry: &[String], is_favorite: bool) -> Self {
        let ingredients = recipe
            .ingredients
            .iter()
            .map(|ingredient| IngredientView {
                name: ingredient.name.clone(),
                full_text: ingredient.full_text.clone(),
                available: matcher::is_available(&ingredient.name, pantry),
            })
            .collect();

        Self {
            recipe_name: recipe.recipe_name.clone(),
            description: recipe.description.clone(),
            ingredients,
            instructions: recipe.instructions.clone(),
            difficulty: recipe.difficulty,
            preparation_time: recipe.preparation_time.clone(),
            is_favorite,
        }
    }

    /// Names of ingredients the user still has to buy.
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.ingredients
            .iter()
            .filter(|i| !i.available)
            .map(|i| i.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ai_service::testing::recipe;

    #[test]
    fn test_ingredients_are_flagged_against_pantry() {
        let carbonara = recipe("Carbonara", &["Guanciale", "Pecorino Romano", "Uova"]);
        let pantry = vec!["200g di pecorino romano stagionato".to_string(), "guanciale".to_string()];

        let view = RecipeView::new(&carbonara, &pantry, true);

        let flags: Vec<bool> = view.ingredients.iter().map(|i| i.available).collect();
        assert_eq!(flags, vec![true, true, false]);
        assert_eq!(view.missing().collect::<Vec<_>>(), vec!["Uova"]);
        assert!(view.is_favorite);
    }

    #[test]
    fn test_empty_pantry_marks_everything_missing() {
        let carbonara = recipe("Carbonara", &["Guanciale", "Uova"]);

        let view = RecipeView::new(&carbonara, &[], false);

        assert!(view.ingredients.iter().all(|i| !i.available));
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let view = RecipeView::new(&recipe("Carbonara", &["Uova"]), &[], false);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["recipeName"], "Carbonara");
        assert_eq!(json["isFavorite"], false);
        assert_eq!(json["ingredients"][0]["fullText"], "q.b. di Uova");
        assert_eq!(json["ingredients"][0]["available"], false);
    }
}
