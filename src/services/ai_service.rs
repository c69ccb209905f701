use anyhow::Result;

use crate::models::{Language, Recipe};

/// Trait for the generative AI backend (OpenRouter, stubs in tests, ...)
#[async_trait::async_trait]
pub trait AIService: Send + Sync {
    /// Propose recipes built from a subset of `ingredients`. An empty list
    /// means no coherent dish could be made.
    async fn generate_recipes(&self, ingredients: &[String], language: Language) -> Result<Vec<Recipe>>;

    /// Name the food ingredients visible in a base64 JPEG. An empty list
    /// means nothing was recognized.
    async fn identify_ingredients(&self, image_base64: &str, language: Language) -> Result<Vec<String>>;
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use crate::models::Ingredient;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Deterministic stand-in for the AI service.
    ///
    /// Recipe generation follows the service contract: it only ever uses
    /// ingredients it knows how to combine (chicken, lemon, rosemary) and
    /// leaves the rest out.
    #[derive(Default)]
    pub struct StubAIService {
        pub recognized: Vec<String>,
        pub fail: bool,
        pub delay: Option<Duration>,
        pub recipe_calls: AtomicUsize,
        pub scan_calls: AtomicUsize,
    }

    pub fn recipe(name: &str, ingredients: &[&str]) -> Recipe {
        Recipe {
            recipe_name: name.to_string(),
            description: format!("{} della Nonna", name),
            ingredients: ingredients
                .iter()
                .map(|i| Ingredient {
                    name: i.to_string(),
                    full_text: format!("q.b. di {}", i),
                })
                .collect(),
            instructions: vec!["Preparare".to_string(), "Servire".to_string()],
            difficulty: 2,
            preparation_time: "30 minuti".to_string(),
        }
    }

    #[async_trait::async_trait]
    impl AIService for StubAIService {
        async fn generate_recipes(&self, ingredients: &[String], _language: Language) -> Result<Vec<Recipe>> {
            self.recipe_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                anyhow::bail!("upstream timeout");
            }

            let known = ["pollo", "limone", "rosmarino"];
            let usable: Vec<&str> = known
                .iter()
                .copied()
                .filter(|k| ingredients.iter().any(|i| i.to_lowercase() == *k))
                .collect();

            if usable.is_empty() {
                return Ok(vec![]);
            }

            Ok(vec![recipe("Pollo al limone e rosmarino", &usable)])
        }

        async fn identify_ingredients(&self, image_base64: &str, _language: Language) -> Result<Vec<String>> {
            self.scan_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                anyhow::bail!("upstream timeout");
            }
            if image_base64.is_empty() {
                anyhow::bail!("Please provide image data.");
            }
            Ok(self.recognized.clone())
        }
    }

    #[tokio::test]
    async fn test_stub_leaves_out_incompatible_ingredient() {
        let ai = StubAIService::default();
        let pantry: Vec<String> = ["pollo", "limone", "rosmarino", "cioccolato"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let recipes = ai.generate_recipes(&pantry, Language::It).await.unwrap();

        assert_eq!(recipes.len(), 1);
        let names: Vec<&str> = recipes[0].ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["pollo", "limone", "rosmarino"]);
        assert!(!names.contains(&"cioccolato"));
    }
}
