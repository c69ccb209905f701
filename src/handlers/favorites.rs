use crate::models::Recipe;

pub const FAVORITES_LIMIT: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    LimitReached,
}

/// Saved recipes, unique by `recipe_name`, never more than the limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorites {
    recipes: Vec<Recipe>,
    limit: usize,
}

impl Default for Favorites {
    fn default() -> Self {
        Self::with_limit(FAVORITES_LIMIT)
    }
}

impl Favorites {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            recipes: Vec::new(),
            limit,
        }
    }

    /// Rebuild from a persisted list. Duplicates and anything past the
    /// limit are dropped so the invariants hold even for a tampered file.
    pub fn from_saved(saved: Vec<Recipe>) -> Self {
        let mut favorites = Self::default();
        let total = saved.len();

        for recipe in saved {
            if favorites.is_full() {
                break;
            }
            if !favorites.contains(&recipe.recipe_name) {
                favorites.recipes.push(recipe.normalized());
            }
        }

        if favorites.len() < total {
            log::warn!(
                "⚠️ Dropped {} saved favorite(s) (duplicates or over the limit of {})",
                total - favorites.len(),
                favorites.limit
            );
        }
        favorites
    }

    pub fn toggle(&mut self, recipe: &Recipe) -> ToggleOutcome {
        if self.remove(&recipe.recipe_name) {
            return ToggleOutcome::Removed;
        }
        if self.is_full() {
            return ToggleOutcome::LimitReached;
        }
        self.recipes.push(recipe.clone().normalized());
        ToggleOutcome::Added
    }

    /// Returns whether a recipe was removed.
    pub fn remove(&mut self, recipe_name: &str) -> bool {
        let before = self.recipes.len();
        self.recipes.retain(|r| r.recipe_name != recipe_name);
        self.recipes.len() != before
    }

    pub fn contains(&self, recipe_name: &str) -> bool {
        self.recipes.iter().any(|r| r.recipe_name == recipe_name)
    }

    pub fn is_full(&self) -> bool {
        self.recipes.len() >= self.limit
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.recipes.clear();
    }

    pub fn as_slice(&self) -> &[Recipe] {
        &self.recipes
    }
}
