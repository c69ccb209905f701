/// The user's working ingredient list for the current search.
/// Order is kept; names are unique ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pantry {
    items: Vec<String>,
}

impl Pantry {
    /// Returns whether the ingredient was added.
    pub fn add(&mut self, ingredient: &str) -> bool {
        let ingredient = ingredient.trim();
        if ingredient.is_empty() {
            return false;
        }

        let lower = ingredient.to_lowercase();
        if self.items.iter().any(|i| i.to_lowercase() == lower) {
            log::debug!("🥕 '{}' already in pantry", ingredient);
            return false;
        }

        self.items.push(ingredient.to_string());
        true
    }

    /// Exact-match removal. Returns whether something was removed.
    pub fn remove(&mut self, ingredient: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i != ingredient);
        self.items.len() != before
    }

    /// Add scanned names, skipping ones already present. Returns how many were new.
    pub fn merge<S: AsRef<str>>(&mut self, scanned: &[S]) -> usize {
        scanned.iter().filter(|name| self.add(name.as_ref())).count()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.items.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_case_insensitive_unique() {
        let mut pantry = Pantry::default();
        assert!(pantry.add("Pomodori"));
        assert!(!pantry.add("pomodori"));
        assert!(!pantry.add("  POMODORI "));
        assert!(pantry.add("Basilico"));

        assert_eq!(pantry.as_slice(), &["Pomodori".to_string(), "Basilico".to_string()]);
    }

    #[test]
    fn test_blank_entries_are_ignored() {
        let mut pantry = Pantry::default();
        assert!(!pantry.add(""));
        assert!(!pantry.add("   "));
        assert!(pantry.is_empty());
    }

    #[test]
    fn test_remove_is_exact() {
        let mut pantry = Pantry::default();
        pantry.add("Uova");

        assert!(!pantry.remove("uova"));
        assert!(pantry.remove("Uova"));
        assert!(pantry.is_empty());
    }

    #[test]
    fn test_merge_keeps_order_and_skips_duplicates() {
        let mut pantry = Pantry::default();
        pantry.add("limone");

        let added = pantry.merge(&["Pollo", "Limone", "Rosmarino", "pollo"]);

        assert_eq!(added, 2);
        assert_eq!(pantry.to_vec(), vec!["limone", "Pollo", "Rosmarino"]);
    }
}
