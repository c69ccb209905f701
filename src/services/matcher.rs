//! Ingredient availability matching.
//!
//! Recipe ingredient names from the AI are canonical ("Pecorino Romano") while
//! pantry entries are typed by hand ("200g di pecorino romano stagionato").
//! Both sides are reduced to a core name and compared by substring
//! containment in either direction.

/// Units and filler words dropped from ingredient text, English and Italian.
const STOP_WORDS: &[&str] = &[
    // units
    "g", "kg", "ml", "l", "oz", "cup", "cups", "tsp", "tbsp", "tablespoon", "teaspoon",
    "teaspoons", "grammi", "grammo", "chilo", "litro", "cucchiaio", "cucchiaino", "tazza",
    "tazze", "pizzico",
    // fillers
    "of", "a", "an", "to", "taste", "di", "un", "una", "un'", "q.b.", "qb", "quanto", "basta",
];

fn is_stripped_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | ',' | '(' | ')')
}

/// Reduce free text to its core ingredient name.
///
/// Lower-cases, drops digits and `. , ( )`, collapses whitespace and removes
/// stop-words. Applying it to its own output returns the same string.
pub fn core_ingredient(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !is_stripped_char(*c))
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| !STOP_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when one core name contains the other. Empty cores never match.
pub fn matches(pantry_entry: &str, recipe_ingredient: &str) -> bool {
    let core_pantry = core_ingredient(pantry_entry);
    let core_recipe = core_ingredient(recipe_ingredient);

    if core_pantry.is_empty() || core_recipe.is_empty() {
        return false;
    }

    core_pantry.contains(&core_recipe) || core_recipe.contains(&core_pantry)
}

/// Whether a recipe ingredient is already covered by any pantry entry.
pub fn is_available(recipe_ingredient: &str, pantry: &[String]) -> bool {
    pantry.iter().any(|entry| matches(entry, recipe_ingredient))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_ingredient_strips_quantities_and_units() {
        assert_eq!(
            core_ingredient("200g di pecorino romano stagionato"),
            "pecorino romano stagionato"
        );
        assert_eq!(core_ingredient("Pecorino Romano"), "pecorino romano");
        assert_eq!(core_ingredient("2 tbsp of olive oil"), "olive oil");
        assert_eq!(core_ingredient("Sale q.b."), "sale");
        assert_eq!(core_ingredient("1 cucchiaio (colmo) di zucchero"), "colmo zucchero");
    }

    #[test]
    fn test_core_ingredient_can_be_empty() {
        assert_eq!(core_ingredient("200 g"), "");
        assert_eq!(core_ingredient("   "), "");
        assert_eq!(core_ingredient("quanto basta"), "");
    }

    #[test]
    fn test_core_ingredient_is_idempotent() {
        let inputs = [
            "200g di pecorino romano stagionato",
            "  2 Cups   of  FLOUR ",
            "Un pizzico di sale (fino)",
            "4 tuorli d'uovo grandi",
            "1,5 kg di patate",
        ];
        for input in inputs {
            let once = core_ingredient(input);
            assert_eq!(core_ingredient(&once), once, "input: {}", input);
        }
    }

    #[test]
    fn test_pantry_with_quantity_matches_canonical_name() {
        let pantry = vec!["200g di pecorino romano stagionato".to_string()];
        assert!(is_available("Pecorino Romano", &pantry));
    }

    #[test]
    fn test_less_specific_pantry_entry_matches() {
        let pantry = vec!["pecorino".to_string()];
        assert!(is_available("Pecorino Romano", &pantry));
    }

    #[test]
    fn test_unrelated_ingredients_do_not_match() {
        let pantry = vec!["guanciale".to_string()];
        assert!(!is_available("Cioccolato", &pantry));
    }

    #[test]
    fn test_empty_pantry_never_matches() {
        for name in ["Guanciale", "Uova", "Pecorino Romano", "a"] {
            assert!(!is_available(name, &[]));
        }
    }

    #[test]
    fn test_empty_core_never_matches() {
        let pantry = vec!["500 g".to_string()];
        assert!(!is_available("Farina", &pantry));
        assert!(!matches("farina", "100 ml"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let pantry = vec!["LIMONE".to_string()];
        assert!(is_available("limone", &pantry));
    }

    #[test]
    fn test_matches_is_symmetric() {
        let pairs = [
            ("200g di pecorino romano stagionato", "Pecorino Romano"),
            ("guanciale", "Cioccolato"),
            ("olive oil", "olive"),
            ("2 uova", "Uova fresche"),
            ("", "Pollo"),
        ];
        for (a, b) in pairs {
            assert_eq!(matches(a, b), matches(b, a), "pair: {:?}", (a, b));
        }
    }

    #[test]
    fn test_substring_false_positive_is_kept() {
        let pantry = vec!["olive oil".to_string()];
        assert!(is_available("olive", &pantry));
    }
}
