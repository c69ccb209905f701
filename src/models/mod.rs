use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,      // Canonical short label (e.g. "Pecorino Romano")
    pub full_text: String, // Quantity and prep notes (e.g. "100g di Pecorino Romano grattugiato")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub recipe_name: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub difficulty: u8, // 1 (very easy) ..= 5 (very difficult)
    pub preparation_time: String,
}

impl Recipe {
    pub const MIN_DIFFICULTY: u8 = 1;
    pub const MAX_DIFFICULTY: u8 = 5;

    /// Clamp fields coming from the AI service into their documented ranges.
    pub fn normalized(mut self) -> Self {
        self.difficulty = self
            .difficulty
            .clamp(Self::MIN_DIFFICULTY, Self::MAX_DIFFICULTY);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    It,
    En,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Language::It => "it",
            Language::En => "en",
        };
        write!(f, "{}", s)
    }
}

impl Language {
    pub fn from_string(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "it" | "ita" | "italiano" | "italian" => Some(Language::It),
            "en" | "eng" | "english" | "inglese" => Some(Language::En),
            _ => None,
        }
    }

    /// Language name as written into AI prompts.
    pub fn prompt_name(&self) -> &'static str {
        match self {
            Language::It => "Italiano",
            Language::En => "English",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_uses_camel_case_fields() {
        let json = r#"{
            "recipeName": "Spaghetti alla Carbonara",
            "description": "Un classico romano",
            "ingredients": [
                { "name": "Guanciale", "fullText": "100g di Guanciale" },
                { "name": "Pecorino Romano", "fullText": "50g di Pecorino Romano" }
            ],
            "instructions": ["Tagliare il guanciale", "Cuocere la pasta"],
            "difficulty": 2,
            "preparationTime": "25 minuti"
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();

        assert_eq!(recipe.recipe_name, "Spaghetti alla Carbonara");
        assert_eq!(recipe.ingredients[1].full_text, "50g di Pecorino Romano");
        assert_eq!(recipe.preparation_time, "25 minuti");

        let back = serde_json::to_value(&recipe).unwrap();
        assert!(back.get("recipeName").is_some());
        assert!(back["ingredients"][0].get("fullText").is_some());
    }

    #[test]
    fn test_difficulty_is_clamped() {
        let recipe = Recipe {
            recipe_name: "Pasta".to_string(),
            description: String::new(),
            ingredients: vec![],
            instructions: vec![],
            difficulty: 9,
            preparation_time: "10 minuti".to_string(),
        };
        assert_eq!(recipe.clone().normalized().difficulty, 5);

        let easy = Recipe { difficulty: 0, ..recipe };
        assert_eq!(easy.normalized().difficulty, 1);
    }

    #[test]
    fn test_language_from_string() {
        assert_eq!(Language::from_string("IT"), Some(Language::It));
        assert_eq!(Language::from_string(" en "), Some(Language::En));
        assert_eq!(Language::from_string("fr"), None);
        assert_eq!(Language::En.to_string(), "en");
        assert_eq!(Language::It.prompt_name(), "Italiano");
    }
}
