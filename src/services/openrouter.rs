use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::{Language, Recipe};
use crate::services::ai_service::AIService;

const CHAT_COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ContentPart {
    Text {
        #[serde(rename = "type")]
        content_type: String,
        text: String
    },
    ImageUrl {
        #[serde(rename = "type")]
        content_type: String,
        image_url: ImageData
    },
}

impl ContentPart {
    fn text(text: impl Into<String>) -> Self {
        ContentPart::Text {
            content_type: "text".to_string(),
            text: text.into(),
        }
    }

    fn jpeg(image_base64: &str) -> Self {
        ContentPart::ImageUrl {
            content_type: "image_url".to_string(),
            image_url: ImageData {
                url: format!("data:image/jpeg;base64,{}", image_base64),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ImageData {
    url: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    response_format: Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    content: String,
}

fn recipe_schema() -> Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": "recipes",
            "strict": true,
            "schema": {
                "type": "object",
                "properties": {
                    "recipes": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "recipeName": { "type": "string", "description": "The name of the recipe, in the requested language." },
                                "description": { "type": "string", "description": "A short, enticing description of the dish, in the requested language." },
                                "ingredients": {
                                    "type": "array",
                                    "items": {
                                        "type": "object",
                                        "properties": {
                                            "name": { "type": "string", "description": "Core name of the ingredient (e.g. 'Guanciale', 'Uova', 'Pecorino Romano')." },
                                            "fullText": { "type": "string", "description": "Ingredient with quantity and preparation notes (e.g. '100g di Guanciale')." }
                                        },
                                        "required": ["name", "fullText"],
                                        "additionalProperties": false
                                    }
                                },
                                "instructions": { "type": "array", "items": { "type": "string" } },
                                "difficulty": { "type": "integer", "description": "Difficulty from 1 (very easy) to 5 (very difficult)." },
                                "preparationTime": { "type": "string", "description": "Total preparation and cooking time (e.g. '45 minuti')." }
                            },
                            "required": ["recipeName", "description", "ingredients", "instructions", "difficulty", "preparationTime"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["recipes"],
                "additionalProperties": false
            }
        }
    })
}

fn ingredients_schema() -> Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": "ingredients",
            "strict": true,
            "schema": {
                "type": "object",
                "properties": {
                    "ingredients": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Identified food ingredients, in the requested language."
                    }
                },
                "required": ["ingredients"],
                "additionalProperties": false
            }
        }
    })
}

fn chef_instruction(language: Language) -> String {
    format!(
        "You are an expert Italian chef, acting as a traditional but tech-savvy Italian \"Nonna\". \
         Look at a list of available ingredients and select a *subset* of them that combine perfectly \
         into a single, authentic, popular, fast and high-quality Italian recipe. Your goal is not to use \
         as many ingredients as possible but to choose the best combination. For example, if given chicken, \
         lemon, rosemary and also chocolate, ignore the chocolate and propose a recipe with chicken, lemon \
         and rosemary. Every part of the response (name, description, ingredients, instructions) MUST be \
         written exclusively in {lang}. For each ingredient give both the core name and the full text with \
         quantity. If no suitable recipe can be found, return an empty recipes array.",
        lang = language.prompt_name()
    )
}

fn recipe_prompt(ingredients: &[String], language: Language) -> String {
    format!(
        "From the following list of available ingredients: [{list}], select the best ingredients to create \
         one fantastic and fast Italian recipe. Do not try to use all of them; focus on a coherent and \
         delicious dish. The entire output must be in {lang}. Provide the recipe name, a brief description, \
         the ingredients (each with 'name' and 'fullText'), step-by-step instructions, a difficulty rating \
         (1-5) and the total preparation time.",
        list = ingredients.join(", "),
        lang = language.prompt_name()
    )
}

fn scan_prompt(language: Language) -> String {
    format!(
        "Analyze the image and identify all the food ingredients present. Focus on raw ingredients if \
         possible. Return the ingredients as a JSON list of strings. The names MUST be in {}.",
        language.prompt_name()
    )
}

/// Strip a markdown code fence some models wrap around JSON output.
fn extract_json(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Accepts a bare array, a `{"recipes": [...]}` wrapper or a single recipe object.
fn parse_recipes(content: &str) -> Result<Vec<Recipe>> {
    let value: Value = serde_json::from_str(extract_json(content))?;

    let recipes: Vec<Recipe> = match value {
        Value::Array(list) => serde_json::from_value(Value::Array(list))?,
        Value::Object(mut map) => match map.remove("recipes") {
            Some(list) => serde_json::from_value(list)?,
            None => vec![serde_json::from_value(Value::Object(map))?],
        },
        other => anyhow::bail!("Unexpected recipe payload: {}", other),
    };

    Ok(recipes.into_iter().map(Recipe::normalized).collect())
}

/// Accepts a bare array of strings or an `{"ingredients": [...]}` wrapper.
fn parse_ingredients(content: &str) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(extract_json(content))?;

    let names: Vec<String> = match value {
        Value::Array(list) => serde_json::from_value(Value::Array(list))?,
        Value::Object(mut map) => match map.remove("ingredients") {
            Some(list) => serde_json::from_value(list)?,
            None => anyhow::bail!("Missing 'ingredients' field in response"),
        },
        other => anyhow::bail!("Unexpected ingredients payload: {}", other),
    };

    Ok(names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect())
}

pub struct OpenRouterService {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenRouterService {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        log::info!("🤖 Sending request to OpenRouter with model: {}", self.model);
        log::debug!("📤 Request payload size: {} bytes", serde_json::to_string(request)?.len());

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", "https://github.com/nonna-svuotafrigo")
            .header("X-Title", "Nonna Svuotafrigo AI")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        log::debug!("📥 OpenRouter response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await?;
            log::error!("❌ OpenRouter API error ({}): {}", status, error_text);
            anyhow::bail!("OpenRouter API error ({}): {}", status, error_text);
        }

        let response_text = response.text().await?;
        log::debug!("📄 Raw OpenRouter response size: {} bytes", response_text.len());

        let chat_response: ChatResponse = serde_json::from_str(&response_text)?;
        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow::anyhow!("OpenRouter returned no choices"))?;

        log::debug!("💬 OpenRouter response content: {}", content);
        Ok(content)
    }
}

#[async_trait::async_trait]
impl AIService for OpenRouterService {
    async fn generate_recipes(&self, ingredients: &[String], language: Language) -> Result<Vec<Recipe>> {
        if ingredients.is_empty() {
            anyhow::bail!("Please provide a list of ingredients.");
        }

        log::info!("🍝 Asking for a recipe from {} ingredients ({})", ingredients.len(), language);

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: vec![ContentPart::text(chef_instruction(language))],
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: vec![ContentPart::text(recipe_prompt(ingredients, language))],
                },
            ],
            max_tokens: 2000,
            response_format: recipe_schema(),
        };

        let content = self.complete(&request).await?;
        let recipes = parse_recipes(&content)?;

        log::info!("✅ Received {} recipe(s)", recipes.len());
        Ok(recipes)
    }

    async fn identify_ingredients(&self, image_base64: &str, language: Language) -> Result<Vec<String>> {
        if image_base64.is_empty() {
            anyhow::bail!("Please provide image data.");
        }

        log::debug!("🔄 Base64 image size: {} bytes", image_base64.len());

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![ContentPart::jpeg(image_base64), ContentPart::text(scan_prompt(language))],
            }],
            max_tokens: 500,
            response_format: ingredients_schema(),
        };

        let content = self.complete(&request).await?;
        let ingredients = parse_ingredients(&content)?;

        log::info!("✅ Identified {} ingredient(s) in image", ingredients.len());
        Ok(ingredients)
    }
}
