use anyhow::Result;
use std::env;
use std::path::PathBuf;

use crate::models::Language;

const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Runtime configuration, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub openrouter_api_key: String,
    pub openrouter_model: String,
    pub language: Language,
    pub data_dir: PathBuf,
    pub camera_snapshot_path: PathBuf,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let openrouter_api_key = lookup("OPENROUTER_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("OPENROUTER_API_KEY must be set in .env file"))?;

        let openrouter_model = lookup("OPENROUTER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let language = match lookup("APP_LANGUAGE") {
            Some(raw) => Language::from_string(&raw).unwrap_or_else(|| {
                log::warn!("⚠️ Unknown APP_LANGUAGE '{}', falling back to Italian", raw);
                Language::It
            }),
            None => Language::It,
        };

        let data_dir = PathBuf::from(lookup("DATA_DIR").unwrap_or_else(|| "./data".to_string()));

        let camera_snapshot_path = lookup("CAMERA_SNAPSHOT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("camera").join("latest.jpg"));

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            openrouter_api_key,
            openrouter_model,
            language,
            data_dir,
            camera_snapshot_path,
            bind_addr,
        })
    }
}
