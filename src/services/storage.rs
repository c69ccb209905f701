use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{Recipe, User};

const USER_KEY: &str = "nonna-ai-user";
const FAVORITES_KEY: &str = "favoriteRecipes";

/// Durable local state: the registered user and the favorites list.
///
/// Reads never fail: an absent or unreadable record is "no data". Writes
/// report errors so callers can log them, but callers never abort on them.
#[async_trait::async_trait]
pub trait StateStore: Send + Sync {
    async fn load_user(&self) -> Option<User>;
    async fn save_user(&self, user: &User) -> Result<()>;
    async fn clear_user(&self) -> Result<()>;

    async fn load_favorites(&self) -> Vec<Recipe>;
    async fn save_favorites(&self, favorites: &[Recipe]) -> Result<()>;
    async fn clear_favorites(&self) -> Result<()>;
}

/// One JSON file per record under a data directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        log::info!("📁 Local store ready at {}", dir.display());
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::error!("❌ Failed to read {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::error!("❌ Failed to parse {} from {}: {}", key, path.display(), e);
                None
            }
        }
    }

    async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let payload = serde_json::to_vec_pretty(value)?;

        tokio::fs::write(&tmp, &payload).await?;
        tokio::fs::rename(&tmp, &path).await?;

        log::debug!("💾 Saved {} ({} bytes)", key, payload.len());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait::async_trait]
impl StateStore for JsonFileStore {
    async fn load_user(&self) -> Option<User> {
        self.read(USER_KEY).await
    }

    async fn save_user(&self, user: &User) -> Result<()> {
        self.write(USER_KEY, user).await
    }

    async fn clear_user(&self) -> Result<()> {
        self.remove(USER_KEY).await
    }

    async fn load_favorites(&self) -> Vec<Recipe> {
        self.read(FAVORITES_KEY).await.unwrap_or_default()
    }

    async fn save_favorites(&self, favorites: &[Recipe]) -> Result<()> {
        self.write(FAVORITES_KEY, favorites).await
    }

    async fn clear_favorites(&self) -> Result<()> {
        self.remove(FAVORITES_KEY).await
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ingredient;

    fn sample_recipe(name: &str) -> Recipe {
        Recipe {
            recipe_name: name.to_string(),
            description: "Buonissimo".to_string(),
            ingredients: vec![Ingredient {
                name: "Pollo".to_string(),
                full_text: "500g di pollo".to_string(),
            }],
            instructions: vec!["Cuocere".to_string()],
            difficulty: 2,
            preparation_time: "40 minuti".to_string(),
        }
    }

    fn sample_user() -> User {
        User {
            first_name: "Maria".to_string(),
            last_name: "Rossi".to_string(),
            email: "maria@example.it".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_records_read_as_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).await.unwrap();

        assert!(store.load_user().await.is_none());
        assert!(store.load_favorites().await.is_empty());
    }

    #[tokio::test]
    async fn test_user_and_favorites_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = JsonFileStore::new(dir.path()).await.unwrap();
            store.save_user(&sample_user()).await.unwrap();
            store
                .save_favorites(&[sample_recipe("Pollo al limone")])
                .await
                .unwrap();
        }

        let store = JsonFileStore::new(dir.path()).await.unwrap();
        assert_eq!(store.load_user().await, Some(sample_user()));
        let favorites = store.load_favorites().await;
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].recipe_name, "Pollo al limone");
    }

    #[tokio::test]
    async fn test_corrupt_favorites_degrade_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).await.unwrap();
        std::fs::write(store.dir().join("favoriteRecipes.json"), "{not json").unwrap();
        std::fs::write(store.dir().join("nonna-ai-user.json"), "[1, 2]").unwrap();

        assert!(store.load_favorites().await.is_empty());
        assert!(store.load_user().await.is_none());
    }

    #[tokio::test]
    async fn test_clear_removes_records_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).await.unwrap();
        store.save_user(&sample_user()).await.unwrap();
        store.save_favorites(&[sample_recipe("Carbonara")]).await.unwrap();

        store.clear_user().await.unwrap();
        store.clear_favorites().await.unwrap();
        store.clear_user().await.unwrap();

        assert!(store.load_user().await.is_none());
        assert!(store.load_favorites().await.is_empty());
    }

    #[tokio::test]
    async fn test_records_use_camel_case_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).await.unwrap();
        store.save_user(&sample_user()).await.unwrap();

        let raw = std::fs::read_to_string(store.dir().join("nonna-ai-user.json")).unwrap();
        assert!(raw.contains("\"firstName\""));
        assert!(raw.contains("\"email\""));
    }
}
