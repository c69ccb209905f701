use base64::{engine::general_purpose, Engine};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::handlers::favorites::{Favorites, ToggleOutcome};
use crate::handlers::pantry::Pantry;
use crate::handlers::recipe_card::RecipeView;
use crate::handlers::session::{self, LoginForm, RegistrationForm};
use crate::i18n::{Message, Notice};
use crate::models::{Language, Recipe, User};
use crate::services::camera::{is_jpeg, CameraDevice, CameraError, CameraSession, FacingMode};
use crate::services::{AIService, StateStore};

/// Everything the UI shows, in one place.
#[derive(Debug, Default)]
pub struct AppState {
    pub user: Option<User>,
    pub pantry: Pantry,
    pub recipes: Vec<Recipe>,
    pub favorites: Favorites,
    pub last_error: Option<Message>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSnapshot {
    pub user: Option<User>,
    pub language: Language,
    pub pantry: Vec<String>,
    pub recipes: Vec<RecipeView>,
    pub favorites_count: usize,
    pub favorites_limit: usize,
    pub searching: bool,
    pub scanning: bool,
    pub error: Option<Notice>,
}

/// Marks an action as running; cleared on drop.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, AppError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AppError::Busy)?;
        Ok(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Strip the `data:image/jpeg;base64,` prefix a browser canvas produces.
fn strip_data_url(image: &str) -> &str {
    let image = image.trim();
    match image.split_once(',') {
        Some((header, data)) if header.starts_with("data:") => data,
        _ => image,
    }
}

pub struct AppHandler {
    state: Mutex<AppState>,
    store: Arc<dyn StateStore>,
    ai: Arc<dyn AIService>,
    camera: Arc<dyn CameraDevice>,
    language: Language,
    searching: AtomicBool,
    scanning: AtomicBool,
}

impl AppHandler {
    /// Build the handler, restoring the saved session and favorites.
    pub async fn new(
        store: Arc<dyn StateStore>,
        ai: Arc<dyn AIService>,
        camera: Arc<dyn CameraDevice>,
        language: Language,
    ) -> Self {
        let user = store.load_user().await;
        let favorites = Favorites::from_saved(store.load_favorites().await);

        match &user {
            Some(u) => log::info!("👤 Restored session for {} ({} favorites)", u.email, favorites.len()),
            None => log::info!("👤 No saved session"),
        }

        Self {
            state: Mutex::new(AppState {
                user,
                favorites,
                ..Default::default()
            }),
            store,
            ai,
            camera,
            language,
            searching: AtomicBool::new(false),
            scanning: AtomicBool::new(false),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn require_user(state: &AppState) -> Result<(), AppError> {
        if state.user.is_none() {
            return Err(AppError::NotAuthenticated);
        }
        Ok(())
    }

    async fn persist_favorites(&self, favorites: &Favorites) {
        if let Err(e) = self.store.save_favorites(favorites.as_slice()).await {
            log::error!("❌ Failed to save favorites: {}", e);
        }
    }

    fn recipe_views(&self, state: &AppState, recipes: &[Recipe]) -> Vec<RecipeView> {
        recipes
            .iter()
            .map(|r| {
                RecipeView::new(
                    r,
                    state.pantry.as_slice(),
                    state.favorites.contains(&r.recipe_name),
                )
            })
            .collect()
    }

    // --- session ---

    pub async fn register(&self, form: &RegistrationForm) -> Result<User, AppError> {
        let user = session::validate_registration(form)?;

        if let Err(e) = self.store.save_user(&user).await {
            log::error!("❌ Failed to save user: {}", e);
        }

        self.state.lock().await.user = Some(user.clone());
        log::info!("✅ Registered and logged in: {}", user.email);
        Ok(user)
    }

    pub async fn login(&self, form: &LoginForm) -> Result<User, AppError> {
        let stored = self.store.load_user().await;
        let user = session::authenticate(stored.as_ref(), form).map_err(|e| {
            log::warn!("🔒 Login rejected: {}", e);
            e
        })?;

        self.state.lock().await.user = Some(user.clone());
        log::info!("✅ Logged in: {}", user.email);
        Ok(user)
    }

    /// End the session and wipe favorites, in memory and on disk.
    pub async fn logout(&self) {
        let mut state = self.state.lock().await;
        if let Some(user) = state.user.take() {
            log::info!("👋 Logged out: {}", user.email);
        }
        state.favorites.clear();
        state.pantry.clear();
        state.recipes.clear();
        state.last_error = None;
        drop(state);

        if let Err(e) = self.store.clear_user().await {
            log::error!("❌ Failed to remove saved user: {}", e);
        }
        if let Err(e) = self.store.clear_favorites().await {
            log::error!("❌ Failed to remove saved favorites: {}", e);
        }
    }

    // --- pantry ---

    pub async fn add_ingredient(&self, ingredient: &str) -> Result<Vec<String>, AppError> {
        let mut state = self.state.lock().await;
        Self::require_user(&state)?;

        if state.pantry.add(ingredient) {
            log::debug!("🥕 Added '{}' to pantry", ingredient.trim());
        }
        Ok(state.pantry.to_vec())
    }

    /// The "+" next to a missing recipe ingredient.
    pub async fn add_missing_ingredient(&self, ingredient_name: &str) -> Result<Vec<String>, AppError> {
        self.add_ingredient(ingredient_name).await
    }

    pub async fn remove_ingredient(&self, ingredient: &str) -> Result<Vec<String>, AppError> {
        let mut state = self.state.lock().await;
        Self::require_user(&state)?;

        state.pantry.remove(ingredient);
        Ok(state.pantry.to_vec())
    }

    /// Empty the pantry and drop the current results.
    pub async fn clear_ingredients(&self) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        Self::require_user(&state)?;

        state.pantry.clear();
        state.recipes.clear();
        state.last_error = None;
        Ok(())
    }

    // --- recipe search ---

    pub async fn find_recipes(&self) -> Result<Vec<RecipeView>, AppError> {
        let pantry = {
            let mut state = self.state.lock().await;
            Self::require_user(&state)?;

            if state.pantry.is_empty() {
                state.last_error = Some(Message::AddIngredientsFirst);
                return Err(AppError::Precondition(Message::AddIngredientsFirst));
            }
            state.pantry.to_vec()
        };

        let _in_flight = InFlight::acquire(&self.searching)?;
        {
            let mut state = self.state.lock().await;
            state.recipes.clear();
            state.last_error = None;
        }

        log::info!("🔎 Searching recipes for {} ingredient(s)", pantry.len());
        let result = self.ai.generate_recipes(&pantry, self.language).await;

        let mut state = self.state.lock().await;
        if state.user.is_none() {
            log::info!("👋 Session ended during search, discarding results");
            return Err(AppError::NotAuthenticated);
        }
        match result {
            Ok(recipes) if recipes.is_empty() => {
                log::info!("🤷 No recipe found for {:?}", pantry);
                state.last_error = Some(Message::NoRecipeFound);
                Err(AppError::NoRecipeFound)
            }
            Ok(recipes) => {
                state.recipes = recipes;
                let views = self.recipe_views(&state, &state.recipes);
                for view in &views {
                    log::debug!(
                        "🍝 {}: missing {:?}",
                        view.recipe_name,
                        view.missing().collect::<Vec<_>>()
                    );
                }
                Ok(views)
            }
            Err(e) => {
                log::error!("❌ Recipe generation failed: {}", e);
                state.last_error = Some(Message::RecipeServiceError);
                Err(AppError::RecipeService(e))
            }
        }
    }

    // --- ingredient scanning ---

    /// Open the scanner view: acquire the camera to surface access errors
    /// early, then release it again.
    pub async fn probe_camera(&self) -> Result<(), AppError> {
        Self::require_user(&*self.state.lock().await)?;

        let camera = CameraSession::open(self.camera.as_ref(), FacingMode::Environment)
            .await
            .map_err(|e| {
                log::error!("📷 Camera error: {}", e);
                e
            })?;
        camera.close();
        Ok(())
    }

    /// Capture a frame from the camera and add what the AI recognizes.
    pub async fn scan_with_camera(&self) -> Result<Vec<String>, AppError> {
        Self::require_user(&*self.state.lock().await)?;
        let _in_flight = InFlight::acquire(&self.scanning)?;

        // Held until identification finishes; dropped on every return path.
        let mut camera = CameraSession::open(self.camera.as_ref(), FacingMode::Environment)
            .await
            .map_err(|e| {
                log::error!("📷 Camera error: {}", e);
                e
            })?;
        let image = camera.capture_base64().await?;

        self.identify_and_merge(&image).await
    }

    /// Identify ingredients in a frame the browser captured itself.
    pub async fn identify_from_upload(&self, image: &str) -> Result<Vec<String>, AppError> {
        Self::require_user(&*self.state.lock().await)?;
        let _in_flight = InFlight::acquire(&self.scanning)?;

        let data = strip_data_url(image);
        let bytes = general_purpose::STANDARD
            .decode(data)
            .map_err(|e| CameraError::InvalidFrame(format!("invalid base64: {}", e)))?;
        if bytes.is_empty() {
            return Err(CameraError::InvalidFrame("empty image".to_string()).into());
        }
        if !is_jpeg(&bytes) {
            return Err(CameraError::InvalidFrame("upload is not a JPEG".to_string()).into());
        }

        log::debug!("📸 Uploaded frame: {} bytes", bytes.len());
        self.identify_and_merge(data).await
    }

    async fn identify_and_merge(&self, image_base64: &str) -> Result<Vec<String>, AppError> {
        let scanned = self
            .ai
            .identify_ingredients(image_base64, self.language)
            .await
            .map_err(|e| {
                log::error!("❌ Ingredient identification failed: {}", e);
                AppError::ScanService(e)
            })?;

        if scanned.is_empty() {
            log::info!("🤷 No ingredients recognized in image");
            return Err(AppError::NoIngredientsFound);
        }

        let mut state = self.state.lock().await;
        if state.user.is_none() {
            log::info!("👋 Session ended during scan, discarding results");
            return Err(AppError::NotAuthenticated);
        }
        let added = state.pantry.merge(&scanned);
        log::info!("📸 Scanned {} ingredient(s), {} new", scanned.len(), added);
        Ok(state.pantry.to_vec())
    }

    // --- favorites ---

    pub async fn toggle_favorite(&self, recipe: &Recipe) -> Result<ToggleOutcome, AppError> {
        let mut state = self.state.lock().await;
        Self::require_user(&state)?;

        let outcome = state.favorites.toggle(recipe);
        match outcome {
            ToggleOutcome::LimitReached => {
                log::info!("💔 Favorites full, '{}' not saved", recipe.recipe_name);
                return Err(AppError::FavoritesLimit {
                    limit: state.favorites.limit(),
                });
            }
            ToggleOutcome::Added => log::info!("❤️ Saved '{}'", recipe.recipe_name),
            ToggleOutcome::Removed => log::info!("🤍 Removed '{}'", recipe.recipe_name),
        }

        self.persist_favorites(&state.favorites).await;
        Ok(outcome)
    }

    pub async fn favorites_view(&self) -> Result<Vec<RecipeView>, AppError> {
        let state = self.state.lock().await;
        Self::require_user(&state)?;

        Ok(self.recipe_views(&state, state.favorites.as_slice()))
    }

    pub async fn snapshot(&self) -> AppSnapshot {
        let state = self.state.lock().await;

        AppSnapshot {
            user: state.user.clone(),
            language: self.language,
            pantry: state.pantry.to_vec(),
            recipes: self.recipe_views(&state, &state.recipes),
            favorites_count: state.favorites.len(),
            favorites_limit: state.favorites.limit(),
            searching: self.searching.load(Ordering::Acquire),
            scanning: self.scanning.load(Ordering::Acquire),
            error: state.last_error.map(|m| m.notice(self.language)),
        }
    }
}
