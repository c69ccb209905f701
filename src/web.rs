use serde::{Deserialize, Serialize};

use crate::handlers::recipe_card::RecipeView;
use crate::i18n::Notice;

/// Body of `POST /api/pantry` and `POST /api/ingredients/missing`
#[derive(Debug, Deserialize)]
pub struct IngredientRequest {
    pub ingredient: String,
}

/// Body of `POST /api/scan/upload`: a JPEG as plain base64 or a data URL
#[derive(Debug, Deserialize)]
pub struct ImageUpload {
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct PantryResponse {
    pub pantry: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub recipes: Vec<RecipeView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub is_favorite: bool,
    pub favorites_count: usize,
}

// Axum integration (optional - requires axum dependency)
#[cfg(feature = "web-server")]
pub mod server {
    use super::*;
    use axum::{
        extract::{DefaultBodyLimit, Path, State},
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::{delete, get, post},
        Json, Router,
    };
    use serde_json::json;
    use std::sync::Arc;
    use tower_http::cors::CorsLayer;

    use crate::error::{AppError, ErrorKind};
    use crate::handlers::favorites::ToggleOutcome;
    use crate::handlers::session::{LoginForm, RegistrationForm};
    use crate::handlers::AppHandler;
    use crate::models::{Language, Recipe, User};

    const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

    pub struct ApiError {
        error: AppError,
        language: Language,
    }

    impl ApiError {
        fn new(app: &AppHandler) -> impl FnOnce(AppError) -> ApiError {
            let language = app.language();
            move |error| ApiError { error, language }
        }
    }

    impl IntoResponse for ApiError {
        fn into_response(self) -> Response {
            let status = match self.error.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
                ErrorKind::Conflict => StatusCode::CONFLICT,
                ErrorKind::External => StatusCode::BAD_GATEWAY,
                ErrorKind::Camera => StatusCode::SERVICE_UNAVAILABLE,
            };
            let message = self.error.message();

            let body = json!({
                "error": message.text(self.language),
                "key": message,
                "kind": self.error.kind(),
                "fields": self.error.field_errors(),
            });
            (status, Json(body)).into_response()
        }
    }

    type ApiResult<T> = Result<Json<T>, ApiError>;

    pub fn create_router(app: Arc<AppHandler>) -> Router {
        Router::new()
            .route("/", get(root_handler))
            .route("/health", get(health_check))
            .route("/api/state", get(get_state))
            .route("/api/register", post(register))
            .route("/api/login", post(login))
            .route("/api/logout", post(logout))
            .route("/api/pantry", post(add_ingredient).delete(clear_ingredients))
            .route("/api/pantry/:name", delete(remove_ingredient))
            .route("/api/ingredients/missing", post(add_missing_ingredient))
            .route("/api/recipes/search", post(search_recipes))
            .route("/api/camera", get(probe_camera))
            .route("/api/scan", post(scan_with_camera))
            .route(
                "/api/scan/upload",
                post(scan_upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
            )
            .route("/api/favorites", get(list_favorites))
            .route("/api/favorites/toggle", post(toggle_favorite))
            .layer(CorsLayer::permissive())
            .with_state(app)
    }

    async fn root_handler() -> &'static str {
        "Nonna Svuotafrigo AI - API under /api"
    }

    async fn health_check() -> &'static str {
        "OK"
    }

    async fn get_state(State(app): State<Arc<AppHandler>>) -> impl IntoResponse {
        Json(app.snapshot().await)
    }

    async fn register(
        State(app): State<Arc<AppHandler>>,
        Json(form): Json<RegistrationForm>,
    ) -> ApiResult<User> {
        let user = app.register(&form).await.map_err(ApiError::new(&app))?;
        Ok(Json(user))
    }

    async fn login(
        State(app): State<Arc<AppHandler>>,
        Json(form): Json<LoginForm>,
    ) -> ApiResult<User> {
        let user = app.login(&form).await.map_err(ApiError::new(&app))?;
        Ok(Json(user))
    }

    async fn logout(State(app): State<Arc<AppHandler>>) -> StatusCode {
        app.logout().await;
        StatusCode::NO_CONTENT
    }

    async fn add_ingredient(
        State(app): State<Arc<AppHandler>>,
        Json(request): Json<IngredientRequest>,
    ) -> ApiResult<PantryResponse> {
        let pantry = app
            .add_ingredient(&request.ingredient)
            .await
            .map_err(ApiError::new(&app))?;
        Ok(Json(PantryResponse { pantry, notice: None }))
    }

    async fn add_missing_ingredient(
        State(app): State<Arc<AppHandler>>,
        Json(request): Json<IngredientRequest>,
    ) -> ApiResult<PantryResponse> {
        let pantry = app
            .add_missing_ingredient(&request.ingredient)
            .await
            .map_err(ApiError::new(&app))?;
        Ok(Json(PantryResponse { pantry, notice: None }))
    }

    async fn remove_ingredient(
        State(app): State<Arc<AppHandler>>,
        Path(name): Path<String>,
    ) -> ApiResult<PantryResponse> {
        let pantry = app
            .remove_ingredient(&name)
            .await
            .map_err(ApiError::new(&app))?;
        Ok(Json(PantryResponse { pantry, notice: None }))
    }

    async fn clear_ingredients(State(app): State<Arc<AppHandler>>) -> Result<StatusCode, ApiError> {
        app.clear_ingredients().await.map_err(ApiError::new(&app))?;
        Ok(StatusCode::NO_CONTENT)
    }

    async fn search_recipes(State(app): State<Arc<AppHandler>>) -> ApiResult<SearchResponse> {
        match app.find_recipes().await {
            Ok(recipes) => Ok(Json(SearchResponse { recipes, notice: None })),
            // An empty answer is not a failure: show the notice, keep going
            Err(e @ AppError::NoRecipeFound) => Ok(Json(SearchResponse {
                recipes: Vec::new(),
                notice: Some(e.message().notice(app.language())),
            })),
            Err(e) => Err(ApiError::new(&app)(e)),
        }
    }

    async fn probe_camera(State(app): State<Arc<AppHandler>>) -> Result<StatusCode, ApiError> {
        app.probe_camera().await.map_err(ApiError::new(&app))?;
        Ok(StatusCode::NO_CONTENT)
    }

    async fn scan_with_camera(State(app): State<Arc<AppHandler>>) -> ApiResult<PantryResponse> {
        let result = app.scan_with_camera().await;
        scan_response(&app, result).await
    }

    async fn scan_upload(
        State(app): State<Arc<AppHandler>>,
        Json(upload): Json<ImageUpload>,
    ) -> ApiResult<PantryResponse> {
        let result = app.identify_from_upload(&upload.image).await;
        scan_response(&app, result).await
    }

    async fn scan_response(
        app: &AppHandler,
        result: Result<Vec<String>, AppError>,
    ) -> ApiResult<PantryResponse> {
        match result {
            Ok(pantry) => Ok(Json(PantryResponse { pantry, notice: None })),
            Err(e @ AppError::NoIngredientsFound) => Ok(Json(PantryResponse {
                pantry: app.snapshot().await.pantry,
                notice: Some(e.message().notice(app.language())),
            })),
            Err(e) => Err(ApiError::new(app)(e)),
        }
    }

    async fn list_favorites(State(app): State<Arc<AppHandler>>) -> ApiResult<Vec<RecipeView>> {
        let favorites = app.favorites_view().await.map_err(ApiError::new(&app))?;
        Ok(Json(favorites))
    }

    async fn toggle_favorite(
        State(app): State<Arc<AppHandler>>,
        Json(recipe): Json<Recipe>,
    ) -> ApiResult<ToggleResponse> {
        let outcome = app
            .toggle_favorite(&recipe)
            .await
            .map_err(ApiError::new(&app))?;

        Ok(Json(ToggleResponse {
            is_favorite: outcome == ToggleOutcome::Added,
            favorites_count: app.snapshot().await.favorites_count,
        }))
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_deserialization() {
        let json = r#"{ "image": "data:image/jpeg;base64,/9j/4A==" }"#;

        let upload: ImageUpload = serde_json::from_str(json).unwrap();

        assert!(upload.image.starts_with("data:image/jpeg"));
    }

    #[test]
    fn test_pantry_response_omits_empty_notice() {
        let response = PantryResponse {
            pantry: vec!["Uova".to_string()],
            notice: None,
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json, serde_json::json!({ "pantry": ["Uova"] }));
    }
}
