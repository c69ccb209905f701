use serde::Serialize;
use thiserror::Error;

use crate::i18n::Message;
use crate::services::camera::CameraError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: Message,
}

impl FieldError {
    pub fn new(field: Field, message: Message) -> Self {
        Self { field, message }
    }
}

/// Coarse classification used by the web layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    Validation,
    Authentication,
    Conflict,
    External,
    Camera,
}

/// Every failure a user action can end in. None of them is fatal: the
/// caller reports the message and the app stays interactive.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid input: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("precondition failed: {0:?}")]
    Precondition(Message),

    #[error("authentication failed")]
    Authentication,

    #[error("no active session")]
    NotAuthenticated,

    #[error("favorites limit of {limit} reached")]
    FavoritesLimit { limit: usize },

    #[error("request already in progress")]
    Busy,

    #[error("no recipe found for the given ingredients")]
    NoRecipeFound,

    #[error("no ingredients recognized in the image")]
    NoIngredientsFound,

    #[error("recipe service failed: {0}")]
    RecipeService(#[source] anyhow::Error),

    #[error("ingredient recognition failed: {0}")]
    ScanService(#[source] anyhow::Error),

    #[error("camera unavailable: {0}")]
    Camera(#[from] CameraError),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) | AppError::Precondition(_) => ErrorKind::Validation,
            AppError::Authentication | AppError::NotAuthenticated => ErrorKind::Authentication,
            AppError::FavoritesLimit { .. } | AppError::Busy => ErrorKind::Conflict,
            AppError::NoRecipeFound
            | AppError::NoIngredientsFound
            | AppError::RecipeService(_)
            | AppError::ScanService(_) => ErrorKind::External,
            AppError::Camera(_) => ErrorKind::Camera,
        }
    }

    /// The notice shown to the user.
    pub fn message(&self) -> Message {
        match self {
            AppError::Validation(errors) => errors
                .first()
                .map(|e| e.message)
                .unwrap_or(Message::FieldRequired),
            AppError::Precondition(message) => *message,
            AppError::Authentication => Message::LoginError,
            AppError::NotAuthenticated => Message::NotAuthenticated,
            AppError::FavoritesLimit { .. } => Message::FavoritesLimitReached,
            AppError::Busy => Message::RequestInProgress,
            AppError::NoRecipeFound => Message::NoRecipeFound,
            AppError::NoIngredientsFound => Message::NoIngredientsFound,
            AppError::RecipeService(_) => Message::RecipeServiceError,
            AppError::ScanService(_) => Message::ScanServiceError,
            AppError::Camera(CameraError::InvalidFrame(_)) => Message::GenericScanError,
            AppError::Camera(_) => Message::CameraError,
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            AppError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_taxonomy() {
        assert_eq!(
            AppError::Precondition(Message::AddIngredientsFirst).kind(),
            ErrorKind::Validation
        );
        assert_eq!(AppError::Authentication.kind(), ErrorKind::Authentication);
        assert_eq!(AppError::FavoritesLimit { limit: 12 }.kind(), ErrorKind::Conflict);
        assert_eq!(AppError::NoRecipeFound.kind(), ErrorKind::External);
        assert_eq!(
            AppError::RecipeService(anyhow::anyhow!("boom")).message(),
            Message::RecipeServiceError
        );
    }

    #[test]
    fn test_validation_message_is_first_field_error() {
        let err = AppError::Validation(vec![
            FieldError::new(Field::Email, Message::InvalidEmail),
            FieldError::new(Field::LastName, Message::FieldRequired),
        ]);
        assert_eq!(err.message(), Message::InvalidEmail);
        assert_eq!(err.field_errors().len(), 2);
    }
}
