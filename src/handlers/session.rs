use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

use crate::error::{AppError, Field, FieldError};
use crate::i18n::Message;
use crate::models::User;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        // local@domain.tld, no whitespace and a single '@'
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

fn check_email(email: &str) -> Option<FieldError> {
    if email.is_empty() {
        Some(FieldError::new(Field::Email, Message::FieldRequired))
    } else if !is_valid_email(email) {
        Some(FieldError::new(Field::Email, Message::InvalidEmail))
    } else {
        None
    }
}

/// Validate a registration form, reporting every bad field at once.
pub fn validate_registration(form: &RegistrationForm) -> Result<User, AppError> {
    let first_name = form.first_name.trim();
    let last_name = form.last_name.trim();
    let email = form.email.trim();

    let mut errors = Vec::new();
    if first_name.is_empty() {
        errors.push(FieldError::new(Field::FirstName, Message::FieldRequired));
    }
    if last_name.is_empty() {
        errors.push(FieldError::new(Field::LastName, Message::FieldRequired));
    }
    errors.extend(check_email(email));

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    Ok(User {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
    })
}

/// Check a login attempt against the stored user.
pub fn authenticate(stored: Option<&User>, form: &LoginForm) -> Result<User, AppError> {
    let email = form.email.trim();
    if let Some(error) = check_email(email) {
        return Err(AppError::Validation(vec![error]));
    }

    match stored {
        Some(user) if user.email.to_lowercase() == email.to_lowercase() => Ok(user.clone()),
        _ => Err(AppError::Authentication),
    }
}
