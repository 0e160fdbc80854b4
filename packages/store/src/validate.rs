//! Form validation that runs before any backend call.
//!
//! The `Display` text of each [`ValidationError`] is the message shown to
//! the user. Whitespace-only input counts as missing.

use thiserror::Error;

use crate::models::{ClubForm, ImageFile};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields and select an image.")]
    IncompleteClub,
    #[error("Please fill in all fields.")]
    IncompleteClubUpdate,
    #[error("Please fill out all fields")]
    IncompleteEvent,
    #[error("Please enter a valid date")]
    InvalidDate,
    #[error("Start date must be before end date")]
    StartAfterEnd,
    #[error("Name is required")]
    NameRequired,
    #[error("Please enter a valid email")]
    InvalidEmail,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Password is required")]
    PasswordRequired,
}

/// Shortest password the auth backend accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// A new club needs every text field and an image.
pub fn validate_new_club(form: &ClubForm, image: Option<&ImageFile>) -> Result<(), ValidationError> {
    if blank(&form.name) || blank(&form.description) || blank(&form.tags) || image.is_none() {
        return Err(ValidationError::IncompleteClub);
    }
    Ok(())
}

/// An edited club needs every text field, the image URL included.
pub fn validate_club_update(form: &ClubForm, image_url: &str) -> Result<(), ValidationError> {
    if blank(&form.name) || blank(&form.description) || blank(&form.tags) || blank(image_url) {
        return Err(ValidationError::IncompleteClubUpdate);
    }
    Ok(())
}

/// One `@`, a non-empty local part and a dotted domain, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Sign-up form input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Registration {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if blank(&self.name) {
            return Err(ValidationError::NameRequired);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }
        Ok(())
    }
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    Ok(())
}
