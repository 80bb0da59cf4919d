//! Account validation rules: phone format, password and display name bounds.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Phone numbers are `+7` followed by exactly ten digits.
pub const PHONE_PATTERN: &str = r"^\+7\d{10}$";

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: u64 = 6;

/// Minimum display name length (after trimming).
pub const MIN_NAME_LEN: u64 = 2;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

/// Returns `true` when `phone` matches [`PHONE_PATTERN`].
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// `validator` hook for phone fields.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("phone")
            .with_message(Cow::Borrowed("Phone number must be in the format +7XXXXXXXXXX")))
    }
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(length(min = MIN_PASSWORD_LEN, message = "Password must be at least 6 characters long"))]
    pub password: String,
    #[validate(length(min = MIN_NAME_LEN, message = "Name must be at least 2 characters long"))]
    pub name: String,
}

impl RegisterInput {
    /// Trim the display name; phone and password are taken verbatim.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}
