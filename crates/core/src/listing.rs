//! Puppy listing rules: field bounds, gender values, image counts and the
//! public catalog filter.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::{CoreError, FieldError};
use crate::forms::{merge_sorted, require_present, FormFields};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Oldest age (in months) a listed puppy may have.
pub const MAX_AGE_MONTHS: i32 = 24;

/// Minimum puppy name length (after trimming).
pub const MIN_NAME_LEN: u64 = 3;

/// Minimum description length (after trimming).
pub const MIN_DESCRIPTION_LEN: u64 = 10;

/// Maximum number of photos per listing.
pub const MAX_IMAGES: usize = 5;

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(CoreError::Validation(format!(
                "gender must be 'male' or 'female', got '{other}'"
            ))),
        }
    }
}

pub fn validate_gender(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Gender>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("gender").with_message(Cow::Borrowed("Gender must be male or female")))
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Puppy fields as submitted. Every field is optional so the same struct
/// serves partial updates; [`PuppyInput::into_new`] enforces completeness.
#[derive(Debug, Clone, Default, Validate)]
pub struct PuppyInput {
    #[validate(length(min = MIN_NAME_LEN, message = "Name must be at least 3 characters long"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Breed is required"))]
    pub breed: Option<String>,
    #[validate(range(min = 0, max = MAX_AGE_MONTHS, message = "Age must be between 0 and 24 months"))]
    pub age: Option<i32>,
    #[validate(custom(function = "validate_gender"))]
    pub gender: Option<String>,
    #[validate(length(min = 1, message = "Color is required"))]
    pub color: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be a non-negative number"))]
    pub price: Option<f64>,
    #[validate(length(min = MIN_DESCRIPTION_LEN, message = "Description must be at least 10 characters long"))]
    pub description: Option<String>,
    pub is_available: Option<bool>,
    pub is_featured: Option<bool>,
}

/// A fully validated listing ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPuppy {
    pub name: String,
    pub breed: String,
    pub age: i32,
    pub gender: Gender,
    pub color: String,
    pub price: f64,
    pub description: String,
    pub is_available: bool,
    pub is_featured: bool,
}

impl PuppyInput {
    /// Read the puppy fields out of a multipart form.
    ///
    /// Returns the parsed input together with any parse errors; rule checks
    /// happen in [`into_new`](Self::into_new) / [`into_changes`](Self::into_changes).
    pub fn from_form(form: &FormFields) -> (Self, Vec<FieldError>) {
        let mut errors = Vec::new();
        let input = Self {
            name: form.text("name"),
            breed: form.text("breed"),
            age: form.int("age", "Age must be a whole number", &mut errors),
            gender: form.text("gender"),
            color: form.text("color"),
            price: form.number("price", "Price must be a number", &mut errors),
            description: form.text("description"),
            is_available: form.flag("is_available", &mut errors),
            is_featured: form.flag("is_featured", &mut errors),
        };
        (input, errors)
    }

    fn rule_errors(&self, mut errors: Vec<FieldError>) -> Vec<FieldError> {
        if let Err(e) = self.validate() {
            errors = merge_sorted(errors, crate::error::field_errors_from(&e));
        }
        errors
    }

    /// Validate for creation: every field is required and at least one image
    /// must accompany the listing.
    ///
    /// `errors` carries problems found earlier (form parsing, upload checks)
    /// so that all of them are reported together.
    pub fn into_new(self, image_count: usize, errors: Vec<FieldError>) -> Result<NewPuppy, CoreError> {
        let mut errors = self.rule_errors(errors);
        require_present(
            &[
                ("name", "Name", self.name.is_some()),
                ("breed", "Breed", self.breed.is_some()),
                ("age", "Age", self.age.is_some()),
                ("gender", "Gender", self.gender.is_some()),
                ("color", "Color", self.color.is_some()),
                ("price", "Price", self.price.is_some()),
                ("description", "Description", self.description.is_some()),
            ],
            &mut errors,
        );
        errors = merge_sorted(errors, image_count_errors(image_count, true));
        CoreError::check_fields(errors)?;

        match self {
            PuppyInput {
                name: Some(name),
                breed: Some(breed),
                age: Some(age),
                gender: Some(gender),
                color: Some(color),
                price: Some(price),
                description: Some(description),
                is_available,
                is_featured,
            } => Ok(NewPuppy {
                name,
                breed,
                age,
                gender: gender.parse()?,
                color,
                price,
                description,
                is_available: is_available.unwrap_or(true),
                is_featured: is_featured.unwrap_or(false),
            }),
            _ => Err(CoreError::Internal("puppy input incomplete after validation".into())),
        }
    }

    /// Validate a partial update. Absent fields are left untouched.
    pub fn into_changes(self, image_count: usize, errors: Vec<FieldError>) -> Result<Self, CoreError> {
        let errors = merge_sorted(self.rule_errors(errors), image_count_errors(image_count, false));
        CoreError::check_fields(errors)?;
        Ok(self)
    }
}

/// Image count rule: a new listing needs at least one photo. The upper bound
/// is enforced while the upload is read (see `uploads::check_count`).
pub fn image_count_errors(count: usize, required: bool) -> Vec<FieldError> {
    if required && count == 0 {
        vec![FieldError::new("images", "Upload at least one photo")]
    } else {
        Vec::new()
    }
}

// ---------------------------------------------------------------------------
// Catalog filter
// ---------------------------------------------------------------------------

/// Public catalog filter for `GET /puppies`.
///
/// `available` defaults to `true`: without an explicit `available=false` the
/// catalog only shows puppies that are still for sale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PuppyFilter {
    pub gender: Option<Gender>,
    pub breed: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub available: bool,
}

impl PuppyFilter {
    pub fn new(
        gender: Option<&str>,
        breed: Option<&str>,
        min_price: Option<f64>,
        max_price: Option<f64>,
        available: Option<bool>,
    ) -> Result<Self, CoreError> {
        let gender = gender
            .filter(|g| !g.is_empty())
            .map(str::parse::<Gender>)
            .transpose()?;
        for (label, bound) in [("minPrice", min_price), ("maxPrice", max_price)] {
            if let Some(v) = bound {
                if !v.is_finite() || v < 0.0 {
                    return Err(CoreError::Validation(format!(
                        "{label} must be a non-negative number"
                    )));
                }
            }
        }
        Ok(Self {
            gender,
            breed: breed.map(str::trim).filter(|b| !b.is_empty()).map(String::from),
            min_price,
            max_price,
            available: available.unwrap_or(true),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
