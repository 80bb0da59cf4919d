//! Roster dog rules.

use validator::Validate;

use crate::error::{CoreError, FieldError};
use crate::forms::{merge_sorted, require_present, FormFields};

#[derive(Debug, Clone, Default, Validate)]
pub struct DogInput {
    #[validate(length(min = 2, message = "Name must be at least 2 characters long"))]
    pub name: Option<String>,
    pub achievements: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDog {
    pub name: String,
    pub achievements: Option<String>,
    pub description: Option<String>,
}

impl DogInput {
    /// Empty optional text fields are treated as absent.
    pub fn from_form(form: &FormFields) -> (Self, Vec<FieldError>) {
        let non_empty = |name: &str| form.text(name).filter(|v| !v.is_empty());
        let input = Self {
            name: form.text("name"),
            achievements: non_empty("achievements"),
            description: non_empty("description"),
        };
        (input, Vec::new())
    }

    fn rule_errors(&self, errors: Vec<FieldError>) -> Vec<FieldError> {
        match self.validate() {
            Ok(()) => errors,
            Err(e) => merge_sorted(errors, crate::error::field_errors_from(&e)),
        }
    }

    pub fn into_new(self, errors: Vec<FieldError>) -> Result<NewDog, CoreError> {
        let mut errors = self.rule_errors(errors);
        require_present(&[("name", "Name", self.name.is_some())], &mut errors);
        CoreError::check_fields(errors)?;

        let name = self
            .name
            .ok_or_else(|| CoreError::Internal("dog input incomplete after validation".into()))?;
        Ok(NewDog {
            name,
            achievements: self.achievements,
            description: self.description,
        })
    }

    pub fn into_changes(self, errors: Vec<FieldError>) -> Result<Self, CoreError> {
        CoreError::check_fields(self.rule_errors(errors))?;
        Ok(self)
    }
}
