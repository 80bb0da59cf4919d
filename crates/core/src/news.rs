//! News post rules.

use validator::Validate;

use crate::error::{CoreError, FieldError};
use crate::forms::{merge_sorted, require_present, sort_by_field, FormFields};

/// Minimum title length (after trimming).
pub const MIN_TITLE_LEN: u64 = 3;

/// Minimum body length (after trimming).
pub const MIN_CONTENT_LEN: u64 = 10;

/// Default page size for the public news feed.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// News fields as submitted; all optional so updates can be partial.
#[derive(Debug, Clone, Default, Validate)]
pub struct NewsInput {
    #[validate(length(min = MIN_TITLE_LEN, message = "Title must be at least 3 characters long"))]
    pub title: Option<String>,
    #[validate(length(min = MIN_CONTENT_LEN, message = "Content must be at least 10 characters long"))]
    pub content: Option<String>,
    pub is_published: Option<bool>,
}

/// A validated news post ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNews {
    pub title: String,
    pub content: String,
    pub is_published: bool,
}

impl NewsInput {
    pub fn from_form(form: &FormFields) -> (Self, Vec<FieldError>) {
        let mut errors = Vec::new();
        let input = Self {
            title: form.text("title"),
            content: form.text("content"),
            is_published: form.flag("is_published", &mut errors),
        };
        (input, errors)
    }

    fn rule_errors(&self, errors: Vec<FieldError>) -> Vec<FieldError> {
        match self.validate() {
            Ok(()) => errors,
            Err(e) => merge_sorted(errors, crate::error::field_errors_from(&e)),
        }
    }

    /// Validate for creation. A post is published unless told otherwise.
    pub fn into_new(self, errors: Vec<FieldError>) -> Result<NewNews, CoreError> {
        let mut errors = self.rule_errors(errors);
        require_present(
            &[
                ("title", "Title", self.title.is_some()),
                ("content", "Content", self.content.is_some()),
            ],
            &mut errors,
        );
        sort_by_field(&mut errors);
        CoreError::check_fields(errors)?;

        match (self.title, self.content) {
            (Some(title), Some(content)) => Ok(NewNews {
                title,
                content,
                is_published: self.is_published.unwrap_or(true),
            }),
            _ => Err(CoreError::Internal("news input incomplete after validation".into())),
        }
    }

    pub fn into_changes(self, errors: Vec<FieldError>) -> Result<Self, CoreError> {
        CoreError::check_fields(self.rule_errors(errors))?;
        Ok(self)
    }
}
