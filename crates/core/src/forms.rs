//! Typed access to the text parts of a multipart form.
//!
//! Upload endpoints receive every scalar as text. [`FormFields`] turns those
//! strings into typed values and records a [`FieldError`] for anything that
//! does not parse, so the caller can report all problems in one response.

use std::collections::HashMap;

use crate::error::FieldError;

/// Text fields of a submitted form, keyed by field name.
///
/// When a field is sent more than once the last value wins.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    values: HashMap<String, String>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The trimmed value of `name`, if the field was sent at all.
    pub fn text(&self, name: &str) -> Option<String> {
        self.values.get(name).map(|v| v.trim().to_string())
    }

    /// Parse `name` as an integer. Unparseable input records `message`.
    pub fn int(&self, name: &str, message: &str, errors: &mut Vec<FieldError>) -> Option<i32> {
        let value = self.text(name)?;
        match value.parse::<i32>() {
            Ok(v) => Some(v),
            Err(_) => {
                errors.push(FieldError::new(name, message));
                None
            }
        }
    }

    /// Parse `name` as a finite decimal number. Unparseable input records `message`.
    pub fn number(&self, name: &str, message: &str, errors: &mut Vec<FieldError>) -> Option<f64> {
        let value = self.text(name)?;
        match value.parse::<f64>() {
            Ok(v) if v.is_finite() => Some(v),
            _ => {
                errors.push(FieldError::new(name, message));
                None
            }
        }
    }

    /// Parse `name` as a boolean (`true`/`false`, `1`/`0`, `on`/`off`).
    pub fn flag(&self, name: &str, errors: &mut Vec<FieldError>) -> Option<bool> {
        let value = self.text(name)?;
        match value.to_ascii_lowercase().as_str() {
            "true" | "1" | "on" | "yes" => Some(true),
            "false" | "0" | "off" | "no" => Some(false),
            _ => {
                errors.push(FieldError::new(name, format!("{name} must be true or false")));
                None
            }
        }
    }
}

/// Record "`<label>` is required" for every `(field, present)` pair that is
/// missing and has no error recorded yet.
pub fn require_present(fields: &[(&str, &str, bool)], errors: &mut Vec<FieldError>) {
    for (field, label, present) in fields {
        if !present && !errors.iter().any(|e| e.field == *field) {
            errors.push(FieldError::new(*field, format!("{label} is required")));
        }
    }
}

/// Order errors by field name.
pub fn sort_by_field(errors: &mut [FieldError]) {
    errors.sort_by(|x, y| x.field.cmp(&y.field));
}

/// Merge two error lists and sort them by field name.
pub fn merge_sorted(mut a: Vec<FieldError>, b: Vec<FieldError>) -> Vec<FieldError> {
    a.extend(b);
    sort_by_field(&mut a);
    a
}
