use serde::Serialize;

use crate::types::DbId;

/// A single field-level validation failure, reported back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Validation failed on {} field(s)", .0.len())]
    InvalidFields(Vec<FieldError>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Build an [`CoreError::InvalidFields`] from collected errors, or `Ok(())`
    /// when nothing was collected.
    pub fn check_fields(errors: Vec<FieldError>) -> Result<(), CoreError> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidFields(errors))
        }
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CoreError::InvalidFields(field_errors_from(&errors))
    }
}

/// Flatten `validator` output into a list sorted by field name.
pub fn field_errors_from(errors: &validator::ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid value ({})", e.code));
                FieldError::new(field.clone(), message)
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "too short"))]
        title: String,
        #[validate(range(min = 0, message = "must be >= 0"))]
        amount: i32,
    }

    #[test]
    fn validation_errors_become_sorted_field_list() {
        let sample = Sample {
            title: "ab".into(),
            amount: -1,
        };
        let err: CoreError = sample.validate().unwrap_err().into();
        match err {
            CoreError::InvalidFields(fields) => {
                assert_eq!(
                    fields,
                    vec![
                        FieldError::new("amount", "must be >= 0"),
                        FieldError::new("title", "too short"),
                    ]
                );
            }
            other => panic!("expected InvalidFields, got {other:?}"),
        }
    }

    #[test]
    fn check_fields_passes_when_empty() {
        assert!(CoreError::check_fields(vec![]).is_ok());
        assert!(CoreError::check_fields(vec![FieldError::new("a", "b")]).is_err());
    }
}
