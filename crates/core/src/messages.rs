//! Buyer/owner message rules.

use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;
use crate::types::DbId;

/// Minimum message body length (after trimming).
pub const MIN_CONTENT_LEN: u64 = 5;

/// Default page size for message inboxes.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Request body for `POST /messages`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageInput {
    #[serde(alias = "puppyId")]
    pub puppy_id: DbId,
    #[validate(length(min = MIN_CONTENT_LEN, message = "Message must be at least 5 characters long"))]
    pub content: String,
}

/// Request body for `POST /messages/reply/{id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReplyInput {
    #[validate(length(min = MIN_CONTENT_LEN, message = "Reply must be at least 5 characters long"))]
    pub content: String,
}

impl SendMessageInput {
    pub fn normalized(mut self) -> Self {
        self.content = self.content.trim().to_string();
        self
    }
}

impl ReplyInput {
    pub fn normalized(mut self) -> Self {
        self.content = self.content.trim().to_string();
        self
    }
}

/// Messages can only be sent about puppies that are still for sale.
pub fn ensure_puppy_available(is_available: bool) -> Result<(), CoreError> {
    if is_available {
        Ok(())
    } else {
        Err(CoreError::Validation("This puppy is no longer available".into()))
    }
}

/// Only the receiver of a message may reply to it or mark it read.
pub fn ensure_receiver(receiver_id: DbId, caller_id: DbId) -> Result<(), CoreError> {
    if receiver_id == caller_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only the recipient of this message may do that".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn content_is_trimmed_before_length_check() {
        let input = SendMessageInput {
            puppy_id: 1,
            content: "  hi   ".into(),
        }
        .normalized();
        assert!(input.validate().is_err());

        let input = ReplyInput {
            content: " Still available? ".into(),
        }
        .normalized();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn unavailable_puppy_is_a_validation_error() {
        assert!(ensure_puppy_available(true).is_ok());
        assert_matches!(ensure_puppy_available(false), Err(CoreError::Validation(_)));
    }

    #[test]
    fn only_receiver_passes() {
        assert!(ensure_receiver(7, 7).is_ok());
        assert_matches!(ensure_receiver(7, 8), Err(CoreError::Forbidden(_)));
    }
}
