//! Row-level ownership checks shared by every owner-scoped resource.

use crate::error::CoreError;
use crate::types::DbId;

/// Fail with `Forbidden` unless `caller_id` owns the row.
pub fn ensure_owner(
    entity: &'static str,
    owner_id: DbId,
    caller_id: DbId,
) -> Result<(), CoreError> {
    if owner_id == caller_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "You do not have permission to modify this {entity}"
        )))
    }
}

/// Like [`ensure_owner`] for rows whose owner reference is a weak link.
///
/// A row whose owner no longer exists (`None`) can be managed by any caller
/// that already passed the role check.
pub fn ensure_owner_or_orphan(
    entity: &'static str,
    owner_id: Option<DbId>,
    caller_id: DbId,
) -> Result<(), CoreError> {
    match owner_id {
        Some(owner_id) => ensure_owner(entity, owner_id, caller_id),
        None => Ok(()),
    }
}
