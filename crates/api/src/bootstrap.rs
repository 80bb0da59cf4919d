//! Startup provisioning of the nursery owner account.

use kennel_core::roles::ROLE_OWNER;
use kennel_db::models::account::{Account, CreateAccount};
use kennel_db::repositories::AccountRepo;
use kennel_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::OwnerBootstrap;
use crate::error::{AppError, AppResult};

/// Make sure an owner account with `owner.phone` exists.
///
/// - Missing: created with role `owner` and the configured password.
/// - Present with another role: promoted to `owner`; password untouched.
/// - Already an owner: left alone.
pub async fn ensure_owner(pool: &DbPool, owner: &OwnerBootstrap) -> AppResult<Account> {
    if let Some(existing) = AccountRepo::find_by_phone(pool, &owner.phone).await? {
        if existing.is_owner() {
            tracing::debug!(user_id = existing.id, "Owner account already present");
            return Ok(existing);
        }
        let promoted = AccountRepo::set_role(pool, existing.id, ROLE_OWNER)
            .await?
            .ok_or(AppError::not_found("Account", existing.id))?;
        tracing::info!(user_id = promoted.id, "Existing account promoted to owner");
        return Ok(promoted);
    }

    let password_hash = hash_password(&owner.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let account = AccountRepo::create(
        pool,
        &CreateAccount {
            phone: owner.phone.clone(),
            password_hash,
            name: owner.name.clone(),
            role: ROLE_OWNER.to_string(),
        },
    )
    .await?;
    tracing::info!(user_id = account.id, "Owner account created");
    Ok(account)
}
