//! Account entity model and DTOs.

use kennel_core::roles::ROLE_OWNER;
use kennel_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `accounts` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`AccountResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: DbId,
    pub phone: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Account {
    pub fn is_owner(&self) -> bool {
        self.role == ROLE_OWNER
    }
}

/// Safe account representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: DbId,
    pub phone: String,
    pub name: String,
    pub role: String,
    pub created_at: Timestamp,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            phone: account.phone.clone(),
            name: account.name.clone(),
            role: account.role.clone(),
            created_at: account.created_at,
        }
    }
}

/// DTO for creating a new account. The password is already hashed.
#[derive(Debug)]
pub struct CreateAccount {
    pub phone: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
}
