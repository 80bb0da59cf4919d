//! Repository for the `accounts` table.

use kennel_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::account::{Account, CreateAccount};
use crate::repositories::NOW;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, phone, password_hash, name, role, is_active, created_at, updated_at";

/// Provides CRUD operations for accounts.
pub struct AccountRepo;

impl AccountRepo {
    /// Insert a new account, returning the created row.
    ///
    /// A duplicate phone fails on `uq_accounts_phone`.
    pub async fn create(pool: &SqlitePool, input: &CreateAccount) -> Result<Account, sqlx::Error> {
        let query = format!(
            "INSERT INTO accounts (phone, password_hash, name, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(&input.phone)
            .bind(&input.password_hash)
            .bind(&input.name)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by its exact phone number.
    pub async fn find_by_phone(
        pool: &SqlitePool,
        phone: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE phone = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(phone)
            .fetch_optional(pool)
            .await
    }

    /// Change an account's role. Returns `None` if no such account exists.
    pub async fn set_role(
        pool: &SqlitePool,
        id: DbId,
        role: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!(
            "UPDATE accounts SET role = $2, updated_at = {NOW}
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate an account. Returns `true` if the row was updated.
    pub async fn deactivate(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE accounts SET is_active = 0, updated_at = {NOW}
             WHERE id = $1 AND is_active = 1"
        );
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
