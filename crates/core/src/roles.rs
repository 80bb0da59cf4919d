//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `accounts.role` in
//! `20260301000001_create_accounts_table.sql`.

pub const ROLE_USER: &str = "user";
pub const ROLE_OWNER: &str = "owner";
