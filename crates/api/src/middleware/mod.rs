//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the calling account from a JWT Bearer token.
//! - [`rbac::RequireOwner`] -- Requires the `owner` role.
//! - [`rbac::RequireAuth`] -- Requires any authenticated account.

pub mod auth;
pub mod rbac;
