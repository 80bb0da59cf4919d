//! JWT-based authentication extractor for Axum handlers.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use kennel_core::error::CoreError;
use kennel_core::roles::ROLE_OWNER;
use kennel_core::types::DbId;
use kennel_db::repositories::AccountRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated account resolved from a JWT Bearer token in the
/// `Authorization` header.
///
/// The token only proves identity. Role and active status are read from the
/// `accounts` table on every request, so a demoted or deactivated account
/// loses access immediately.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The account's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The account's current role (`"user"` or `"owner"`).
    pub role: String,
}

impl AuthUser {
    pub fn is_owner(&self) -> bool {
        self.role == ROLE_OWNER
    }
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            unauthorized("Invalid Authorization format. Expected: Bearer <token>")
        })?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        let account = AccountRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .filter(|a| a.is_active)
            .ok_or_else(|| unauthorized("Account not found or deactivated"))?;

        Ok(AuthUser {
            user_id: account.id,
            role: account.role,
        })
    }
}

/// `Option<AuthUser>` for public routes that show more to a signed-in caller.
///
/// A missing, malformed or expired token yields `None` rather than a 401.
impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        if !parts.headers.contains_key("authorization") {
            return Ok(None);
        }
        match <AuthUser as FromRequestParts<AppState>>::from_request_parts(parts, state).await {
            Ok(user) => Ok(Some(user)),
            Err(AppError::Core(CoreError::Unauthorized(_))) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
