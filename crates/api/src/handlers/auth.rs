//! Handlers for the `/auth` resource (register, login, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use kennel_core::accounts::{LoginInput, RegisterInput};
use kennel_core::error::CoreError;
use kennel_core::roles::ROLE_USER;
use kennel_db::models::account::{Account, AccountResponse, CreateAccount};
use kennel_db::repositories::AccountRepo;
use serde::Serialize;
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Login failures share one message so the response does not reveal whether
/// the phone number is registered.
const INVALID_CREDENTIALS: &str = "Invalid phone number or password";

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AccountResponse,
}

/// Response for `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: AccountResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create a buyer account and sign it in.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RegisterInput>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let input = input.normalized();
    input.validate().map_err(CoreError::from)?;

    if AccountRepo::find_by_phone(&state.pool, &input.phone)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Validation(
            "An account with this phone number already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let account = AccountRepo::create(
        &state.pool,
        &CreateAccount {
            phone: input.phone,
            password_hash,
            name: input.name,
            role: ROLE_USER.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = account.id, "Account registered");

    let response = auth_response(&state, &account)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login
///
/// Authenticate with phone + password.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginInput>,
) -> AppResult<Json<AuthResponse>> {
    input.validate().map_err(CoreError::from)?;

    let account = AccountRepo::find_by_phone(&state.pool, &input.phone)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Validation(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &account.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = account.id, "Login rejected: wrong password");
        return Err(AppError::Core(CoreError::Validation(
            INVALID_CREDENTIALS.into(),
        )));
    }

    if !account.is_active {
        return Err(AppError::Core(CoreError::Validation(
            "Account is deactivated".into(),
        )));
    }

    tracing::info!(user_id = account.id, role = %account.role, "Login succeeded");
    Ok(Json(auth_response(&state, &account)?))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<MeResponse>> {
    let account = AccountRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::not_found("Account", user.user_id))?;
    Ok(Json(MeResponse {
        user: AccountResponse::from(&account),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn auth_response(state: &AppState, account: &Account) -> AppResult<AuthResponse> {
    let token = generate_access_token(account.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    Ok(AuthResponse {
        token,
        user: AccountResponse::from(account),
    })
}
