//! Client-side access gate for the owner dashboard.
//!
//! The gate decides, per page render, whether the browser may show owner
//! screens. It is a pure predicate over three locally stored values:
//!
//! - a credential token (`token`),
//! - the signed-in user record as JSON (`user`),
//! - a marker set when the login page was used (`visited_login`).
//!
//! ```text
//! allowed = token present
//!       AND token starts with OWNER_TOKEN_PREFIX
//!       AND user.role == "owner"
//!       AND visited_login present
//! ```
//!
//! The fast owner login compares a password against a fixed secret locally and
//! never talks to the server, so this gate only controls what is rendered.
//! The API never trusts it: every owner-scoped request is authorised
//! server-side from a signed bearer token.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::ROLE_OWNER;
use crate::types::DbId;

/// Prefix of tokens minted by the local owner login.
pub const OWNER_TOKEN_PREFIX: &str = "owner-session-";

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const VISITED_LOGIN_KEY: &str = "visited_login";

/// Key/value storage the gate persists into (browser local/session storage).
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// In-memory [`SessionStorage`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// The user record kept next to the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: DbId,
    pub phone: String,
    pub name: String,
    pub role: String,
}

impl SessionUser {
    pub fn is_owner(&self) -> bool {
        self.role == ROLE_OWNER
    }
}

/// Where the client currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Anonymous,
    /// A server login round trip is in flight.
    Pending,
    AuthenticatedOwner,
    AuthenticatedUser,
}

/// Fixed inputs of the local owner login.
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub owner_secret: String,
    pub owner_profile: SessionUser,
}

impl GateConfig {
    pub fn new(owner_secret: impl Into<String>) -> Self {
        Self {
            owner_secret: owner_secret.into(),
            owner_profile: SessionUser {
                id: 1,
                phone: "+70000000001".to_string(),
                name: "Nursery owner".to_string(),
                role: ROLE_OWNER.to_string(),
            },
        }
    }
}

/// Read the stored user record, if present and well-formed.
pub fn stored_user(storage: &impl SessionStorage) -> Option<SessionUser> {
    storage
        .get(USER_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
}

/// The gate predicate.
pub fn evaluate(storage: &impl SessionStorage) -> bool {
    let token_ok = storage
        .get(TOKEN_KEY)
        .is_some_and(|t| t.starts_with(OWNER_TOKEN_PREFIX));
    let role_ok = stored_user(storage).is_some_and(|u| u.is_owner());
    let visited = storage.get(VISITED_LOGIN_KEY).is_some();
    token_ok && role_ok && visited
}

/// Owns the client storage and drives the login/logout transitions.
#[derive(Debug)]
pub struct AccessGate<S: SessionStorage> {
    storage: S,
    config: GateConfig,
    pending: bool,
}

impl<S: SessionStorage> AccessGate<S> {
    pub fn new(storage: S, config: GateConfig) -> Self {
        Self {
            storage,
            config,
            pending: false,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Local owner login: `anonymous -> authenticated-owner` on a password
    /// match. Nothing is stored on mismatch.
    pub fn login_owner(&mut self, password: &str) -> Result<(), CoreError> {
        if password != self.config.owner_secret {
            return Err(CoreError::Validation("Invalid password".into()));
        }

        let token = format!(
            "{OWNER_TOKEN_PREFIX}{}",
            chrono::Utc::now().timestamp_millis()
        );
        let user = serde_json::to_string(&self.config.owner_profile)
            .map_err(|e| CoreError::Internal(format!("serialize session user: {e}")))?;

        self.storage.set(TOKEN_KEY, token);
        self.storage.set(USER_KEY, user);
        self.storage.set(VISITED_LOGIN_KEY, "true".to_string());
        self.pending = false;
        Ok(())
    }

    /// Mark a phone/password round trip to the server as in flight.
    pub fn begin_server_login(&mut self) {
        self.pending = true;
    }

    /// Store the server-issued token and user after a successful round trip.
    pub fn complete_server_login(&mut self, token: &str, user: &SessionUser) -> Result<(), CoreError> {
        let user = serde_json::to_string(user)
            .map_err(|e| CoreError::Internal(format!("serialize session user: {e}")))?;
        self.storage.set(TOKEN_KEY, token.to_string());
        self.storage.set(USER_KEY, user);
        self.pending = false;
        Ok(())
    }

    /// The round trip failed; nothing was stored.
    pub fn fail_server_login(&mut self) {
        self.pending = false;
    }

    /// Clear token, user record and login marker.
    pub fn logout(&mut self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
        self.storage.remove(VISITED_LOGIN_KEY);
        self.pending = false;
    }

    pub fn state(&self) -> GateState {
        if self.pending {
            return GateState::Pending;
        }
        let token = self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty());
        match (token, stored_user(&self.storage)) {
            (Some(_), Some(user)) if user.is_owner() => GateState::AuthenticatedOwner,
            (Some(_), Some(_)) => GateState::AuthenticatedUser,
            _ => GateState::Anonymous,
        }
    }

    /// Whether owner screens may be rendered. On `false` the client
    /// redirects to the login screen.
    pub fn is_allowed(&self) -> bool {
        evaluate(&self.storage)
    }
}
