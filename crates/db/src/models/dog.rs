//! Roster dog model and DTOs.

use kennel_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dog {
    pub id: DbId,
    pub name: String,
    pub photo: Option<String>,
    pub achievements: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateDog {
    pub name: String,
    pub photo: Option<String>,
    pub achievements: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateDog {
    pub name: Option<String>,
    pub photo: Option<String>,
    pub achievements: Option<String>,
    pub description: Option<String>,
}
