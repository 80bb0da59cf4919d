//! News post model and DTOs.

use kennel_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct News {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub is_published: bool,
    /// `None` once the author account is gone.
    pub author_id: Option<DbId>,
    pub author_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateNews {
    pub author_id: DbId,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub is_published: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateNews {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub is_published: Option<bool>,
}
