//! Puppy listing model and DTOs.

use kennel_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A listing as read back from the store, joined with its owner's contact.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Puppy {
    pub id: DbId,
    pub name: String,
    pub breed: String,
    pub age: i32,
    pub gender: String,
    pub color: String,
    pub price: f64,
    pub description: String,
    /// Public upload paths, in the order they were submitted.
    pub images: Json<Vec<String>>,
    pub is_available: bool,
    pub is_featured: bool,
    pub owner_id: DbId,
    pub owner_name: Option<String>,
    pub owner_phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreatePuppy {
    pub owner_id: DbId,
    pub name: String,
    pub breed: String,
    pub age: i32,
    pub gender: String,
    pub color: String,
    pub price: f64,
    pub description: String,
    pub images: Vec<String>,
    pub is_available: bool,
    pub is_featured: bool,
}

/// Partial update. `images`, when present, replaces the whole sequence.
#[derive(Debug, Clone, Default)]
pub struct UpdatePuppy {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub color: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub is_available: Option<bool>,
    pub is_featured: Option<bool>,
}

/// Catalog filter as understood by [`PuppyRepo::list`](crate::repositories::PuppyRepo::list).
#[derive(Debug, Clone)]
pub struct PuppyListFilter {
    pub gender: Option<String>,
    pub breed: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub is_available: bool,
}

impl Default for PuppyListFilter {
    fn default() -> Self {
        Self {
            gender: None,
            breed: None,
            min_price: None,
            max_price: None,
            is_available: true,
        }
    }
}
