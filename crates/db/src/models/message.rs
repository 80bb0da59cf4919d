//! Buyer/owner message model and DTOs.

use kennel_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A message joined with both parties' contacts and, when the puppy still
/// exists, its name and breed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub content: String,
    pub sender_id: DbId,
    pub receiver_id: DbId,
    pub puppy_id: Option<DbId>,
    pub is_read: bool,
    pub sender_name: Option<String>,
    pub sender_phone: Option<String>,
    pub receiver_name: Option<String>,
    pub receiver_phone: Option<String>,
    pub puppy_name: Option<String>,
    pub puppy_breed: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateMessage {
    pub sender_id: DbId,
    pub receiver_id: DbId,
    pub puppy_id: Option<DbId>,
    pub content: String,
}
