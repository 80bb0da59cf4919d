//! Repository for the `messages` table.
//!
//! Reads join both parties from `accounts` and the puppy from `puppies`.
//! `puppy_id` is a weak reference, so the puppy columns come back `NULL`
//! once the listing has been deleted.

use kennel_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::message::{CreateMessage, Message};
use crate::repositories::NOW;

const COLUMNS: &str = "m.id, m.content, m.sender_id, m.receiver_id, m.puppy_id, m.is_read, \
                       s.name AS sender_name, s.phone AS sender_phone, \
                       r.name AS receiver_name, r.phone AS receiver_phone, \
                       p.name AS puppy_name, p.breed AS puppy_breed, \
                       m.created_at, m.updated_at";

const FROM: &str = "messages m \
                    LEFT JOIN accounts s ON s.id = m.sender_id \
                    LEFT JOIN accounts r ON r.id = m.receiver_id \
                    LEFT JOIN puppies p ON p.id = m.puppy_id";

const INSERT: &str = "INSERT INTO messages (sender_id, receiver_id, puppy_id, content)
                      VALUES ($1, $2, $3, $4)
                      RETURNING id";

/// Provides operations for buyer/owner messages.
pub struct MessageRepo;

impl MessageRepo {
    pub async fn create(pool: &SqlitePool, input: &CreateMessage) -> Result<Message, sqlx::Error> {
        let (id,): (DbId,) = sqlx::query_as(INSERT)
            .bind(input.sender_id)
            .bind(input.receiver_id)
            .bind(input.puppy_id)
            .bind(&input.content)
            .fetch_one(pool)
            .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Answer `original` from its receiver: insert the reversed message about
    /// the same puppy and mark the original read, atomically.
    pub async fn create_reply(
        pool: &SqlitePool,
        original: &Message,
        content: &str,
    ) -> Result<Message, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (id,): (DbId,) = sqlx::query_as(INSERT)
            .bind(original.receiver_id)
            .bind(original.sender_id)
            .bind(original.puppy_id)
            .bind(content)
            .fetch_one(&mut *tx)
            .await?;

        let mark = format!("UPDATE messages SET is_read = 1, updated_at = {NOW} WHERE id = $1");
        sqlx::query(&mark)
            .bind(original.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Message>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {FROM} WHERE m.id = $1");
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All messages about one puppy, newest first.
    pub async fn list_for_puppy(
        pool: &SqlitePool,
        puppy_id: DbId,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {FROM}
             WHERE m.puppy_id = $1
             ORDER BY m.created_at DESC, m.id DESC"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(puppy_id)
            .fetch_all(pool)
            .await
    }

    /// One page of messages received by `receiver_id`, optionally unread only.
    pub async fn list_received(
        pool: &SqlitePool,
        receiver_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {FROM}
             WHERE m.receiver_id = $1 AND ($2 = 0 OR m.is_read = 0)
             ORDER BY m.created_at DESC, m.id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(receiver_id)
            .bind(unread_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_received(
        pool: &SqlitePool,
        receiver_id: DbId,
        unread_only: bool,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM messages WHERE receiver_id = $1 AND ($2 = 0 OR is_read = 0)",
        )
        .bind(receiver_id)
        .bind(unread_only)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// One page of messages sent by `sender_id`, newest first.
    pub async fn list_sent(
        pool: &SqlitePool,
        sender_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {FROM}
             WHERE m.sender_id = $1
             ORDER BY m.created_at DESC, m.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(sender_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_sent(pool: &SqlitePool, sender_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages WHERE sender_id = $1")
            .bind(sender_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Number of unread messages addressed to `receiver_id`.
    pub async fn unread_count(pool: &SqlitePool, receiver_id: DbId) -> Result<i64, sqlx::Error> {
        Self::count_received(pool, receiver_id, true).await
    }

    /// Mark a message read. Returns `true` if the row exists.
    pub async fn mark_read(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("UPDATE messages SET is_read = 1, updated_at = {NOW} WHERE id = $1");
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
