//! Repository for the `dogs` table.

use kennel_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::dog::{CreateDog, Dog, UpdateDog};
use crate::repositories::NOW;

const COLUMNS: &str = "id, name, photo, achievements, description, created_at, updated_at";

/// Provides CRUD operations for the dog roster.
pub struct DogRepo;

impl DogRepo {
    pub async fn create(pool: &SqlitePool, input: &CreateDog) -> Result<Dog, sqlx::Error> {
        let query = format!(
            "INSERT INTO dogs (name, photo, achievements, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dog>(&query)
            .bind(&input.name)
            .bind(&input.photo)
            .bind(&input.achievements)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Dog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dogs WHERE id = $1");
        sqlx::query_as::<_, Dog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the whole roster, newest first.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Dog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dogs ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Dog>(&query).fetch_all(pool).await
    }

    /// Update a dog. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateDog,
    ) -> Result<Option<Dog>, sqlx::Error> {
        let query = format!(
            "UPDATE dogs SET
                name = COALESCE($2, name),
                photo = COALESCE($3, photo),
                achievements = COALESCE($4, achievements),
                description = COALESCE($5, description),
                updated_at = {NOW}
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dog>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.photo)
            .bind(&input.achievements)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dogs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
