//! Repository for the `puppies` table.

use kennel_core::types::DbId;
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::models::puppy::{CreatePuppy, Puppy, PuppyListFilter, UpdatePuppy};
use crate::repositories::NOW;

/// Read columns, joined with the owner's contact.
const COLUMNS: &str = "p.id, p.name, p.breed, p.age, p.gender, p.color, p.price, p.description, \
                       p.images, p.is_available, p.is_featured, p.owner_id, \
                       a.name AS owner_name, a.phone AS owner_phone, p.created_at, p.updated_at";

const FROM: &str = "puppies p LEFT JOIN accounts a ON a.id = p.owner_id";

/// Provides CRUD operations for puppy listings.
pub struct PuppyRepo;

impl PuppyRepo {
    /// Insert a new listing and return it with the owner's contact joined in.
    pub async fn create(pool: &SqlitePool, input: &CreatePuppy) -> Result<Puppy, sqlx::Error> {
        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO puppies
                (name, breed, age, gender, color, price, description, images,
                 is_available, is_featured, owner_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.breed)
        .bind(input.age)
        .bind(&input.gender)
        .bind(&input.color)
        .bind(input.price)
        .bind(&input.description)
        .bind(Json(&input.images))
        .bind(input.is_available)
        .bind(input.is_featured)
        .bind(input.owner_id)
        .fetch_one(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Puppy>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {FROM} WHERE p.id = $1");
        sqlx::query_as::<_, Puppy>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Public catalog, newest first. Unset filter fields match everything.
    pub async fn list(
        pool: &SqlitePool,
        filter: &PuppyListFilter,
    ) -> Result<Vec<Puppy>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {FROM}
             WHERE p.is_available = $1
               AND ($2 IS NULL OR p.gender = $2)
               AND ($3 IS NULL OR p.breed = $3)
               AND ($4 IS NULL OR p.price >= $4)
               AND ($5 IS NULL OR p.price <= $5)
             ORDER BY p.created_at DESC, p.id DESC"
        );
        sqlx::query_as::<_, Puppy>(&query)
            .bind(filter.is_available)
            .bind(&filter.gender)
            .bind(&filter.breed)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .fetch_all(pool)
            .await
    }

    /// Every listing owned by `owner_id`, available or not, newest first.
    pub async fn list_by_owner(
        pool: &SqlitePool,
        owner_id: DbId,
    ) -> Result<Vec<Puppy>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {FROM}
             WHERE p.owner_id = $1
             ORDER BY p.created_at DESC, p.id DESC"
        );
        sqlx::query_as::<_, Puppy>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Update a listing. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdatePuppy,
    ) -> Result<Option<Puppy>, sqlx::Error> {
        let query = format!(
            "UPDATE puppies SET
                name = COALESCE($2, name),
                breed = COALESCE($3, breed),
                age = COALESCE($4, age),
                gender = COALESCE($5, gender),
                color = COALESCE($6, color),
                price = COALESCE($7, price),
                description = COALESCE($8, description),
                images = COALESCE($9, images),
                is_available = COALESCE($10, is_available),
                is_featured = COALESCE($11, is_featured),
                updated_at = {NOW}
             WHERE id = $1"
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.breed)
            .bind(input.age)
            .bind(&input.gender)
            .bind(&input.color)
            .bind(input.price)
            .bind(&input.description)
            .bind(input.images.as_ref().map(Json))
            .bind(input.is_available)
            .bind(input.is_featured)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(pool, id).await
    }

    /// Physically delete a listing. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM puppies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
