//! Repository for the `news` table.

use kennel_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::news::{CreateNews, News, UpdateNews};
use crate::repositories::NOW;

const COLUMNS: &str = "n.id, n.title, n.content, n.image, n.is_published, n.author_id, \
                       a.name AS author_name, n.created_at, n.updated_at";

const FROM: &str = "news n LEFT JOIN accounts a ON a.id = n.author_id";

/// Provides CRUD operations for news posts.
pub struct NewsRepo;

impl NewsRepo {
    pub async fn create(pool: &SqlitePool, input: &CreateNews) -> Result<News, sqlx::Error> {
        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO news (title, content, image, is_published, author_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.image)
        .bind(input.is_published)
        .bind(input.author_id)
        .fetch_one(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a post regardless of its published flag.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<News>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {FROM} WHERE n.id = $1");
        sqlx::query_as::<_, News>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of the public feed (published posts only), newest first.
    pub async fn list_published(
        pool: &SqlitePool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<News>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {FROM}
             WHERE n.is_published = 1
             ORDER BY n.created_at DESC, n.id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_published(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM news WHERE is_published = 1")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Every post written by `author_id`, published or not, newest first.
    pub async fn list_by_author(
        pool: &SqlitePool,
        author_id: DbId,
    ) -> Result<Vec<News>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {FROM}
             WHERE n.author_id = $1
             ORDER BY n.created_at DESC, n.id DESC"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(author_id)
            .fetch_all(pool)
            .await
    }

    /// Update a post. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateNews,
    ) -> Result<Option<News>, sqlx::Error> {
        let query = format!(
            "UPDATE news SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                image = COALESCE($4, image),
                is_published = COALESCE($5, is_published),
                updated_at = {NOW}
             WHERE id = $1"
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.image)
            .bind(input.is_published)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(pool, id).await
    }

    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
