//! Repository for the `news` table.

use newsroom_core::types::DbId;
use sqlx::PgPool;

use crate::models::news::{CreateNews, News};

const COLUMNS: &str = "id, title, text, date, created_at";

/// Provides seeding and read access for news items.
pub struct NewsRepo;

impl NewsRepo {
    /// Insert a news item. A missing `date` defaults to `NOW()`.
    pub async fn create(pool: &PgPool, input: &CreateNews) -> Result<News, sqlx::Error> {
        let query = format!(
            "INSERT INTO news (title, text, date)
             VALUES ($1, $2, COALESCE($3, NOW()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(&input.title)
            .bind(&input.text)
            .bind(input.date)
            .fetch_one(pool)
            .await
    }

    /// Find a news item by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<News>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news WHERE id = $1");
        sqlx::query_as::<_, News>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The `limit` most recently published items, newest first.
    ///
    /// Ties on `date` fall back to insertion order.
    pub async fn list_latest(pool: &PgPool, limit: i64) -> Result<Vec<News>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM news
             ORDER BY date DESC, id ASC
             LIMIT $1"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
