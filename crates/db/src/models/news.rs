//! News item model. News is seeded externally; there is no update DTO.

use newsroom_core::listing::Published;
use newsroom_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `news` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct News {
    pub id: DbId,
    pub title: String,
    pub text: String,
    /// Publication date; drives home page ordering.
    pub date: Timestamp,
    pub created_at: Timestamp,
}

impl Published for News {
    fn published_at(&self) -> Timestamp {
        self.date
    }
}

/// DTO for seeding a news item. `date` defaults to now.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNews {
    pub title: String,
    pub text: String,
    pub date: Option<Timestamp>,
}
