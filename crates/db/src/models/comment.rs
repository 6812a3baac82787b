//! Comment model: an owned resource attached to one news item.

use newsroom_core::identity::OwnedResource;
use newsroom_core::listing::Threaded;
use newsroom_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `comments` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Comment {
    pub id: DbId,
    pub news_id: DbId,
    pub author_id: DbId,
    pub text: String,
    pub created_at: Timestamp,
}

impl OwnedResource for Comment {
    fn owner_id(&self) -> DbId {
        self.author_id
    }
}

impl Threaded for Comment {
    fn parent_id(&self) -> DbId {
        self.news_id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

/// DTO for creating a comment. The author is passed separately and never
/// taken from client input.
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub news_id: DbId,
    pub text: String,
}

/// DTO for editing a comment. Only the text is mutable.
#[derive(Debug, Clone)]
pub struct UpdateComment {
    pub text: String,
}
