//! Note model: an owned resource addressed by a unique slug.

use newsroom_core::identity::OwnedResource;
use newsroom_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notes` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Note {
    pub id: DbId,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: DbId,
    pub created_at: Timestamp,
}

impl OwnedResource for Note {
    fn owner_id(&self) -> DbId {
        self.author_id
    }
}

/// DTO for creating a note. `slug` has already been resolved and checked.
#[derive(Debug, Clone)]
pub struct CreateNote {
    pub title: String,
    pub text: String,
    pub slug: String,
}

/// DTO for editing a note. The author never changes.
#[derive(Debug, Clone)]
pub struct UpdateNote {
    pub title: String,
    pub text: String,
    pub slug: String,
}
