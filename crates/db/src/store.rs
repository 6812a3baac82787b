//! The data-store boundary used by the HTTP layer.
//!
//! Handlers talk to a `dyn Store` so the same request code runs against
//! PostgreSQL in production and [`crate::memory::MemoryStore`] in tests and
//! local runs without a database. Lookups are by primary key or slug only;
//! ownership checks happen above this layer.

use async_trait::async_trait;
use newsroom_core::error::CoreError;
use newsroom_core::types::DbId;

use crate::models::comment::{Comment, CreateComment, UpdateComment};
use crate::models::news::{CreateNews, News};
use crate::models::note::{CreateNote, Note, UpdateNote};
use crate::models::user::{CreateUser, User};
use crate::repositories::{CommentRepo, NewsRepo, NoteRepo, UserRepo};
use crate::DbPool;

/// PostgreSQL error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL error code for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Constraint guarding note slugs.
pub const UQ_NOTES_SLUG: &str = "uq_notes_slug";
/// Constraint guarding usernames.
pub const UQ_USERS_USERNAME: &str = "uq_users_username";
/// Constraint tying a comment to its news item.
pub const FK_COMMENTS_NEWS: &str = "fk_comments_news";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write; carries the constraint name.
    #[error("Duplicate value violates unique constraint: {0}")]
    UniqueViolation(String),

    /// A write referenced a row that does not exist; carries the constraint name.
    #[error("Referenced row does not exist: {0}")]
    MissingReference(String),

    /// Any other backend failure. No partial write has been committed.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => return StoreError::UniqueViolation(constraint),
                Some(FOREIGN_KEY_VIOLATION) => return StoreError::MissingReference(constraint),
                _ => {}
            }
        }
        StoreError::Unavailable(err.to_string())
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(constraint) => CoreError::Conflict(format!(
                "Duplicate value violates unique constraint: {constraint}"
            )),
            StoreError::MissingReference(constraint) => {
                CoreError::not_found("Reference", constraint)
            }
            StoreError::Unavailable(msg) => CoreError::StorageUnavailable(msg),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap liveness check.
    async fn health_check(&self) -> StoreResult<()>;

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User>;
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    async fn create_news(&self, input: &CreateNews) -> StoreResult<News>;
    async fn find_news(&self, id: DbId) -> StoreResult<Option<News>>;
    /// At most `limit` items, newest publication date first.
    async fn list_latest_news(&self, limit: usize) -> StoreResult<Vec<News>>;

    async fn create_comment(&self, author_id: DbId, input: &CreateComment)
        -> StoreResult<Comment>;
    async fn find_comment(&self, id: DbId) -> StoreResult<Option<Comment>>;
    /// Comments of one news item, oldest first.
    async fn list_comments(&self, news_id: DbId) -> StoreResult<Vec<Comment>>;
    async fn update_comment(&self, id: DbId, input: &UpdateComment)
        -> StoreResult<Option<Comment>>;
    async fn delete_comment(&self, id: DbId) -> StoreResult<bool>;

    async fn create_note(&self, author_id: DbId, input: &CreateNote) -> StoreResult<Note>;
    async fn find_note_by_slug(&self, slug: &str) -> StoreResult<Option<Note>>;
    /// Whether `slug` is used by any note other than `exclude_id`.
    async fn slug_exists(&self, slug: &str, exclude_id: Option<DbId>) -> StoreResult<bool>;
    async fn list_notes_by_author(&self, author_id: DbId) -> StoreResult<Vec<Note>>;
    async fn update_note(&self, id: DbId, input: &UpdateNote) -> StoreResult<Option<Note>>;
    async fn delete_note(&self, id: DbId) -> StoreResult<bool>;
}

/// [`Store`] backed by the PostgreSQL repositories.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }

    async fn create_news(&self, input: &CreateNews) -> StoreResult<News> {
        Ok(NewsRepo::create(&self.pool, input).await?)
    }

    async fn find_news(&self, id: DbId) -> StoreResult<Option<News>> {
        Ok(NewsRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_latest_news(&self, limit: usize) -> StoreResult<Vec<News>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        Ok(NewsRepo::list_latest(&self.pool, limit).await?)
    }

    async fn create_comment(
        &self,
        author_id: DbId,
        input: &CreateComment,
    ) -> StoreResult<Comment> {
        Ok(CommentRepo::create(&self.pool, author_id, input).await?)
    }

    async fn find_comment(&self, id: DbId) -> StoreResult<Option<Comment>> {
        Ok(CommentRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_comments(&self, news_id: DbId) -> StoreResult<Vec<Comment>> {
        Ok(CommentRepo::list_by_news(&self.pool, news_id).await?)
    }

    async fn update_comment(
        &self,
        id: DbId,
        input: &UpdateComment,
    ) -> StoreResult<Option<Comment>> {
        Ok(CommentRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_comment(&self, id: DbId) -> StoreResult<bool> {
        Ok(CommentRepo::delete(&self.pool, id).await?)
    }

    async fn create_note(&self, author_id: DbId, input: &CreateNote) -> StoreResult<Note> {
        Ok(NoteRepo::create(&self.pool, author_id, input).await?)
    }

    async fn find_note_by_slug(&self, slug: &str) -> StoreResult<Option<Note>> {
        Ok(NoteRepo::find_by_slug(&self.pool, slug).await?)
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<DbId>) -> StoreResult<bool> {
        Ok(NoteRepo::slug_exists(&self.pool, slug, exclude_id).await?)
    }

    async fn list_notes_by_author(&self, author_id: DbId) -> StoreResult<Vec<Note>> {
        Ok(NoteRepo::list_by_author(&self.pool, author_id).await?)
    }

    async fn update_note(&self, id: DbId, input: &UpdateNote) -> StoreResult<Option<Note>> {
        Ok(NoteRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_note(&self, id: DbId) -> StoreResult<bool> {
        Ok(NoteRepo::delete(&self.pool, id).await?)
    }
}
