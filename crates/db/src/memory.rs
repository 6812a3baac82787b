//! In-process [`Store`] used by integration tests and `STORE=memory` runs.
//!
//! Mirrors the PostgreSQL schema's guarantees: ids are assigned
//! sequentially, usernames and note slugs are unique, and the listing
//! queries return the same order as their SQL counterparts.

use async_trait::async_trait;
use chrono::Utc;
use newsroom_core::identity::Identity;
use newsroom_core::listing::{list_comments, list_owned, list_parent_items};
use newsroom_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::comment::{Comment, CreateComment, UpdateComment};
use crate::models::news::{CreateNews, News};
use crate::models::note::{CreateNote, Note, UpdateNote};
use crate::models::user::{CreateUser, User};
use crate::store::{
    Store, StoreError, StoreResult, FK_COMMENTS_NEWS, UQ_NOTES_SLUG, UQ_USERS_USERNAME,
};

#[derive(Default)]
struct Tables {
    next_id: DbId,
    users: Vec<User>,
    news: Vec<News>,
    comments: Vec<Comment>,
    notes: Vec<Note>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == input.username) {
            return Err(StoreError::UniqueViolation(UQ_USERS_USERNAME.to_string()));
        }
        let user = User {
            id: tables.next_id(),
            username: input.username.clone(),
            password_hash: input.password_hash.clone(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_news(&self, input: &CreateNews) -> StoreResult<News> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let news = News {
            id: tables.next_id(),
            title: input.title.clone(),
            text: input.text.clone(),
            date: input.date.unwrap_or(now),
            created_at: now,
        };
        tables.news.push(news.clone());
        Ok(news)
    }

    async fn find_news(&self, id: DbId) -> StoreResult<Option<News>> {
        let tables = self.tables.read().await;
        Ok(tables.news.iter().find(|n| n.id == id).cloned())
    }

    async fn list_latest_news(&self, limit: usize) -> StoreResult<Vec<News>> {
        let tables = self.tables.read().await;
        Ok(list_parent_items(tables.news.clone(), limit))
    }

    async fn create_comment(
        &self,
        author_id: DbId,
        input: &CreateComment,
    ) -> StoreResult<Comment> {
        let mut tables = self.tables.write().await;
        if !tables.news.iter().any(|n| n.id == input.news_id) {
            return Err(StoreError::MissingReference(FK_COMMENTS_NEWS.to_string()));
        }
        let comment = Comment {
            id: tables.next_id(),
            news_id: input.news_id,
            author_id,
            text: input.text.clone(),
            created_at: Utc::now(),
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn find_comment(&self, id: DbId) -> StoreResult<Option<Comment>> {
        let tables = self.tables.read().await;
        Ok(tables.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn list_comments(&self, news_id: DbId) -> StoreResult<Vec<Comment>> {
        let tables = self.tables.read().await;
        Ok(list_comments(news_id, tables.comments.clone()))
    }

    async fn update_comment(
        &self,
        id: DbId,
        input: &UpdateComment,
    ) -> StoreResult<Option<Comment>> {
        let mut tables = self.tables.write().await;
        Ok(tables.comments.iter_mut().find(|c| c.id == id).map(|c| {
            c.text = input.text.clone();
            c.clone()
        }))
    }

    async fn delete_comment(&self, id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.comments.len();
        tables.comments.retain(|c| c.id != id);
        Ok(tables.comments.len() < before)
    }

    async fn create_note(&self, author_id: DbId, input: &CreateNote) -> StoreResult<Note> {
        let mut tables = self.tables.write().await;
        if tables.notes.iter().any(|n| n.slug == input.slug) {
            return Err(StoreError::UniqueViolation(UQ_NOTES_SLUG.to_string()));
        }
        let note = Note {
            id: tables.next_id(),
            title: input.title.clone(),
            text: input.text.clone(),
            slug: input.slug.clone(),
            author_id,
            created_at: Utc::now(),
        };
        tables.notes.push(note.clone());
        Ok(note)
    }

    async fn find_note_by_slug(&self, slug: &str) -> StoreResult<Option<Note>> {
        let tables = self.tables.read().await;
        Ok(tables.notes.iter().find(|n| n.slug == slug).cloned())
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<DbId>) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .notes
            .iter()
            .any(|n| n.slug == slug && Some(n.id) != exclude_id))
    }

    async fn list_notes_by_author(&self, author_id: DbId) -> StoreResult<Vec<Note>> {
        let tables = self.tables.read().await;
        // Only the id matters for ownership filtering.
        let owner = Identity::user(author_id, "");
        Ok(list_owned(&owner, tables.notes.clone()))
    }

    async fn update_note(&self, id: DbId, input: &UpdateNote) -> StoreResult<Option<Note>> {
        let mut tables = self.tables.write().await;
        if tables
            .notes
            .iter()
            .any(|n| n.slug == input.slug && n.id != id)
        {
            return Err(StoreError::UniqueViolation(UQ_NOTES_SLUG.to_string()));
        }
        Ok(tables.notes.iter_mut().find(|n| n.id == id).map(|n| {
            n.title = input.title.clone();
            n.text = input.text.clone();
            n.slug = input.slug.clone();
            n.clone()
        }))
    }

    async fn delete_note(&self, id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.notes.len();
        tables.notes.retain(|n| n.id != id);
        Ok(tables.notes.len() < before)
    }
}
