//! Listing policy: which items a viewer sees and in what order.
//!
//! All sorts are stable, so items with equal timestamps keep their insertion
//! order.

use crate::identity::{Identity, OwnedResource};
use crate::types::{DbId, Timestamp};

/// A news item, ordered by its publication date.
pub trait Published {
    fn published_at(&self) -> Timestamp;
}

/// A comment, ordered by creation time and grouped under a parent item.
pub trait Threaded {
    fn parent_id(&self) -> DbId;
    fn created_at(&self) -> Timestamp;
}

/// At most `limit` items, newest first.
pub fn list_parent_items<T: Published>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    items.sort_by(|a, b| b.published_at().cmp(&a.published_at()));
    items.truncate(limit);
    items
}

/// All comments of `parent_id`, oldest first.
pub fn list_comments<T: Threaded>(parent_id: DbId, comments: Vec<T>) -> Vec<T> {
    let mut thread: Vec<T> = comments
        .into_iter()
        .filter(|c| c.parent_id() == parent_id)
        .collect();
    thread.sort_by_key(|c| c.created_at());
    thread
}

/// Items owned by `actor`; nothing for anonymous actors.
pub fn list_owned<T: OwnedResource>(actor: &Identity, items: Vec<T>) -> Vec<T> {
    match actor.id() {
        None => Vec::new(),
        Some(_) => items.into_iter().filter(|item| actor.owns(item)).collect(),
    }
}
