//! Request identity and the ownership contract shared by comments and notes.

use serde::Serialize;

use crate::types::DbId;

/// The actor behind a request.
///
/// Anonymous actors have no identifier and therefore own nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    Anonymous,
    User { id: DbId, username: String },
}

impl Identity {
    pub fn user(id: DbId, username: impl Into<String>) -> Self {
        Identity::User {
            id,
            username: username.into(),
        }
    }

    /// The user id, or `None` for anonymous actors.
    pub fn id(&self) -> Option<DbId> {
        match self {
            Identity::Anonymous => None,
            Identity::User { id, .. } => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::User { .. })
    }

    /// Whether this actor owns `resource`.
    pub fn owns<R: OwnedResource + ?Sized>(&self, resource: &R) -> bool {
        self.id() == Some(resource.owner_id())
    }
}

/// A user-authored item with exactly one owner, fixed at creation.
pub trait OwnedResource {
    fn owner_id(&self) -> DbId;
}
