/// Domain error shared by the store and HTTP layers.
///
/// Ownership and authentication failures are deliberately separate variants:
/// the HTTP layer turns [`CoreError::AuthenticationRequired`] into a login
/// redirect and [`CoreError::NotOwner`] into the same 404 a missing row gets.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} {key}")]
    NotFound { entity: &'static str, key: String },

    /// Authenticated actor is not the resource owner.
    #[error("Resource not found")]
    NotOwner,

    /// Anonymous actor on an endpoint that needs an identity.
    #[error("Authentication required, redirecting to {login_redirect}")]
    AuthenticationRequired { login_redirect: String },

    /// Submitted payload rejected; `field` names the offending form field.
    #[error("Validation failed on {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        CoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        CoreError::Validation {
            field,
            message: message.into(),
        }
    }
}
