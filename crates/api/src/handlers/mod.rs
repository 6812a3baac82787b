pub mod auth;
pub mod news;
pub mod notes;

use axum::extract::OriginalUri;

/// Path and query of the request as the client sent it, for `next=`.
pub(crate) fn requested_path(uri: &OriginalUri) -> String {
    uri.0
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.0.path().to_string())
}
