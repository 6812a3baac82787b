pub mod auth;
pub mod health;
pub mod news;
pub mod notes;

use axum::Router;

use crate::state::AppState;

/// Build the site route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                              login form, login (public)
/// /signup                             signup form, signup (public)
/// /logout                             logout (public)
///
/// /news/                              latest news (public)
/// /news/{id}/                         detail (public), post comment (login)
/// /news/edit_comment/{id}/            edit comment (author only)
/// /news/delete_comment/{id}/          delete comment (author only)
///
/// /notes/                             landing (public)
/// /notes/list/                        own notes (login)
/// /notes/add/                         add note (login)
/// /notes/done/                        success page (login)
/// /notes/note/{slug}/                 detail (author only)
/// /notes/edit/{slug}/                 edit (author only)
/// /notes/delete/{slug}/               delete (author only)
/// ```
pub fn site_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(news::router())
        .merge(notes::router())
}
