//! Route definitions for news and comments.

use axum::routing::get;
use axum::Router;

use crate::handlers::news;
use crate::state::AppState;

/// ```text
/// GET  /news/                        -> list_news
/// GET  /news/{id}/                   -> news_detail
/// POST /news/{id}/                   -> post_comment
/// GET  /news/edit_comment/{id}/      -> edit_comment_form
/// POST /news/edit_comment/{id}/      -> edit_comment
/// GET  /news/delete_comment/{id}/    -> delete_comment_form
/// POST /news/delete_comment/{id}/    -> delete_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/news/", get(news::list_news))
        .route("/news/{id}/", get(news::news_detail).post(news::post_comment))
        .route(
            "/news/edit_comment/{id}/",
            get(news::edit_comment_form).post(news::edit_comment),
        )
        .route(
            "/news/delete_comment/{id}/",
            get(news::delete_comment_form).post(news::delete_comment),
        )
}
