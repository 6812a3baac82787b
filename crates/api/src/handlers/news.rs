//! Handlers for news items and their comments.
//!
//! News pages are public. Posting a comment needs a login; editing or
//! deleting one is reserved to its author, and everyone else gets a 404.

use axum::extract::{OriginalUri, Path, State};
use axum::response::Response;
use axum::Json;
use newsroom_core::error::CoreError;
use newsroom_core::guard::Action;
use newsroom_core::identity::Identity;
use newsroom_core::types::DbId;
use newsroom_core::validation::{validate_comment_text, FIELD_TEXT};
use newsroom_db::models::comment::{Comment, CreateComment, UpdateComment};
use newsroom_db::models::news::News;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::FormBody;
use crate::handlers::requested_path;
use crate::middleware::auth::CurrentUser;
use crate::response::{found, FormView};
use crate::state::AppState;

/// Comment form fields.
#[derive(Debug, Default, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub text: String,
}

impl CommentForm {
    fn view(&self) -> FormView {
        FormView::new(&[FIELD_TEXT]).with_value(FIELD_TEXT, &self.text)
    }
}

/// Home page.
#[derive(Debug, Serialize)]
pub struct NewsListPage {
    pub news_list: Vec<News>,
}

/// Detail page. `form` is present only for authenticated viewers.
#[derive(Debug, Serialize)]
pub struct NewsDetailPage {
    pub news: News,
    pub comments: Vec<Comment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormView>,
}

/// Edit page for a comment.
#[derive(Debug, Serialize)]
pub struct CommentEditPage {
    pub comment: Comment,
    pub form: FormView,
}

/// Delete confirmation page for a comment.
#[derive(Debug, Serialize)]
pub struct CommentDeletePage {
    pub comment: Comment,
}

/// Where comment mutations land: the comment block of the news page.
pub fn comments_anchor(news_id: DbId) -> String {
    format!("/news/{news_id}/#comments")
}

async fn find_news(state: &AppState, id: DbId) -> AppResult<News> {
    state
        .store
        .find_news(id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("News", id)))
}

/// Fetch a comment and check that `actor` may perform `action` on it.
///
/// Anonymous actors are redirected before the lookup, so a missing comment
/// never turns a login redirect into a 404.
async fn authorized_comment(
    state: &AppState,
    actor: &Identity,
    id: DbId,
    action: Action,
    path: &str,
) -> AppResult<Comment> {
    state
        .guard
        .require_identity(actor, path)
        .into_result(FIELD_TEXT)?;

    let comment = state
        .store
        .find_comment(id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Comment", id)))?;

    state
        .guard
        .authorize(actor, &comment, action, path)
        .into_result(FIELD_TEXT)?;

    Ok(comment)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /news/
pub async fn list_news(State(state): State<AppState>) -> AppResult<Json<NewsListPage>> {
    let news_list = state
        .store
        .list_latest_news(state.policy().news_count_on_home_page)
        .await?;
    Ok(Json(NewsListPage { news_list }))
}

/// GET /news/{id}/
pub async fn news_detail(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<NewsDetailPage>> {
    let news = find_news(&state, id).await?;
    let comments = state.store.list_comments(news.id).await?;
    let form = actor
        .is_authenticated()
        .then(|| CommentForm::default().view());

    Ok(Json(NewsDetailPage {
        news,
        comments,
        form,
    }))
}

/// POST /news/{id}/
pub async fn post_comment(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    uri: OriginalUri,
    Path(id): Path<DbId>,
    body: FormBody,
) -> AppResult<Response> {
    state
        .guard
        .require_identity(&actor, &requested_path(&uri))
        .into_result(FIELD_TEXT)?;
    let author_id = actor
        .id()
        .ok_or_else(|| AppError::InternalError("authenticated actor without id".into()))?;

    let news = find_news(&state, id).await?;
    let input: CommentForm = body.decode().await?;

    validate_comment_text(state.policy(), &input.text).map_err(|e| input.view().reject(e))?;

    let comment = state
        .store
        .create_comment(
            author_id,
            &CreateComment {
                news_id: news.id,
                text: input.text,
            },
        )
        .await?;

    tracing::info!(
        user_id = author_id,
        news_id = news.id,
        comment_id = comment.id,
        "Comment created"
    );

    Ok(found(comments_anchor(news.id)))
}

/// GET /news/edit_comment/{id}/
pub async fn edit_comment_form(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    uri: OriginalUri,
    Path(id): Path<DbId>,
) -> AppResult<Json<CommentEditPage>> {
    let comment =
        authorized_comment(&state, &actor, id, Action::Edit, &requested_path(&uri)).await?;
    let form = FormView::new(&[FIELD_TEXT]).with_value(FIELD_TEXT, &comment.text);
    Ok(Json(CommentEditPage { comment, form }))
}

/// POST /news/edit_comment/{id}/
pub async fn edit_comment(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    uri: OriginalUri,
    Path(id): Path<DbId>,
    body: FormBody,
) -> AppResult<Response> {
    let comment =
        authorized_comment(&state, &actor, id, Action::Edit, &requested_path(&uri)).await?;
    let input: CommentForm = body.decode().await?;

    validate_comment_text(state.policy(), &input.text).map_err(|e| input.view().reject(e))?;

    state
        .store
        .update_comment(comment.id, &UpdateComment { text: input.text })
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Comment", comment.id)))?;

    tracing::info!(user_id = ?actor.id(), comment_id = comment.id, "Comment edited");

    Ok(found(comments_anchor(comment.news_id)))
}

/// GET /news/delete_comment/{id}/
pub async fn delete_comment_form(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    uri: OriginalUri,
    Path(id): Path<DbId>,
) -> AppResult<Json<CommentDeletePage>> {
    let comment =
        authorized_comment(&state, &actor, id, Action::Delete, &requested_path(&uri)).await?;
    Ok(Json(CommentDeletePage { comment }))
}

/// POST /news/delete_comment/{id}/
pub async fn delete_comment(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    uri: OriginalUri,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let comment =
        authorized_comment(&state, &actor, id, Action::Delete, &requested_path(&uri)).await?;

    if !state.store.delete_comment(comment.id).await? {
        return Err(AppError::Core(CoreError::not_found("Comment", comment.id)));
    }

    tracing::info!(user_id = ?actor.id(), comment_id = comment.id, "Comment deleted");

    Ok(found(comments_anchor(comment.news_id)))
}
