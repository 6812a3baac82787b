//! Handlers for personal notes.
//!
//! Every page except the landing page needs a login. A note is visible only
//! to its author; other users get a 404 for its detail, edit, and delete pages.

use axum::extract::{OriginalUri, Path, State};
use axum::response::Response;
use axum::Json;
use newsroom_core::error::CoreError;
use newsroom_core::guard::Action;
use newsroom_core::identity::Identity;
use newsroom_core::policy::ContentPolicy;
use newsroom_core::slug::{ensure_unique, resolve_slug};
use newsroom_core::types::DbId;
use newsroom_core::validation::{validate_note_fields, FIELD_SLUG, FIELD_TEXT, FIELD_TITLE};
use newsroom_db::models::note::{CreateNote, Note, UpdateNote};
use newsroom_db::store::UQ_NOTES_SLUG;
use newsroom_db::StoreError;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::FormBody;
use crate::handlers::requested_path;
use crate::middleware::auth::CurrentUser;
use crate::response::{found, FormPage, FormView};
use crate::state::AppState;

/// Landing for every successful note mutation.
pub const SUCCESS_URL: &str = "/notes/done/";

const NOTE_FIELDS: &[&str] = &[FIELD_TITLE, FIELD_TEXT, FIELD_SLUG];

/// Note form fields. A blank or missing slug is derived from the title.
#[derive(Debug, Default, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub slug: Option<String>,
}

impl NoteForm {
    fn view(&self) -> FormView {
        FormView::new(NOTE_FIELDS)
            .with_value(FIELD_TITLE, &self.title)
            .with_value(FIELD_TEXT, &self.text)
            .with_value(FIELD_SLUG, self.slug.clone().unwrap_or_default())
    }
}

#[derive(Debug, Serialize)]
pub struct NotesHomePage {
    pub user: Identity,
}

#[derive(Debug, Serialize)]
pub struct NoteListPage {
    pub object_list: Vec<Note>,
}

#[derive(Debug, Serialize)]
pub struct NotePage {
    pub note: Note,
}

#[derive(Debug, Serialize)]
pub struct NoteEditPage {
    pub note: Note,
    pub form: FormView,
}

#[derive(Debug, Serialize)]
pub struct SuccessPage {
    pub message: &'static str,
}

fn note_view(note: &Note) -> FormView {
    FormView::new(NOTE_FIELDS)
        .with_value(FIELD_TITLE, &note.title)
        .with_value(FIELD_TEXT, &note.text)
        .with_value(FIELD_SLUG, &note.slug)
}

/// Anonymous actors are redirected before the lookup, so an unknown slug
/// never turns a login redirect into a 404.
async fn authorized_note(
    state: &AppState,
    actor: &Identity,
    slug: &str,
    action: Action,
    path: &str,
) -> AppResult<Note> {
    state
        .guard
        .require_identity(actor, path)
        .into_result(FIELD_SLUG)?;

    let note = state
        .store
        .find_note_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Note", slug)))?;

    state
        .guard
        .authorize(actor, &note, action, path)
        .into_result(FIELD_SLUG)?;

    Ok(note)
}

fn require_author(state: &AppState, actor: &Identity, uri: &OriginalUri) -> AppResult<DbId> {
    state
        .guard
        .require_identity(actor, &requested_path(uri))
        .into_result(FIELD_SLUG)?;
    actor
        .id()
        .ok_or_else(|| AppError::InternalError("authenticated actor without id".into()))
}

/// Validate the form and settle on a slug that no other note uses.
async fn validated_slug(
    state: &AppState,
    input: &NoteForm,
    exclude_id: Option<DbId>,
) -> AppResult<String> {
    let policy = state.policy();
    validate_note_fields(policy, &input.title, &input.text).map_err(|e| input.view().reject(e))?;

    let store = &state.store;
    resolve_slug(policy, &input.title, input.slug.as_deref(), |slug| async move {
        Ok::<_, AppError>(store.slug_exists(&slug, exclude_id).await?)
    })
    .await
    .map_err(|e| match e {
        AppError::Core(core) => input.view().reject(core),
        other => other,
    })
}

/// A concurrent writer may claim the slug between the check and the write;
/// the unique index then rejects it and the form reports the same collision.
fn slug_conflict(policy: &ContentPolicy, slug: &str, form: FormView, err: StoreError) -> AppError {
    let is_slug_violation = matches!(&err, StoreError::UniqueViolation(c) if c == UQ_NOTES_SLUG);
    if !is_slug_violation {
        return AppError::Store(err);
    }
    match ensure_unique(policy, slug, true) {
        Err(e) => form.reject(e),
        Ok(()) => AppError::Store(err),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /notes/
pub async fn home(CurrentUser(actor): CurrentUser) -> Json<NotesHomePage> {
    Json(NotesHomePage { user: actor })
}

/// GET /notes/list/
pub async fn list_notes(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    uri: OriginalUri,
) -> AppResult<Json<NoteListPage>> {
    state
        .guard
        .authorize_listing(&actor, &requested_path(&uri))
        .into_result(FIELD_SLUG)?;

    let object_list = match actor.id() {
        Some(author_id) => state.store.list_notes_by_author(author_id).await?,
        None => Vec::new(),
    };
    Ok(Json(NoteListPage { object_list }))
}

/// GET /notes/add/
pub async fn add_note_form(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    uri: OriginalUri,
) -> AppResult<Json<FormPage>> {
    require_author(&state, &actor, &uri)?;
    Ok(Json(FormPage {
        form: FormView::new(NOTE_FIELDS),
    }))
}

/// POST /notes/add/
pub async fn add_note(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    uri: OriginalUri,
    body: FormBody,
) -> AppResult<Response> {
    let author_id = require_author(&state, &actor, &uri)?;
    let input: NoteForm = body.decode().await?;
    let slug = validated_slug(&state, &input, None).await?;

    let view = input.view();
    let note = state
        .store
        .create_note(
            author_id,
            &CreateNote {
                title: input.title,
                text: input.text,
                slug: slug.clone(),
            },
        )
        .await
        .map_err(|e| slug_conflict(state.policy(), &slug, view, e))?;

    tracing::info!(user_id = author_id, note_id = note.id, slug = %note.slug, "Note created");

    Ok(found(SUCCESS_URL))
}

/// GET /notes/done/
pub async fn done(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    uri: OriginalUri,
) -> AppResult<Json<SuccessPage>> {
    require_author(&state, &actor, &uri)?;
    Ok(Json(SuccessPage {
        message: "Успешно!",
    }))
}

/// GET /notes/note/{slug}/
pub async fn note_detail(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    uri: OriginalUri,
    Path(slug): Path<String>,
) -> AppResult<Json<NotePage>> {
    let note = authorized_note(&state, &actor, &slug, Action::View, &requested_path(&uri)).await?;
    Ok(Json(NotePage { note }))
}

/// GET /notes/edit/{slug}/
pub async fn edit_note_form(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    uri: OriginalUri,
    Path(slug): Path<String>,
) -> AppResult<Json<NoteEditPage>> {
    let note = authorized_note(&state, &actor, &slug, Action::Edit, &requested_path(&uri)).await?;
    let form = note_view(&note);
    Ok(Json(NoteEditPage { note, form }))
}

/// POST /notes/edit/{slug}/
pub async fn edit_note(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    uri: OriginalUri,
    Path(slug): Path<String>,
    body: FormBody,
) -> AppResult<Response> {
    let note = authorized_note(&state, &actor, &slug, Action::Edit, &requested_path(&uri)).await?;
    let input: NoteForm = body.decode().await?;
    let new_slug = validated_slug(&state, &input, Some(note.id)).await?;

    let view = input.view();
    state
        .store
        .update_note(
            note.id,
            &UpdateNote {
                title: input.title,
                text: input.text,
                slug: new_slug.clone(),
            },
        )
        .await
        .map_err(|e| slug_conflict(state.policy(), &new_slug, view, e))?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Note", &slug)))?;

    tracing::info!(user_id = ?actor.id(), note_id = note.id, slug = %new_slug, "Note edited");

    Ok(found(SUCCESS_URL))
}

/// GET /notes/delete/{slug}/
pub async fn delete_note_form(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    uri: OriginalUri,
    Path(slug): Path<String>,
) -> AppResult<Json<NotePage>> {
    let note =
        authorized_note(&state, &actor, &slug, Action::Delete, &requested_path(&uri)).await?;
    Ok(Json(NotePage { note }))
}

/// POST /notes/delete/{slug}/
pub async fn delete_note(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    uri: OriginalUri,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let note =
        authorized_note(&state, &actor, &slug, Action::Delete, &requested_path(&uri)).await?;

    if !state.store.delete_note(note.id).await? {
        return Err(AppError::Core(CoreError::not_found("Note", &slug)));
    }

    tracing::info!(user_id = ?actor.id(), note_id = note.id, "Note deleted");

    Ok(found(SUCCESS_URL))
}
