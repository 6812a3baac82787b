//! Route definitions for notes.

use axum::routing::get;
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// ```text
/// GET       /notes/                  -> home
/// GET       /notes/list/             -> list_notes
/// GET, POST /notes/add/              -> add_note_form, add_note
/// GET       /notes/done/             -> done
/// GET       /notes/note/{slug}/      -> note_detail
/// GET, POST /notes/edit/{slug}/      -> edit_note_form, edit_note
/// GET, POST /notes/delete/{slug}/    -> delete_note_form, delete_note
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notes/", get(notes::home))
        .route("/notes/list/", get(notes::list_notes))
        .route("/notes/add/", get(notes::add_note_form).post(notes::add_note))
        .route("/notes/done/", get(notes::done))
        .route("/notes/note/{slug}/", get(notes::note_detail))
        .route(
            "/notes/edit/{slug}/",
            get(notes::edit_note_form).post(notes::edit_note),
        )
        .route(
            "/notes/delete/{slug}/",
            get(notes::delete_note_form).post(notes::delete_note),
        )
}
