//! Route definitions for login, signup and logout.

use axum::routing::get;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// GET  /login    -> login_form
/// POST /login    -> login
/// GET  /signup   -> signup_form
/// POST /signup   -> signup
/// GET  /logout   -> logout_form
/// POST /logout   -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/signup", get(auth::signup_form).post(auth::signup))
        .route("/logout", get(auth::logout_form).post(auth::logout))
}
