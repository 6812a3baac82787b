//! Handlers for login, signup and logout.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use newsroom_core::error::CoreError;
use newsroom_core::validation::{validate_username, FIELD_USERNAME};
use newsroom_db::models::user::{CreateUser, UserResponse};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::extract::FormOrJson;
use crate::middleware::auth::{access_token_cookie, clear_access_token_cookie, CurrentUser};
use crate::response::{DataResponse, FormPage, FormView};
use crate::state::AppState;

const FIELD_PASSWORD: &str = "password";
const CREDENTIAL_FIELDS: &[&str] = &[FIELD_USERNAME, FIELD_PASSWORD];

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body for `POST /login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Body for `POST /signup`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Обязательное поле."))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Обязательное поле."))]
    pub password: String,
}

/// Successful login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub logged_out: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /login
pub async fn login_form() -> Json<FormPage> {
    Json(FormPage {
        form: FormView::new(CREDENTIAL_FIELDS),
    })
}

/// GET /signup
pub async fn signup_form() -> Json<FormPage> {
    Json(FormPage {
        form: FormView::new(CREDENTIAL_FIELDS),
    })
}

/// GET /logout
///
/// Confirmation page; the form has no fields.
pub async fn logout_form() -> Json<FormPage> {
    Json(FormPage {
        form: FormView::new(&[]),
    })
}

/// POST /signup
///
/// Create an account. Surrounding whitespace is stripped from the username
/// before any check. Field problems re-render the form; a taken username is
/// a 409.
pub async fn signup(
    State(state): State<AppState>,
    FormOrJson(mut input): FormOrJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    input.username = input.username.trim().to_string();
    let mut form = FormView::new(CREDENTIAL_FIELDS).with_value(FIELD_USERNAME, &input.username);

    if let Err(errors) = input.validate() {
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                form.add_error(field.to_string(), message);
            }
        }
    }
    if form.is_valid() {
        if let Err(CoreError::Validation { field, message }) =
            validate_username(state.policy(), &input.username)
        {
            form.add_error(field, message);
        }
        if let Err(message) = validate_password_strength(&input.password, MIN_PASSWORD_LENGTH) {
            form.add_error(FIELD_PASSWORD, message);
        }
    }
    if !form.is_valid() {
        return Err(AppError::InvalidForm(form));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = state
        .store
        .create_user(&CreateUser {
            username: input.username,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = user.id, "User signed up");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(user),
        }),
    ))
}

/// POST /login
///
/// Authenticate with username + password. Returns an access token in the body
/// and as an `HttpOnly` cookie.
pub async fn login(
    State(state): State<AppState>,
    FormOrJson(input): FormOrJson<LoginRequest>,
) -> AppResult<Response> {
    let username = input.username.trim();
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid username or password".into()));

    let user = state
        .store
        .find_user_by_username(username)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Rejected login with wrong password");
        return Err(invalid());
    }

    let jwt = &state.config.jwt;
    let access_token = generate_access_token(user.id, &user.username, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    let cookie = access_token_cookie(&access_token, jwt.expires_in_secs());
    let body = AuthResponse {
        access_token,
        token_type: "Bearer",
        expires_in: jwt.expires_in_secs(),
        user: UserResponse::from(user),
    };

    Ok(([(SET_COOKIE, cookie)], Json(body)).into_response())
}

/// POST /logout
///
/// Tokens are stateless; logging out clears the cookie.
pub async fn logout(CurrentUser(actor): CurrentUser) -> Response {
    if let Some(user_id) = actor.id() {
        tracing::info!(user_id, "User logged out");
    }
    (
        [(SET_COOKIE, clear_access_token_cookie())],
        Json(LogoutResponse { logged_out: true }),
    )
        .into_response()
}
