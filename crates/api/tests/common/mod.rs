#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, LOCATION};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use newsroom_api::auth::jwt::{generate_access_token, JwtConfig};
use newsroom_api::config::{ServerConfig, StoreKind};
use newsroom_api::router::build_app_router;
use newsroom_api::state::AppState;
use newsroom_core::policy::ContentPolicy;
use newsroom_db::models::comment::{Comment, CreateComment};
use newsroom_db::models::news::{CreateNews, News};
use newsroom_db::models::note::{CreateNote, Note};
use newsroom_db::models::user::{CreateUser, User};
use newsroom_db::{MemoryStore, Store};
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults and the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store: StoreKind::Memory,
        database_url: None,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
        login_url: "/login".to_string(),
        policy: ContentPolicy::default(),
    }
}

/// The full router plus a handle on its store for seeding and assertions.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub config: ServerConfig,
}

/// Build the application exactly as `main.rs` does, backed by a fresh
/// [`MemoryStore`].
pub fn build_test_app() -> TestApp {
    build_test_app_with(test_config())
}

pub fn build_test_app_with(config: ServerConfig) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), config.clone());
    let router = build_app_router(state, &config);
    TestApp {
        router,
        store,
        config,
    }
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Seed a user directly. The stored hash is not a valid PHC string, so
    /// these users can only authenticate with [`TestApp::token_for`].
    pub async fn create_user(&self, username: &str) -> User {
        self.store
            .create_user(&CreateUser {
                username: username.to_string(),
                password_hash: "not-a-real-hash".to_string(),
            })
            .await
            .expect("user creation should succeed")
    }

    pub fn token_for(&self, user: &User) -> String {
        generate_access_token(user.id, &user.username, &self.config.jwt)
            .expect("token generation should succeed")
    }

    pub async fn create_news(&self, title: &str, date: Option<DateTime<Utc>>) -> News {
        self.store
            .create_news(&CreateNews {
                title: title.to_string(),
                text: "Текст новости".to_string(),
                date,
            })
            .await
            .expect("news creation should succeed")
    }

    pub async fn create_comment(&self, author: &User, news: &News, text: &str) -> Comment {
        self.store
            .create_comment(
                author.id,
                &CreateComment {
                    news_id: news.id,
                    text: text.to_string(),
                },
            )
            .await
            .expect("comment creation should succeed")
    }

    pub async fn create_note(&self, author: &User, title: &str, slug: &str) -> Note {
        self.store
            .create_note(
                author.id,
                &CreateNote {
                    title: title.to_string(),
                    text: "Текст".to_string(),
                    slug: slug.to_string(),
                },
            )
            .await
            .expect("note creation should succeed")
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should succeed")
}

fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, builder(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        builder(Method::GET, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(
        app,
        builder(Method::POST, uri, None)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(
        app,
        builder(Method::POST, uri, Some(token))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// POST an already-encoded `application/x-www-form-urlencoded` body.
pub async fn post_form_auth(app: Router, uri: &str, body: &str, token: &str) -> Response {
    send(
        app,
        builder(Method::POST, uri, Some(token))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// POST an arbitrary body under an arbitrary content type.
pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: &str,
    body: &'static str,
    token: Option<&str>,
) -> Response {
    send(
        app,
        builder(Method::POST, uri, token)
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

/// POST without a body, as a delete confirmation form does.
pub async fn post_empty(app: Router, uri: &str, token: Option<&str>) -> Response {
    send(
        app,
        builder(Method::POST, uri, token)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("response should carry a Location header")
        .to_str()
        .expect("Location should be ASCII")
}
