//! HTTP-level tests for signup, login, logout and identity extraction.

mod common;

use axum::body::Body;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, get, get_auth, location, post_empty, post_json};
use newsroom_db::Store;
use serde_json::json;
use tower::ServiceExt;

const PASSWORD: &str = "correct-horse-battery";

async fn signup(app: axum::Router, username: &str) -> axum::response::Response {
    post_json(
        app,
        "/signup",
        json!({ "username": username, "password": PASSWORD }),
    )
    .await
}

#[tokio::test]
async fn auth_pages_are_available_to_anonymous_users() {
    let test = build_test_app();
    for uri in ["/login", "/signup", "/logout"] {
        let response = get(test.app(), uri).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
        let json = body_json(response).await;
        assert!(json["form"].is_object(), "GET {uri} should describe a form");
    }
}

#[tokio::test]
async fn signup_then_login_returns_token_and_cookie() {
    let test = build_test_app();

    let response = signup(test.app(), "Лев Толстой").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "Лев Толстой");
    assert!(json["data"].get("password_hash").is_none());

    let response = post_json(
        test.app(),
        "/login",
        json!({ "username": "Лев Толстой", "password": PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
    assert!(cookie.starts_with("access_token="));
    assert!(cookie.contains("HttpOnly"));

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["token_type"], "Bearer");
    assert_eq!(json["expires_in"], 15 * 60);
    assert_eq!(json["user"]["username"], "Лев Толстой");
}

#[tokio::test]
async fn login_token_opens_protected_pages() {
    let test = build_test_app();
    signup(test.app(), "author").await;

    let response = post_json(
        test.app(),
        "/login",
        json!({ "username": "author", "password": PASSWORD }),
    )
    .await;
    let token = body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = get_auth(test.app(), "/notes/list/", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn access_token_cookie_is_accepted() {
    let test = build_test_app();
    let user = test.create_user("author").await;
    let token = test.token_for(&user);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/notes/list/")
        .header(COOKIE, format!("access_token={token}"))
        .body(Body::empty())
        .unwrap();
    let response = test.app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let test = build_test_app();
    assert_eq!(signup(test.app(), "author").await.status(), StatusCode::CREATED);

    let response = signup(test.app(), "author").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn surrounding_whitespace_is_stripped_from_usernames() {
    let test = build_test_app();

    let response = signup(test.app(), "  bob  ").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "bob");
    assert!(test.store.find_user_by_username("bob").await.unwrap().is_some());

    for username in ["bob", " bob", "bob\t"] {
        let response = post_json(
            test.app(),
            "/login",
            json!({ "username": username, "password": PASSWORD }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK, "login as {username:?}");
    }

    let response = signup(test.app(), " bob").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn invalid_signup_re_renders_the_form() {
    let test = build_test_app();

    let response = post_json(
        test.app(),
        "/signup",
        json!({ "username": "author", "password": "short" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["form"]["errors"]["password"].is_array());
    assert_eq!(json["form"]["values"]["username"], "author");

    let response = post_json(test.app(), "/signup", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["form"]["errors"]["username"][0], "Обязательное поле.");
    assert_eq!(json["form"]["errors"]["password"][0], "Обязательное поле.");

    assert!(test
        .store
        .find_user_by_username("author")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let test = build_test_app();
    signup(test.app(), "author").await;

    let response = post_json(
        test.app(),
        "/login",
        json!({ "username": "author", "password": "incorrect-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_user_is_unauthorized() {
    let test = build_test_app();

    let response = post_json(
        test.app(),
        "/login",
        json!({ "username": "ghost", "password": PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let test = build_test_app();

    let response = post_empty(test.app(), "/logout", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("access_token=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn invalid_token_is_treated_as_anonymous() {
    let test = build_test_app();

    let response = get_auth(test.app(), "/notes/list/", "garbage.token.value").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login?next=/notes/list/");
}
