//! Registration and login over HTTP.

#![allow(clippy::unwrap_used)]

use corner_shop_core::Email;
use corner_shop_integration_tests::{ALLOWED_ORIGIN, TestContext};
use reqwest::{Response, StatusCode, header};
use serde_json::{Value, json};

async fn register(ctx: &TestContext, body: Value) -> Response {
    ctx.client
        .post(ctx.url("/register"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn login(ctx: &TestContext, body: Value) -> Response {
    ctx.client
        .post(ctx.url("/login"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn message(response: Response) -> String {
    let body: Value = response.json().await.unwrap();
    body["message"].as_str().unwrap().to_owned()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

fn alice() -> Value {
    json!({"username": "alice", "email": "a@x.com", "password": "pw1"})
}

#[tokio::test]
async fn test_register_redirects_to_login_page() {
    let ctx = TestContext::new().await;

    let response = register(&ctx, alice()).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), format!("{ALLOWED_ORIGIN}/login.html"));
    assert_eq!(ctx.account_count().await, 1);
}

#[tokio::test]
async fn test_password_is_stored_as_digest() {
    let ctx = TestContext::new().await;
    register(&ctx, alice()).await;

    let account = ctx
        .state
        .accounts()
        .find_by_email(&Email::parse("a@x.com").unwrap())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(account.username, "alice");
    assert_ne!(account.password_hash.as_str(), "pw1");
    assert!(account.password_hash.as_str().starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let ctx = TestContext::new().await;
    register(&ctx, alice()).await;

    let response = register(
        &ctx,
        json!({"username": "bob", "email": "a@x.com", "password": "pw2"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message(response).await, "Error saving user data.");
    assert_eq!(ctx.account_count().await, 1);
}

#[tokio::test]
async fn test_register_requires_all_fields() {
    let ctx = TestContext::new().await;

    for body in [
        json!({"email": "a@x.com", "password": "pw1"}),
        json!({"username": "alice", "email": "", "password": "pw1"}),
        json!({"username": "alice", "email": "a@x.com"}),
        json!({}),
    ] {
        let response = register(&ctx, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(message(response).await, "All fields are required.");
    }
    assert_eq!(ctx.account_count().await, 0);
}

#[tokio::test]
async fn test_register_rejects_malformed_email() {
    let ctx = TestContext::new().await;

    let response = register(
        &ctx,
        json!({"username": "alice", "email": "alice", "password": "pw1"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(response).await, "Invalid email address.");
    assert_eq!(ctx.account_count().await, 0);
}

#[tokio::test]
async fn test_login_redirects_to_home_page() {
    let ctx = TestContext::new().await;
    register(&ctx, alice()).await;

    let response = login(&ctx, json!({"email": "a@x.com", "password": "pw1"})).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), format!("{ALLOWED_ORIGIN}/index.html"));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let ctx = TestContext::new().await;
    register(&ctx, alice()).await;

    let wrong_password = login(&ctx, json!({"email": "a@x.com", "password": "nope"})).await;
    let unknown_email = login(&ctx, json!({"email": "b@x.com", "password": "pw1"})).await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(message(wrong_password).await, "Invalid email or password");
    assert_eq!(message(unknown_email).await, "Invalid email or password");
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let ctx = TestContext::new().await;

    for body in [
        json!({"email": "a@x.com"}),
        json!({"password": "pw1"}),
        json!({"email": "", "password": ""}),
    ] {
        let response = login(&ctx, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(message(response).await, "Email and password are required.");
    }
}

#[tokio::test]
async fn test_form_encoded_bodies() {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .post(ctx.url("/register"))
        .form(&[("username", "alice"), ("email", "a@x.com"), ("password", "pw1")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);

    let response = ctx
        .client
        .post(ctx.url("/login"))
        .form(&[("email", "a@x.com"), ("password", "pw1")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .post(ctx.url("/register"))
        .header(header::CONTENT_TYPE, "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(response).await, "Invalid request body.");
    assert_eq!(ctx.account_count().await, 0);
}
