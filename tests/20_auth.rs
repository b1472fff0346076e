// Login, logout and caller resolution.
mod common;

use axum::http::StatusCode;
use serde_json::json;

use storefront_api::testing::{self, MemoryStore};

#[tokio::test]
async fn login_issues_token_and_cookie() {
    let store = MemoryStore::new();
    let admin = testing::admin_account("admin@shop.test", "hunter2");
    store.insert_account(admin.clone());
    let app = common::test_app(store);

    let (status, headers, envelope) = common::request(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "admin@shop.test", "password": "hunter2"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope["success"], json!(true));
    assert!(envelope["data"]["token"].as_str().unwrap().len() > 20);
    assert_eq!(envelope["data"]["account"]["email"], json!("admin@shop.test"));
    // Credential material never crosses the boundary
    assert!(envelope["data"]["account"].get("password_hash").is_none());

    let cookie = headers.get("set-cookie").unwrap().to_str().unwrap();
    assert!(cookie.starts_with("auth-token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(!cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn login_requires_email_and_password() {
    let app = common::test_app(MemoryStore::new());

    for body in [json!({}), json!({"email": "a@b.test"}), json!({"password": "x"})] {
        let (status, _, envelope) =
            common::request(&app, "POST", "/auth/login", None, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(envelope["error"], json!("VALIDATION_ERROR"));
    }

    // Missing body entirely is also the caller's 400
    let (status, _, _) = common::request(&app, "POST", "/auth/login", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn password_whitespace_is_significant() {
    let store = MemoryStore::new();
    store.insert_account(testing::customer_account("c@shop.test", " padded "));
    let app = common::test_app(store);

    // The exact password, surrounding whitespace included, logs in
    let (status, _, _) = common::request(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "c@shop.test", "password": " padded "})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // A trimmed rendition is a different password
    let (status, _, _) = common::request(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "c@shop.test", "password": "padded"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_password_is_401_and_counts_against_the_account() {
    let store = MemoryStore::new();
    let customer = testing::customer_account("c@shop.test", "right");
    let id = customer.id;
    store.insert_account(customer);
    let app = common::test_app(store);

    let (status, _, envelope) = common::request(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "c@shop.test", "password": "wrong"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(envelope["error"], json!("UNAUTHORIZED"));
    assert_eq!(app.store.account(id).unwrap().failed_attempts, 1);
}

#[tokio::test]
async fn repeated_failures_restrict_the_account() {
    let store = MemoryStore::new();
    let customer = testing::customer_account("c@shop.test", "right");
    let id = customer.id;
    store.insert_account(customer);
    let app = common::test_app(store);

    for _ in 0..5 {
        common::request(
            &app,
            "POST",
            "/auth/login",
            None,
            Some(json!({"email": "c@shop.test", "password": "wrong"})),
        )
        .await;
    }
    assert!(app.store.account(id).unwrap().restricted);

    // Even the correct password is now refused
    let (status, _, envelope) = common::request(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "c@shop.test", "password": "right"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(envelope["error"], json!("FORBIDDEN"));
}

#[tokio::test]
async fn successful_login_resets_the_counter() {
    let store = MemoryStore::new();
    let mut customer = testing::customer_account("c@shop.test", "right");
    customer.failed_attempts = 3;
    let id = customer.id;
    store.insert_account(customer);
    let app = common::test_app(store);

    let (status, _, _) = common::request(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "c@shop.test", "password": "right"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.store.account(id).unwrap().failed_attempts, 0);
}

#[tokio::test]
async fn whoami_reflects_token_claims() {
    let store = MemoryStore::new();
    let admin = testing::admin_account("admin@shop.test", "pw");
    let token = testing::token_for(&admin);
    store.insert_account(admin);
    let app = common::test_app(store);

    let (status, _, envelope) =
        common::request(&app, "GET", "/api/auth/whoami", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope["data"]["email"], json!("admin@shop.test"));
    assert_eq!(envelope["data"]["role"], json!("ADMIN"));
}

#[tokio::test]
async fn whoami_accepts_the_session_cookie() {
    let store = MemoryStore::new();
    let customer = testing::customer_account("c@shop.test", "pw");
    let token = testing::token_for(&customer);
    store.insert_account(customer);
    let app = common::test_app(store);

    let cookie = format!("theme=dark; auth-token={}", token);
    let (status, _, envelope) =
        common::request_with_cookie(&app, "GET", "/api/auth/whoami", &cookie).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope["data"]["role"], json!("CUSTOMER"));
}

#[tokio::test]
async fn whoami_without_session_is_401() {
    let app = common::test_app(MemoryStore::new());

    let (status, _, envelope) =
        common::request(&app, "GET", "/api/auth/whoami", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(envelope["error"], json!("UNAUTHORIZED"));
}

#[tokio::test]
async fn garbage_token_is_401() {
    let app = common::test_app(MemoryStore::new());

    let (status, _, _) =
        common::request(&app, "GET", "/api/auth/whoami", Some("not-a-jwt"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_clears_the_cookie_with_or_without_a_session() {
    let app = common::test_app(MemoryStore::new());

    // No prior session: still 200, still clears
    let (status, headers, envelope) =
        common::request(&app, "POST", "/auth/logout", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope["success"], json!(true));
    assert_eq!(envelope["data"], json!(null));

    let cookie = headers.get("set-cookie").unwrap().to_str().unwrap();
    assert!(cookie.starts_with("auth-token=;"));
    assert!(cookie.contains("Max-Age=0"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("HttpOnly"));
}
