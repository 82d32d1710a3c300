mod support;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;

use support::{app_with, empty_request, json_request, send};

#[tokio::test]
async fn register_login_and_use_the_token() {
    let app = app_with(true);

    let (status, _) = send(&app, empty_request("GET", "/health")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, empty_request("GET", "/getAllCustomers")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "UNAUTHORIZED");

    let register = json!({"email": "asha@example.com", "name": "Asha", "password": "S3curePass!"});
    let (status, body) = send(&app, json_request("POST", "/register", &register)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "asha@example.com");
    assert!(body["data"].get("password").is_none());

    let wrong = json!({"email": "asha@example.com", "password": "not-the-one"});
    let (status, body) = send(&app, json_request("POST", "/login", &wrong)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password.");

    let resp = tower::ServiceExt::oneshot(
        app.clone(),
        json_request("POST", "/login", &json!({"email": "asha@example.com", "password": "S3curePass!"})),
    )
    .await
    .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap().to_string();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let authed = |uri: &str| {
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    };
    let (status, _) = send(&app, authed("/getAllCustomers")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, authed("/getAllLogins")).await;
    assert_eq!(status, StatusCode::OK);
    let logins = body["data"].as_array().unwrap();
    assert_eq!(logins.len(), 2);
    assert_eq!(logins[0]["success"], true);
    assert_eq!(logins[1]["success"], false);
}

#[tokio::test]
async fn forged_token_is_rejected() {
    let app = app_with(true);
    let req = Request::builder()
        .uri("/getAllShops")
        .header(header::AUTHORIZATION, "Bearer not.a.jwt")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid or expired token.");
}

#[tokio::test]
async fn duplicate_registration_is_a_field_error() {
    let app = app_with(false);
    let register = json!({"email": "dup@example.com", "name": "Dup", "password": "S3curePass!"});
    send(&app, json_request("POST", "/register", &register)).await;
    let (status, body) = send(&app, json_request("POST", "/register", &register)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["param"], "email");
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let req = Request::builder()
        .method("POST")
        .uri("/logout")
        .header(header::COOKIE, "auth_token=stale")
        .body(Body::empty())
        .unwrap();
    let resp = tower::ServiceExt::oneshot(app_with(true), req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("Max-Age=0"));
}
