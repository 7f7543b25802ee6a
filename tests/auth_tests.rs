
use portfolio_cms::{auth::jwt::JwtService, repositories::token::TokenService};
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn login_with_correct_credentials_returns_admin_token() {
    let app = TestApp::spawn().await;

    let response = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);

    let claims = JwtService::new(&app.config)
        .decode_token(body["token"].as_str().unwrap())
        .unwrap()
        .claims;
    assert!(claims.is_admin());
    assert_eq!(claims.sub, ADMIN_EMAIL);
}

#[actix_rt::test]
async fn login_email_is_case_insensitive() {
    let app = TestApp::spawn().await;

    let response = app.login("  ADMIN@example.com", ADMIN_PASSWORD).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn login_with_wrong_password_is_401() {
    let app = TestApp::spawn().await;

    let response = app.login(ADMIN_EMAIL, "not-the-password").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid credentials");
}

#[actix_rt::test]
async fn login_with_unknown_email_is_401() {
    let app = TestApp::spawn().await;

    let response = app.login("intruder@example.com", ADMIN_PASSWORD).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn mutating_endpoints_require_a_token() {
    let app = TestApp::spawn().await;
    let body = json!({ "title": "T", "content": "C" });

    let responses = vec![
        app.post_json("/api/projects", &body, None).await,
        app.put_json("/api/projects/1", &body, None).await,
        app.delete("/api/projects/1", None).await,
        app.post_json("/api/blog", &body, None).await,
        app.put_json("/api/blog/1", &body, None).await,
        app.delete("/api/blog/1", None).await,
        app.delete("/api/inquiries/1", None).await,
        app.get("/api/inquiries").await,
        app.get("/api/stats").await,
    ];

    for response in responses {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", response.url());
    }
    assert_eq!(app.projects.count().await, 0);
}

#[actix_rt::test]
async fn token_signed_with_another_secret_is_rejected() {
    let app = TestApp::spawn().await;
    let mut other = test_config();
    other.jwt_secret = "a_completely_different_secret_that_is_long_enough_42".into();
    let forged = JwtService::new(&other).create_admin_token(ADMIN_EMAIL).unwrap();

    let response = app
        .post_json("/api/projects", &json!({ "title": "Forged" }), Some(&forged))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "unauthorized");
}

#[actix_rt::test]
async fn expired_token_is_rejected() {
    let app = TestApp::spawn().await;
    let mut expired_config = app.config.clone();
    expired_config.jwt_expiration_minutes = -5;
    let expired = JwtService::new(&expired_config).create_admin_token(ADMIN_EMAIL).unwrap();

    let response = app.admin_get("/api/stats", &expired).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Token has expired");
}

#[actix_rt::test]
async fn malformed_authorization_header_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/api/inquiries"))
        .header("Authorization", "Token abc")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn issued_token_authorizes_admin_routes() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app
        .post_json("/api/projects", &json!({ "title": "Authorized" }), Some(&token))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(app.admin_get("/api/inquiries", &token).await.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn public_reads_need_no_token() {
    let app = TestApp::spawn().await;

    for path in ["/api/projects", "/api/blog", "/api/health", "/"] {
        assert_eq!(app.get(path).await.status(), StatusCode::OK, "{path}");
    }
}
