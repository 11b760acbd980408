mod common;

use axum::http::{Method, StatusCode};
use common::{auth_config, spawn_app};
use serde_json::json;

#[tokio::test]
async fn login_and_access_protected_route() {
    let app = spawn_app(Some(auth_config("nurse", "super-secret"))).await;

    let (status, _) = app.get("/api/v1/students").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.get("/api/v1/auth/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["requiresPassword"], true);

    let (status, body) = app
        .post(
            "/api/v1/auth/login",
            json!({ "username": "nurse", "password": "super-secret" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["tokenType"], "Bearer");
    assert_eq!(body["expiresIn"], 3600);
    let token = body["accessToken"].as_str().unwrap().to_string();

    let (status, body) = app
        .request(Method::GET, "/api/v1/students", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _) = app
        .request(Method::GET, "/api/v1/statistics/grades", None, Some("not-a-jwt"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_wrong_credentials() {
    let app = spawn_app(Some(auth_config("nurse", "super-secret"))).await;

    for (username, password) in [("nurse", "wrong"), ("doctor", "super-secret")] {
        let (status, body) = app
            .post(
                "/api/v1/auth/login",
                json!({ "username": username, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid username or password");
    }
}

#[tokio::test]
async fn probes_stay_public_when_auth_is_enabled() {
    let app = spawn_app(Some(auth_config("nurse", "super-secret"))).await;

    let (status, body) = app.get("/api/v1/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = app.get("/api/v1/readyz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn everything_is_open_without_auth_config() {
    let app = spawn_app(None).await;

    let (status, body) = app.get("/api/v1/auth/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["requiresPassword"], false);

    let (status, _) = app.get("/api/v1/students").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post(
            "/api/v1/auth/login",
            json!({ "username": "admin", "password": "anything" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn token_for_another_user_is_rejected() {
    // Both servers share TEST_SECRET, so only the subject differs.
    let nurse_app = spawn_app(Some(auth_config("nurse", "super-secret"))).await;
    let head_app = spawn_app(Some(auth_config("head", "super-secret"))).await;

    let (_, body) = nurse_app
        .post(
            "/api/v1/auth/login",
            json!({ "username": "nurse", "password": "super-secret" }),
        )
        .await;
    let token = body["accessToken"].as_str().unwrap().to_string();

    let (status, _) = head_app
        .request(Method::GET, "/api/v1/students", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = head_app.get("/api/v1/students/unknown").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);
    assert_eq!(body["message"], "Unauthorized");
}
