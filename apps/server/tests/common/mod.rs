#![allow(dead_code)]

use std::time::Duration;

use argon2::{password_hash::SaltString, Argon2, PasswordHasher};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use rand::rngs::OsRng;
use school_health_server::{api::app_router, auth::AuthConfig, build_state, config::Config};
use serde_json::Value;
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

pub const TEST_SECRET: &[u8; 32] = b"school-health-secret-key-32bytes";

pub struct TestApp {
    pub router: Router,
    pub config: Config,
    _db_dir: TempDir,
}

pub fn test_config(db_dir: &TempDir, auth: Option<AuthConfig>) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: db_dir.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        static_dir: db_dir.path().join("dist").to_string_lossy().to_string(),
        auth,
        seed_sample_data: false,
    }
}

pub fn auth_config(username: &str, password: &str) -> AuthConfig {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string();
    AuthConfig {
        username: username.to_string(),
        password_hash,
        jwt_secret: TEST_SECRET.to_vec(),
        access_token_ttl: Duration::from_secs(3600),
    }
}

pub async fn spawn_app(auth: Option<AuthConfig>) -> TestApp {
    let db_dir = tempdir().unwrap();
    spawn_with_config(db_dir, |dir| test_config(dir, auth)).await
}

pub async fn spawn_seeded_app() -> TestApp {
    let db_dir = tempdir().unwrap();
    spawn_with_config(db_dir, |dir| Config {
        seed_sample_data: true,
        ..test_config(dir, None)
    })
    .await
}

async fn spawn_with_config(db_dir: TempDir, make: impl FnOnce(&TempDir) -> Config) -> TestApp {
    let config = make(&db_dir);
    let state = build_state(&config).await.unwrap();
    let router = app_router(state, &config);
    TestApp {
        router,
        config,
        _db_dir: db_dir,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None, None).await
    }

    /// Creates a student and returns its id.
    pub async fn create_student(&self, first: &str, last: &str, grade: i32) -> String {
        let (status, body) = self
            .post(
                "/api/v1/students",
                serde_json::json!({
                    "firstName": first,
                    "lastName": last,
                    "dateOfBirth": "2014-03-02",
                    "gender": "female",
                    "grade": grade,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }
}
