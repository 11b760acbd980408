use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    auth::{self, require_jwt, AuthStatusResponse, LoginRequest, LoginResponse},
    config::Config,
    main_lib::AppState,
    models::{HealthRecord, HealthRecordInput, Student, StudentDeletion, StudentInput},
};
use school_health_storage_sqlite::get_connection;

pub mod health_records;
pub mod statistics;
pub mod students;

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Process is up")))]
async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[utoipa::path(
    get,
    path = "/api/v1/readyz",
    responses((status = 200, description = "Database reachable"), (status = 503, description = "Database unavailable"))
)]
async fn readyz(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    match get_connection(&state.pool) {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(e) => {
            tracing::warn!("Readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz,
        readyz,
        auth::auth_status,
        auth::login,
        students::list_students,
        students::create_student,
        students::get_student,
        students::update_student,
        students::delete_student,
        students::list_student_records,
        students::latest_student_record,
        health_records::list_health_records,
        health_records::create_health_record,
        health_records::get_health_record,
        health_records::update_health_record,
        health_records::delete_health_record,
        health_records::list_records_for_student,
        statistics::grade_statistics,
        statistics::health_record_counts,
    ),
    components(schemas(
        Student,
        StudentInput,
        StudentDeletion,
        HealthRecord,
        HealthRecordInput,
        LoginRequest,
        LoginResponse,
        AuthStatusResponse
    )),
    tags((name = "school-health"))
)]
pub struct ApiDoc;

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.cors_allow.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }
    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect::<Vec<_>>();
    layer.allow_origin(origins)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let openapi = ApiDoc::openapi();

    let public = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/auth/status", get(auth::auth_status))
        .route("/auth/login", post(auth::login));

    let protected = Router::new()
        .merge(students::router())
        .merge(health_records::router())
        .merge(statistics::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_jwt));

    let api = public.merge(protected);

    Router::new()
        .nest("/api/v1", api)
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(config.request_timeout))
                .layer(cors_layer(config)),
        )
}
