use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::{
    error::{ApiJson, ApiResult},
    main_lib::AppState,
    models::{HealthRecord, HealthRecordInput},
};

#[utoipa::path(
    get,
    path = "/api/v1/health-records",
    responses((status = 200, body = [HealthRecord]))
)]
pub async fn list_health_records(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<HealthRecord>>> {
    let records = state.health_record_service.list_health_records()?;
    Ok(Json(records.into_iter().map(HealthRecord::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/health-records",
    request_body = HealthRecordInput,
    responses(
        (status = 201, body = HealthRecord),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Unknown student")
    )
)]
pub async fn create_health_record(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<HealthRecordInput>,
) -> ApiResult<(StatusCode, Json<HealthRecord>)> {
    let created = state
        .health_record_service
        .create_health_record(input.into())
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/health-records/{id}",
    params(("id" = String, Path, description = "Health record id")),
    responses((status = 200, body = HealthRecord), (status = 404, description = "Unknown record"))
)]
pub async fn get_health_record(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<HealthRecord>> {
    let record = state.health_record_service.get_health_record(&id)?;
    Ok(Json(record.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/health-records/{id}",
    params(("id" = String, Path, description = "Health record id")),
    request_body = HealthRecordInput,
    responses(
        (status = 200, body = HealthRecord),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Unknown record or student")
    )
)]
pub async fn update_health_record(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<HealthRecordInput>,
) -> ApiResult<Json<HealthRecord>> {
    let updated = state
        .health_record_service
        .update_health_record(&id, input.into())
        .await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/health-records/{id}",
    params(("id" = String, Path, description = "Health record id")),
    responses((status = 204, description = "Record deleted"), (status = 404, description = "Unknown record"))
)]
pub async fn delete_health_record(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.health_record_service.delete_health_record(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Same listing as `/students/{id}/health-records`, kept for existing clients.
#[utoipa::path(
    get,
    path = "/api/v1/health-records/student/{studentId}",
    params(("studentId" = String, Path, description = "Student id")),
    responses((status = 200, body = [HealthRecord]), (status = 404, description = "Unknown student"))
)]
pub async fn list_records_for_student(
    Path(student_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<HealthRecord>>> {
    let records = state
        .health_record_service
        .list_student_health_records(&student_id)?;
    Ok(Json(records.into_iter().map(HealthRecord::from).collect()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/health-records",
            get(list_health_records).post(create_health_record),
        )
        .route(
            "/health-records/{id}",
            get(get_health_record)
                .put(update_health_record)
                .delete(delete_health_record),
        )
        .route(
            "/health-records/student/{studentId}",
            get(list_records_for_student),
        )
}
