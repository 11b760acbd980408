use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use school_health_core::errors::{Error as CoreError, ValidationError};
use school_health_core::students::{StudentQuery, StudentSortField};
use school_health_core::utils::NumericInput;

use crate::{
    error::{ApiJson, ApiResult},
    main_lib::AppState,
    models::{HealthRecord, Student, StudentDeletion, StudentInput, StudentListParams},
};

impl StudentListParams {
    fn into_query(self) -> ApiResult<StudentQuery> {
        let grade = match self.grade.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => NumericInput::Text(raw.to_string()).resolve_integer("grade")?,
        };
        let sort = match self.sort.as_deref().map(str::trim) {
            None | Some("") => StudentSortField::default(),
            Some(raw) => raw.parse::<StudentSortField>()?,
        };
        let descending = match self.desc.as_deref().map(str::trim) {
            None | Some("") => false,
            Some(raw) if raw.eq_ignore_ascii_case("true") || raw == "1" => true,
            Some(raw) if raw.eq_ignore_ascii_case("false") || raw == "0" => false,
            Some(raw) => {
                return Err(CoreError::from(ValidationError::invalid(format!(
                    "Invalid value '{}' for desc, expected true or false",
                    raw
                )))
                .into())
            }
        };
        Ok(StudentQuery {
            search: self.search,
            grade,
            sort,
            descending,
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/students",
    params(StudentListParams),
    responses((status = 200, body = [Student]), (status = 400, description = "Invalid filter"))
)]
pub async fn list_students(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StudentListParams>,
) -> ApiResult<Json<Vec<Student>>> {
    let query = params.into_query()?;
    let students = state.student_service.list_students(&query)?;
    Ok(Json(students.into_iter().map(Student::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/students",
    request_body = StudentInput,
    responses((status = 201, body = Student), (status = 400, description = "Validation failed"))
)]
pub async fn create_student(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<StudentInput>,
) -> ApiResult<(StatusCode, Json<Student>)> {
    let created = state.student_service.create_student(input.into()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/{id}",
    params(("id" = String, Path, description = "Student id")),
    responses((status = 200, body = Student), (status = 404, description = "Unknown student"))
)]
pub async fn get_student(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Student>> {
    let student = state.student_service.get_student(&id)?;
    Ok(Json(student.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/students/{id}",
    params(("id" = String, Path, description = "Student id")),
    request_body = StudentInput,
    responses(
        (status = 200, body = Student),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Unknown student")
    )
)]
pub async fn update_student(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<StudentInput>,
) -> ApiResult<Json<Student>> {
    let updated = state
        .student_service
        .update_student(&id, input.into())
        .await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/students/{id}",
    params(("id" = String, Path, description = "Student id")),
    responses((status = 200, body = StudentDeletion), (status = 404, description = "Unknown student"))
)]
pub async fn delete_student(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<StudentDeletion>> {
    let deletion = state.student_service.delete_student(&id).await?;
    Ok(Json(deletion.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/{id}/health-records",
    params(("id" = String, Path, description = "Student id")),
    responses((status = 200, body = [HealthRecord]), (status = 404, description = "Unknown student"))
)]
pub async fn list_student_records(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<HealthRecord>>> {
    let records = state
        .health_record_service
        .list_student_health_records(&id)?;
    Ok(Json(records.into_iter().map(HealthRecord::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/{id}/health-records/latest",
    params(("id" = String, Path, description = "Student id")),
    responses(
        (status = 200, body = HealthRecord, description = "Most recent record, null when there is none"),
        (status = 404, description = "Unknown student")
    )
)]
pub async fn latest_student_record(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Option<HealthRecord>>> {
    let latest = state.health_record_service.get_latest_health_record(&id)?;
    Ok(Json(latest.map(HealthRecord::from)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/students/{id}/health-records", get(list_student_records))
        .route(
            "/students/{id}/health-records/latest",
            get(latest_student_record),
        )
}
