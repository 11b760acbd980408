use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use school_health_core::statistics::GradeStatistics;

use crate::{error::ApiResult, main_lib::AppState};

#[utoipa::path(
    get,
    path = "/api/v1/statistics/grades",
    responses((status = 200, description = "Student counts per grade label, plus \"All Grades\" and the excluded count"))
)]
pub async fn grade_statistics(State(state): State<Arc<AppState>>) -> ApiResult<Json<GradeStatistics>> {
    let stats = state.statistics_service.grade_statistics()?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/v1/statistics/health-record-counts",
    responses((status = 200, description = "Number of health records per student id"))
)]
pub async fn health_record_counts(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BTreeMap<String, usize>>> {
    let counts = state.statistics_service.health_record_counts()?;
    Ok(Json(counts))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/statistics/grades", get(grade_statistics))
        .route(
            "/statistics/health-record-counts",
            get(health_record_counts),
        )
}
