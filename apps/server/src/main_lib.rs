use std::sync::Arc;

use crate::{auth::AuthManager, config::Config, seed::seed_sample_data};
use school_health_core::{
    health_records::{HealthRecordService, HealthRecordServiceTrait},
    statistics::{StatisticsService, StatisticsServiceTrait},
    students::{StudentService, StudentServiceTrait},
};
use school_health_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, DbPool, HealthRecordRepository,
    StudentRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub student_service: Arc<dyn StudentServiceTrait>,
    pub health_record_service: Arc<dyn HealthRecordServiceTrait>,
    pub statistics_service: Arc<dyn StatisticsServiceTrait>,
    /// Used by the readiness probe only; services own their repositories.
    pub pool: Arc<DbPool>,
    pub db_path: String,
    pub auth: Option<Arc<AuthManager>>,
}

pub fn init_tracing() {
    let log_format = std::env::var("SH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let student_repository = Arc::new(StudentRepository::new(pool.clone(), writer.clone()));
    let health_record_repository =
        Arc::new(HealthRecordRepository::new(pool.clone(), writer.clone()));

    let student_service: Arc<dyn StudentServiceTrait> =
        Arc::new(StudentService::new(student_repository.clone()));
    let health_record_service: Arc<dyn HealthRecordServiceTrait> = Arc::new(
        HealthRecordService::new(health_record_repository.clone()),
    );
    let statistics_service: Arc<dyn StatisticsServiceTrait> = Arc::new(StatisticsService::new(
        student_repository,
        health_record_repository,
    ));

    let auth = match config.auth.as_ref() {
        Some(auth_config) => {
            tracing::info!("Authentication enabled for user '{}'", auth_config.username);
            Some(Arc::new(AuthManager::new(auth_config)?))
        }
        None => {
            tracing::warn!("SH_AUTH_PASSWORD_HASH not set; the API is unauthenticated");
            None
        }
    };

    let state = Arc::new(AppState {
        student_service,
        health_record_service,
        statistics_service,
        pool,
        db_path,
        auth,
    });

    if config.seed_sample_data {
        seed_sample_data(&state).await?;
    }

    Ok(state)
}
