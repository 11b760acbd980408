use log::debug;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::statistics_model::GradeStatistics;
use super::statistics_traits::StatisticsServiceTrait;
use crate::errors::Result;
use crate::health_records::HealthRecordRepositoryTrait;
use crate::students::StudentRepositoryTrait;

/// Aggregates over the student and health record stores.
pub struct StatisticsService {
    student_repository: Arc<dyn StudentRepositoryTrait>,
    health_record_repository: Arc<dyn HealthRecordRepositoryTrait>,
}

impl StatisticsService {
    pub fn new(
        student_repository: Arc<dyn StudentRepositoryTrait>,
        health_record_repository: Arc<dyn HealthRecordRepositoryTrait>,
    ) -> Self {
        Self {
            student_repository,
            health_record_repository,
        }
    }
}

impl StatisticsServiceTrait for StatisticsService {
    fn grade_statistics(&self) -> Result<GradeStatistics> {
        let grades = self.student_repository.list_grades()?;
        let stats = GradeStatistics::from_grades(grades);
        debug!(
            "Grade statistics: {} students bucketed, {} excluded",
            stats.all_grades, stats.excluded
        );
        Ok(stats)
    }

    fn health_record_counts(&self) -> Result<BTreeMap<String, usize>> {
        self.health_record_repository.count_by_student()
    }
}
