use std::collections::BTreeMap;

use super::statistics_model::GradeStatistics;
use crate::errors::Result;

/// Read-only aggregates. Every call recomputes from current storage.
pub trait StatisticsServiceTrait: Send + Sync {
    fn grade_statistics(&self) -> Result<GradeStatistics>;

    /// Health record count per student id, zero for students without records.
    fn health_record_counts(&self) -> Result<BTreeMap<String, usize>>;
}
