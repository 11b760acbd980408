//! Statistics module - read-only aggregates over students and health records.

mod statistics_model;
mod statistics_service;
mod statistics_traits;

pub use statistics_model::{
    grade_label, ordinal, ordinal_suffix, GradeBucket, GradeStatistics, ALL_GRADES_LABEL,
    LABELED_GRADES,
};
pub use statistics_service::StatisticsService;
pub use statistics_traits::StatisticsServiceTrait;
