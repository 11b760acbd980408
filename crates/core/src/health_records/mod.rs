//! Health records module - domain models, services, and traits.

mod health_records_constants;
mod health_records_model;
mod health_records_service;
mod health_records_traits;

#[cfg(test)]
mod health_records_model_tests;

pub use health_records_constants::*;
pub use health_records_model::{
    HealthRecord, HealthRecordFields, HealthRecordPatch, HealthRecordUpdate, HealthRecordView,
    NewHealthRecord, RecordType,
};
pub use health_records_service::HealthRecordService;
pub use health_records_traits::{HealthRecordRepositoryTrait, HealthRecordServiceTrait};
