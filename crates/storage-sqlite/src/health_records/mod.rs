//! SQLite storage implementation for health records.

mod model;
mod repository;

pub use model::HealthRecordDB;
pub use repository::HealthRecordRepository;
