//! School Health Core - Domain entities, services, and traits.
//!
//! This crate contains the business rules for tracking students and their
//! health records: validation, the BMI calculator and the aggregation views.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod bmi;
pub mod errors;
pub mod health_records;
pub mod statistics;
pub mod students;
pub mod utils;

// Re-export the BMI calculator, it is used by every read path
pub use bmi::{classify_bmi, compute_bmi, BmiCategory};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
