//! BMI module - the single place where body mass index is derived.

mod bmi_calculator;
mod bmi_model;

pub use bmi_calculator::{classify_bmi, compute_bmi};
pub use bmi_model::BmiCategory;
