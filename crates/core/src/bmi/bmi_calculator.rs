//! Pure BMI computation.
//!
//! Arithmetic is done in `Decimal` so that rounding to one decimal place is an
//! exact half-up at the first decimal digit rather than a binary-float artefact.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::bmi_model::BmiCategory;

/// Computes BMI from a weight in kilograms and a height in centimetres.
///
/// Returns `None` when either input is missing, zero, negative or not a finite
/// number. The result is rounded to one decimal place, halves away from zero.
pub fn compute_bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let weight = positive_decimal(weight_kg?)?;
    let height_m = positive_decimal(height_cm?)?.checked_div(dec!(100))?;

    let height_squared = height_m.checked_mul(height_m)?;
    let bmi = weight.checked_div(height_squared)?;

    bmi.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
}

/// Classifies a computed BMI; `None` in gives `None` out.
pub fn classify_bmi(bmi: Option<f64>) -> Option<BmiCategory> {
    bmi.and_then(BmiCategory::from_bmi)
}

fn positive_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    Decimal::from_f64(value).filter(|d| d.is_sign_positive() && !d.is_zero())
}
