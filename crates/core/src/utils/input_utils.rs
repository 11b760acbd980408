//! Helpers for coercing loosely-typed form input into domain values.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// A numeric form field that may arrive as a JSON number or as a string.
///
/// Browser forms submit `"12"` as often as `12`; both resolve to the same value.
/// An empty string resolves to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Resolves the input to a finite number, `None` for an empty string.
    pub fn resolve(&self, field: &str) -> Result<Option<f64>> {
        let value = match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed.parse::<f64>().map_err(|_| {
                    ValidationError::invalid(format!(
                        "Field '{}' must be numeric, got '{}'",
                        field, raw
                    ))
                })?
            }
        };

        if !value.is_finite() {
            return Err(ValidationError::invalid(format!(
                "Field '{}' must be a finite number",
                field
            ))
            .into());
        }
        Ok(Some(value))
    }

    /// Resolves and checks the inclusive range `[min, max]`.
    pub fn resolve_in_range(&self, field: &str, min: f64, max: f64) -> Result<Option<f64>> {
        match self.resolve(field)? {
            Some(value) if value < min || value > max => Err(ValidationError::OutOfRange {
                field: field.to_string(),
                value,
                min,
                max,
            }
            .into()),
            other => Ok(other),
        }
    }

    /// Resolves to an integer; fractional values are rejected.
    pub fn resolve_integer(&self, field: &str) -> Result<Option<i32>> {
        match self.resolve(field)? {
            None => Ok(None),
            Some(value) if value.fract() != 0.0 => Err(ValidationError::invalid(format!(
                "Field '{}' must be a whole number, got {}",
                field, value
            ))
            .into()),
            Some(value) if value < i32::MIN as f64 || value > i32::MAX as f64 => {
                Err(ValidationError::invalid(format!("Field '{}' is too large", field)).into())
            }
            Some(value) => Ok(Some(value as i32)),
        }
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

/// Trims free text; blank input becomes `None`.
pub fn normalize_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// For partial updates: `None` leaves a field alone, `Some(None)` clears it.
pub fn clearable_text(value: Option<&str>) -> Option<Option<String>> {
    value.map(|raw| normalize_text(Some(raw)))
}

/// Returns the trimmed value or a `MissingField` error.
pub fn require_text(field: &str, value: Option<&str>) -> Result<String> {
    normalize_text(value).ok_or_else(|| ValidationError::missing(field).into())
}
