use serde::{Deserialize, Serialize};

/// Clinical BMI bands, ordered from lowest to highest.
///
/// Bands are half-open `[lower, upper)`; a boundary value belongs to the upper band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BmiCategory {
    /// Below 16
    SevereUnderweight,
    /// 16 up to 18.5
    Underweight,
    /// 18.5 up to 25
    Normal,
    /// 25 up to 30
    Overweight,
    /// 30 up to 35
    ObeseClassI,
    /// 35 up to 40
    #[serde(rename = "OBESE_CLASS_II")]
    ObeseClassII,
    /// 40 and above
    #[serde(rename = "OBESE_CLASS_III")]
    ObeseClassIII,
}

impl BmiCategory {
    pub const ALL: [BmiCategory; 7] = [
        BmiCategory::SevereUnderweight,
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::ObeseClassI,
        BmiCategory::ObeseClassII,
        BmiCategory::ObeseClassIII,
    ];

    /// Maps a BMI value to its band. Negative or non-finite values have no band.
    pub fn from_bmi(bmi: f64) -> Option<Self> {
        if !bmi.is_finite() || bmi < 0.0 {
            return None;
        }
        let category = if bmi < 16.0 {
            BmiCategory::SevereUnderweight
        } else if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else if bmi < 35.0 {
            BmiCategory::ObeseClassI
        } else if bmi < 40.0 {
            BmiCategory::ObeseClassII
        } else {
            BmiCategory::ObeseClassIII
        };
        Some(category)
    }

    /// Human readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::SevereUnderweight => "Severely Underweight",
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObeseClassI => "Obese (Class I)",
            BmiCategory::ObeseClassII => "Obese (Class II)",
            BmiCategory::ObeseClassIII => "Obese (Class III)",
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
