//! Health record domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::health_records_constants::{
    record_fields as fields, HEIGHT_CM_RANGE, TEMPERATURE_CELSIUS_RANGE, WEIGHT_KG_RANGE,
};
use crate::bmi::{classify_bmi, compute_bmi, BmiCategory};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::{
    clearable_text, normalize_text, parse_date, parse_datetime, require_text, NumericInput,
};

/// Kind of visit or event a health record documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    #[serde(rename = "Annual Physical")]
    AnnualPhysical,
    Vaccination,
    Illness,
    Injury,
    Dental,
    Vision,
    #[serde(rename = "Mental Health")]
    MentalHealth,
    Other,
}

impl RecordType {
    pub const ALL: [RecordType; 8] = [
        RecordType::AnnualPhysical,
        RecordType::Vaccination,
        RecordType::Illness,
        RecordType::Injury,
        RecordType::Dental,
        RecordType::Vision,
        RecordType::MentalHealth,
        RecordType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::AnnualPhysical => "Annual Physical",
            RecordType::Vaccination => "Vaccination",
            RecordType::Illness => "Illness",
            RecordType::Injury => "Injury",
            RecordType::Dental => "Dental",
            RecordType::Vision => "Vision",
            RecordType::MentalHealth => "Mental Health",
            RecordType::Other => "Other",
        }
    }
}

impl FromStr for RecordType {
    type Err = Error;

    /// Case-insensitive; `_` and `-` are read as spaces.
    fn from_str(raw: &str) -> Result<Self> {
        let normalized = raw
            .replace(['_', '-'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        RecordType::ALL
            .into_iter()
            .find(|record_type| record_type.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| {
                ValidationError::invalid(format!("Unknown record type '{}'", raw)).into()
            })
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain model representing a stored health record.
///
/// BMI is not stored; it is derived on read, see [`HealthRecordView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    pub id: String,
    pub student_id: String,
    pub record_date: NaiveDateTime,
    pub record_type: RecordType,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    /// Conventionally "systolic/diastolic".
    pub blood_pressure: Option<String>,
    pub temperature_celsius: Option<f64>,
    pub allergies: Option<String>,
    pub medications: Option<String>,
    pub medical_notes: Option<String>,
    pub treatment_plan: Option<String>,
    pub next_appointment: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl HealthRecord {
    pub fn bmi(&self) -> Option<f64> {
        compute_bmi(self.weight_kg, self.height_cm)
    }

    pub fn bmi_category(&self) -> Option<BmiCategory> {
        classify_bmi(self.bmi())
    }
}

/// A health record as returned to callers, with its derived BMI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecordView {
    #[serde(flatten)]
    pub record: HealthRecord,
    pub bmi: Option<f64>,
    pub bmi_category: Option<BmiCategory>,
}

impl From<HealthRecord> for HealthRecordView {
    fn from(record: HealthRecord) -> Self {
        let bmi = record.bmi();
        Self {
            bmi,
            bmi_category: classify_bmi(bmi),
            record,
        }
    }
}

/// Raw input for creating a health record.
///
/// A `bmi` key in the submitted JSON is ignored; BMI is never taken from input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHealthRecord {
    pub student_id: Option<String>,
    /// Defaults to the time of creation.
    pub record_date: Option<String>,
    pub record_type: Option<String>,
    #[serde(alias = "height")]
    pub height_cm: Option<NumericInput>,
    #[serde(alias = "weight")]
    pub weight_kg: Option<NumericInput>,
    pub blood_pressure: Option<String>,
    #[serde(alias = "temperature")]
    pub temperature_celsius: Option<NumericInput>,
    pub allergies: Option<String>,
    pub medications: Option<String>,
    pub medical_notes: Option<String>,
    pub treatment_plan: Option<String>,
    pub next_appointment: Option<String>,
}

impl NewHealthRecord {
    pub fn validate(&self, now: NaiveDateTime) -> Result<HealthRecordFields> {
        let student_id = require_text(fields::STUDENT_ID, self.student_id.as_deref())?;

        let record_date = match normalize_text(self.record_date.as_deref()) {
            Some(raw) => parse_datetime(fields::RECORD_DATE, &raw)?,
            None => now,
        };

        let record_type = normalize_text(self.record_type.as_deref())
            .ok_or_else(|| Error::from(ValidationError::missing(fields::RECORD_TYPE)))?
            .parse::<RecordType>()?;

        Ok(HealthRecordFields {
            student_id,
            record_date,
            record_type,
            height_cm: measurement(self.height_cm.as_ref(), fields::HEIGHT_CM, HEIGHT_CM_RANGE)?
                .flatten(),
            weight_kg: measurement(self.weight_kg.as_ref(), fields::WEIGHT_KG, WEIGHT_KG_RANGE)?
                .flatten(),
            blood_pressure: normalize_text(self.blood_pressure.as_deref()),
            temperature_celsius: measurement(
                self.temperature_celsius.as_ref(),
                fields::TEMPERATURE_CELSIUS,
                TEMPERATURE_CELSIUS_RANGE,
            )?
            .flatten(),
            allergies: normalize_text(self.allergies.as_deref()),
            medications: normalize_text(self.medications.as_deref()),
            medical_notes: normalize_text(self.medical_notes.as_deref()),
            treatment_plan: normalize_text(self.treatment_plan.as_deref()),
            next_appointment: appointment(self.next_appointment.as_deref())?.flatten(),
        })
    }
}

/// Validated health record attributes, without identity or timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthRecordFields {
    pub student_id: String,
    pub record_date: NaiveDateTime,
    pub record_type: RecordType,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub blood_pressure: Option<String>,
    pub temperature_celsius: Option<f64>,
    pub allergies: Option<String>,
    pub medications: Option<String>,
    pub medical_notes: Option<String>,
    pub treatment_plan: Option<String>,
    pub next_appointment: Option<NaiveDate>,
}

/// Raw partial update. Absent (or null) fields are left unchanged; an empty
/// string clears an optional field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecordUpdate {
    pub student_id: Option<String>,
    pub record_date: Option<String>,
    pub record_type: Option<String>,
    #[serde(alias = "height")]
    pub height_cm: Option<NumericInput>,
    #[serde(alias = "weight")]
    pub weight_kg: Option<NumericInput>,
    pub blood_pressure: Option<String>,
    #[serde(alias = "temperature")]
    pub temperature_celsius: Option<NumericInput>,
    pub allergies: Option<String>,
    pub medications: Option<String>,
    pub medical_notes: Option<String>,
    pub treatment_plan: Option<String>,
    pub next_appointment: Option<String>,
}

impl HealthRecordUpdate {
    pub fn validate(&self) -> Result<HealthRecordPatch> {
        Ok(HealthRecordPatch {
            student_id: self
                .student_id
                .as_deref()
                .map(|raw| require_text(fields::STUDENT_ID, Some(raw)))
                .transpose()?,
            record_date: self
                .record_date
                .as_deref()
                .map(|raw| parse_datetime(fields::RECORD_DATE, raw))
                .transpose()?,
            record_type: self
                .record_type
                .as_deref()
                .map(str::parse::<RecordType>)
                .transpose()?,
            height_cm: measurement(self.height_cm.as_ref(), fields::HEIGHT_CM, HEIGHT_CM_RANGE)?,
            weight_kg: measurement(self.weight_kg.as_ref(), fields::WEIGHT_KG, WEIGHT_KG_RANGE)?,
            blood_pressure: clearable_text(self.blood_pressure.as_deref()),
            temperature_celsius: measurement(
                self.temperature_celsius.as_ref(),
                fields::TEMPERATURE_CELSIUS,
                TEMPERATURE_CELSIUS_RANGE,
            )?,
            allergies: clearable_text(self.allergies.as_deref()),
            medications: clearable_text(self.medications.as_deref()),
            medical_notes: clearable_text(self.medical_notes.as_deref()),
            treatment_plan: clearable_text(self.treatment_plan.as_deref()),
            next_appointment: appointment(self.next_appointment.as_deref())?,
        })
    }
}

/// Validated partial update. For optional attributes the outer `Option` says
/// whether the field changes, the inner one holds the new value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HealthRecordPatch {
    pub student_id: Option<String>,
    pub record_date: Option<NaiveDateTime>,
    pub record_type: Option<RecordType>,
    pub height_cm: Option<Option<f64>>,
    pub weight_kg: Option<Option<f64>>,
    pub blood_pressure: Option<Option<String>>,
    pub temperature_celsius: Option<Option<f64>>,
    pub allergies: Option<Option<String>>,
    pub medications: Option<Option<String>>,
    pub medical_notes: Option<Option<String>>,
    pub treatment_plan: Option<Option<String>>,
    pub next_appointment: Option<Option<NaiveDate>>,
}

impl HealthRecordPatch {
    pub fn is_empty(&self) -> bool {
        *self == HealthRecordPatch::default()
    }

    /// Applies the changed fields onto an existing record.
    pub fn apply_to(self, record: &mut HealthRecord) {
        if let Some(student_id) = self.student_id {
            record.student_id = student_id;
        }
        if let Some(record_date) = self.record_date {
            record.record_date = record_date;
        }
        if let Some(record_type) = self.record_type {
            record.record_type = record_type;
        }
        if let Some(height_cm) = self.height_cm {
            record.height_cm = height_cm;
        }
        if let Some(weight_kg) = self.weight_kg {
            record.weight_kg = weight_kg;
        }
        if let Some(blood_pressure) = self.blood_pressure {
            record.blood_pressure = blood_pressure;
        }
        if let Some(temperature_celsius) = self.temperature_celsius {
            record.temperature_celsius = temperature_celsius;
        }
        if let Some(allergies) = self.allergies {
            record.allergies = allergies;
        }
        if let Some(medications) = self.medications {
            record.medications = medications;
        }
        if let Some(medical_notes) = self.medical_notes {
            record.medical_notes = medical_notes;
        }
        if let Some(treatment_plan) = self.treatment_plan {
            record.treatment_plan = treatment_plan;
        }
        if let Some(next_appointment) = self.next_appointment {
            record.next_appointment = next_appointment;
        }
    }
}

/// `None` when not submitted, `Some(None)` for an empty string.
fn measurement(
    input: Option<&NumericInput>,
    field: &str,
    (min, max): (f64, f64),
) -> Result<Option<Option<f64>>> {
    input
        .map(|value| value.resolve_in_range(field, min, max))
        .transpose()
}

fn appointment(raw: Option<&str>) -> Result<Option<Option<NaiveDate>>> {
    raw.map(|value| {
        normalize_text(Some(value))
            .map(|date| parse_date(fields::NEXT_APPOINTMENT, &date))
            .transpose()
    })
    .transpose()
}
