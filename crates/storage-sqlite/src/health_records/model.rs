//! Database models for health records.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use school_health_core::errors::Error;
use school_health_core::health_records::{HealthRecord, HealthRecordFields};

/// Database model for health records. BMI is never stored.
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::health_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct HealthRecordDB {
    pub id: String,
    pub student_id: String,
    pub record_date: NaiveDateTime,
    pub record_type: String,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
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

impl HealthRecordDB {
    pub fn from_fields(id: String, fields: HealthRecordFields, now: NaiveDateTime) -> Self {
        Self {
            id,
            student_id: fields.student_id,
            record_date: fields.record_date,
            record_type: fields.record_type.to_string(),
            height_cm: fields.height_cm,
            weight_kg: fields.weight_kg,
            blood_pressure: fields.blood_pressure,
            temperature_celsius: fields.temperature_celsius,
            allergies: fields.allergies,
            medications: fields.medications,
            medical_notes: fields.medical_notes,
            treatment_plan: fields.treatment_plan,
            next_appointment: fields.next_appointment,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<HealthRecordDB> for HealthRecord {
    type Error = Error;

    fn try_from(db: HealthRecordDB) -> Result<Self, Self::Error> {
        Ok(HealthRecord {
            record_type: db.record_type.parse()?,
            id: db.id,
            student_id: db.student_id,
            record_date: db.record_date,
            height_cm: db.height_cm,
            weight_kg: db.weight_kg,
            blood_pressure: db.blood_pressure,
            temperature_celsius: db.temperature_celsius,
            allergies: db.allergies,
            medications: db.medications,
            medical_notes: db.medical_notes,
            treatment_plan: db.treatment_plan,
            next_appointment: db.next_appointment,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<HealthRecord> for HealthRecordDB {
    fn from(record: HealthRecord) -> Self {
        Self {
            id: record.id,
            student_id: record.student_id,
            record_date: record.record_date,
            record_type: record.record_type.to_string(),
            height_cm: record.height_cm,
            weight_kg: record.weight_kg,
            blood_pressure: record.blood_pressure,
            temperature_celsius: record.temperature_celsius,
            allergies: record.allergies,
            medications: record.medications,
            medical_notes: record.medical_notes,
            treatment_plan: record.treatment_plan,
            next_appointment: record.next_appointment,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
