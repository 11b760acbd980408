use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use school_health_core::health_records as core_records;
use school_health_core::students as core_students;
use school_health_core::utils::NumericInput;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    /// Whole years, on today's UTC date.
    pub age: u32,
    pub gender: String,
    /// 0 is Kindergarten.
    pub grade: i32,
    pub blood_type: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_students::Student> for Student {
    fn from(s: core_students::Student) -> Self {
        Self {
            full_name: s.full_name(),
            age: s.age(),
            gender: s.gender.to_string(),
            blood_type: s.blood_type.map(|b| b.to_string()),
            id: s.id,
            first_name: s.first_name,
            last_name: s.last_name,
            date_of_birth: s.date_of_birth,
            grade: s.grade,
            father_name: s.father_name,
            mother_name: s.mother_name,
            contact_number: s.contact_number,
            address: s.address,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// Student form payload. Used for both create and update; on update absent
/// fields are kept and `""` clears an optional field.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// `YYYY-MM-DD`
    pub date_of_birth: Option<String>,
    /// `Male`, `Female` or `Other`, any case.
    pub gender: Option<String>,
    /// Number or numeric string, 0-12.
    #[schema(value_type = Option<f64>)]
    pub grade: Option<NumericInput>,
    pub blood_type: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
}

impl From<StudentInput> for core_students::NewStudent {
    fn from(s: StudentInput) -> Self {
        Self {
            first_name: s.first_name,
            last_name: s.last_name,
            date_of_birth: s.date_of_birth,
            gender: s.gender,
            grade: s.grade,
            blood_type: s.blood_type,
            father_name: s.father_name,
            mother_name: s.mother_name,
            contact_number: s.contact_number,
            address: s.address,
        }
    }
}

impl From<StudentInput> for core_students::StudentUpdate {
    fn from(s: StudentInput) -> Self {
        Self {
            first_name: s.first_name,
            last_name: s.last_name,
            date_of_birth: s.date_of_birth,
            gender: s.gender,
            grade: s.grade,
            blood_type: s.blood_type,
            father_name: s.father_name,
            mother_name: s.mother_name,
            contact_number: s.contact_number,
            address: s.address,
        }
    }
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct StudentListParams {
    /// Case-insensitive substring of "first last".
    pub search: Option<String>,
    pub grade: Option<String>,
    /// `firstName` (default), `lastName`, `grade`, `dateOfBirth` or `createdAt`.
    pub sort: Option<String>,
    pub desc: Option<String>,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StudentDeletion {
    pub student_id: String,
    pub health_records_deleted: usize,
}

impl From<core_students::StudentDeletion> for StudentDeletion {
    fn from(d: core_students::StudentDeletion) -> Self {
        Self {
            student_id: d.student_id,
            health_records_deleted: d.health_records_deleted,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
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
    /// Derived from height and weight on every read; never stored.
    pub bmi: Option<f64>,
    /// e.g. `NORMAL`, `OBESE_CLASS_I`.
    #[schema(value_type = Option<String>)]
    pub bmi_category: Option<school_health_core::BmiCategory>,
}

impl From<core_records::HealthRecordView> for HealthRecord {
    fn from(view: core_records::HealthRecordView) -> Self {
        let r = view.record;
        Self {
            id: r.id,
            student_id: r.student_id,
            record_date: r.record_date,
            record_type: r.record_type.to_string(),
            height_cm: r.height_cm,
            weight_kg: r.weight_kg,
            blood_pressure: r.blood_pressure,
            temperature_celsius: r.temperature_celsius,
            allergies: r.allergies,
            medications: r.medications,
            medical_notes: r.medical_notes,
            treatment_plan: r.treatment_plan,
            next_appointment: r.next_appointment,
            created_at: r.created_at,
            updated_at: r.updated_at,
            bmi: view.bmi,
            bmi_category: view.bmi_category,
        }
    }
}

/// Health record form payload. A submitted `bmi` is ignored.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecordInput {
    pub student_id: Option<String>,
    /// Date or date-time; defaults to now on create.
    pub record_date: Option<String>,
    pub record_type: Option<String>,
    #[serde(alias = "height")]
    #[schema(value_type = Option<f64>)]
    pub height_cm: Option<NumericInput>,
    #[serde(alias = "weight")]
    #[schema(value_type = Option<f64>)]
    pub weight_kg: Option<NumericInput>,
    pub blood_pressure: Option<String>,
    /// Celsius, 30-45.
    #[serde(alias = "temperature")]
    #[schema(value_type = Option<f64>)]
    pub temperature_celsius: Option<NumericInput>,
    pub allergies: Option<String>,
    pub medications: Option<String>,
    pub medical_notes: Option<String>,
    pub treatment_plan: Option<String>,
    pub next_appointment: Option<String>,
}

impl From<HealthRecordInput> for core_records::NewHealthRecord {
    fn from(r: HealthRecordInput) -> Self {
        Self {
            student_id: r.student_id,
            record_date: r.record_date,
            record_type: r.record_type,
            height_cm: r.height_cm,
            weight_kg: r.weight_kg,
            blood_pressure: r.blood_pressure,
            temperature_celsius: r.temperature_celsius,
            allergies: r.allergies,
            medications: r.medications,
            medical_notes: r.medical_notes,
            treatment_plan: r.treatment_plan,
            next_appointment: r.next_appointment,
        }
    }
}

impl From<HealthRecordInput> for core_records::HealthRecordUpdate {
    fn from(r: HealthRecordInput) -> Self {
        Self {
            student_id: r.student_id,
            record_date: r.record_date,
            record_type: r.record_type,
            height_cm: r.height_cm,
            weight_kg: r.weight_kg,
            blood_pressure: r.blood_pressure,
            temperature_celsius: r.temperature_celsius,
            allergies: r.allergies,
            medications: r.medications,
            medical_notes: r.medical_notes,
            treatment_plan: r.treatment_plan,
            next_appointment: r.next_appointment,
        }
    }
}
