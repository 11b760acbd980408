//! Demo data for a fresh database, enabled with `SH_SEED_SAMPLE_DATA`.

use school_health_core::{
    health_records::NewHealthRecord,
    students::{NewStudent, StudentQuery},
    utils::NumericInput,
};

use crate::main_lib::AppState;

struct SampleStudent {
    first_name: &'static str,
    last_name: &'static str,
    date_of_birth: &'static str,
    gender: &'static str,
    grade: f64,
    checkup: SampleCheckup,
}

struct SampleCheckup {
    record_date: &'static str,
    height_cm: f64,
    weight_kg: f64,
    blood_pressure: &'static str,
    temperature_celsius: f64,
    allergies: &'static str,
    medications: Option<&'static str>,
    medical_notes: &'static str,
    treatment_plan: &'static str,
    next_appointment: &'static str,
}

const SAMPLE_STUDENTS: [SampleStudent; 3] = [
    SampleStudent {
        first_name: "John",
        last_name: "Doe",
        date_of_birth: "2010-05-15",
        gender: "Male",
        grade: 5.0,
        checkup: SampleCheckup {
            record_date: "2024-01-15",
            height_cm: 145.5,
            weight_kg: 40.2,
            blood_pressure: "110/70",
            temperature_celsius: 36.6,
            allergies: "Peanuts",
            medications: None,
            medical_notes: "Healthy child, regular development",
            treatment_plan: "Continue regular checkups",
            next_appointment: "2024-07-15",
        },
    },
    SampleStudent {
        first_name: "Alice",
        last_name: "Smith",
        date_of_birth: "2011-03-20",
        gender: "Female",
        grade: 4.0,
        checkup: SampleCheckup {
            record_date: "2024-01-16",
            height_cm: 138.2,
            weight_kg: 35.5,
            blood_pressure: "108/68",
            temperature_celsius: 36.7,
            allergies: "None",
            medications: Some("Cold medicine"),
            medical_notes: "Mild cold symptoms present, asthma well controlled",
            treatment_plan: "Monitor cold symptoms, continue asthma medication",
            next_appointment: "2024-07-16",
        },
    },
    SampleStudent {
        first_name: "Michael",
        last_name: "Johnson",
        date_of_birth: "2010-08-10",
        gender: "Male",
        grade: 5.0,
        checkup: SampleCheckup {
            record_date: "2024-01-17",
            height_cm: 142.8,
            weight_kg: 38.4,
            blood_pressure: "112/72",
            temperature_celsius: 36.5,
            allergies: "Dust",
            medications: Some("Allergy medication"),
            medical_notes: "Healthy child, seasonal allergies well managed",
            treatment_plan: "Continue allergy medication as needed",
            next_appointment: "2024-07-17",
        },
    },
];

/// Inserts the sample students, each with one annual physical, unless any
/// student already exists. Returns the number of students created.
pub async fn seed_sample_data(state: &AppState) -> anyhow::Result<usize> {
    if !state
        .student_service
        .list_students(&StudentQuery::default())?
        .is_empty()
    {
        tracing::info!("Skipping sample data; the database already has students");
        return Ok(0);
    }

    for sample in &SAMPLE_STUDENTS {
        let student = state
            .student_service
            .create_student(NewStudent {
                first_name: Some(sample.first_name.to_string()),
                last_name: Some(sample.last_name.to_string()),
                date_of_birth: Some(sample.date_of_birth.to_string()),
                gender: Some(sample.gender.to_string()),
                grade: Some(NumericInput::Number(sample.grade)),
                ..Default::default()
            })
            .await?;

        let checkup = &sample.checkup;
        state
            .health_record_service
            .create_health_record(NewHealthRecord {
                student_id: Some(student.id),
                record_date: Some(checkup.record_date.to_string()),
                record_type: Some("Annual Physical".to_string()),
                height_cm: Some(NumericInput::Number(checkup.height_cm)),
                weight_kg: Some(NumericInput::Number(checkup.weight_kg)),
                blood_pressure: Some(checkup.blood_pressure.to_string()),
                temperature_celsius: Some(NumericInput::Number(checkup.temperature_celsius)),
                allergies: Some(checkup.allergies.to_string()),
                medications: checkup.medications.map(str::to_string),
                medical_notes: Some(checkup.medical_notes.to_string()),
                treatment_plan: Some(checkup.treatment_plan.to_string()),
                next_appointment: Some(checkup.next_appointment.to_string()),
            })
            .await?;
    }

    tracing::info!("Seeded {} sample students", SAMPLE_STUDENTS.len());
    Ok(SAMPLE_STUDENTS.len())
}
