//! Tests for health record models, validation ranges and the derived BMI.

#[cfg(test)]
mod tests {
    use crate::bmi::BmiCategory;
    use crate::errors::{Error, ValidationError};
    use crate::health_records::{
        HealthRecord, HealthRecordUpdate, HealthRecordView, NewHealthRecord, RecordType,
    };
    use crate::utils::NumericInput;
    use chrono::{NaiveDate, NaiveDateTime};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 3)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap()
    }

    fn valid_new_record() -> NewHealthRecord {
        NewHealthRecord {
            student_id: Some("student-1".to_string()),
            record_type: Some("Annual Physical".to_string()),
            height_cm: Some(NumericInput::from(160.0)),
            weight_kg: Some(NumericInput::from("50")),
            ..Default::default()
        }
    }

    fn create_test_record() -> HealthRecord {
        let fields = valid_new_record().validate(now()).unwrap();
        HealthRecord {
            id: "record-1".to_string(),
            student_id: fields.student_id,
            record_date: fields.record_date,
            record_type: fields.record_type,
            height_cm: fields.height_cm,
            weight_kg: fields.weight_kg,
            blood_pressure: fields.blood_pressure,
            temperature_celsius: fields.temperature_celsius,
            allergies: fields.allergies,
            medications: fields.medications,
            medical_notes: fields.medical_notes,
            treatment_plan: fields.treatment_plan,
            next_appointment: fields.next_appointment,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn assert_out_of_range(err: Error) {
        assert!(
            matches!(err, Error::Validation(ValidationError::OutOfRange { .. })),
            "expected out of range, got {err:?}"
        );
    }

    // ==================== RecordType ====================

    #[test]
    fn test_record_type_parsing() {
        assert_eq!(
            "annual physical".parse::<RecordType>().unwrap(),
            RecordType::AnnualPhysical
        );
        assert_eq!(
            "MENTAL_HEALTH".parse::<RecordType>().unwrap(),
            RecordType::MentalHealth
        );
        assert_eq!("dental".parse::<RecordType>().unwrap(), RecordType::Dental);
        assert!(matches!(
            "Checkup".parse::<RecordType>().unwrap_err(),
            Error::Validation(_)
        ));
    }

    #[test]
    fn test_record_type_serializes_canonical_label() {
        assert_eq!(
            serde_json::to_string(&RecordType::MentalHealth).unwrap(),
            "\"Mental Health\""
        );
    }

    // ==================== NewHealthRecord ====================

    #[test]
    fn test_record_date_defaults_to_now() {
        let fields = valid_new_record().validate(now()).unwrap();
        assert_eq!(fields.record_date, now());
        assert_eq!(fields.height_cm, Some(160.0));
        assert_eq!(fields.weight_kg, Some(50.0));
    }

    #[test]
    fn test_record_date_is_parsed() {
        let mut input = valid_new_record();
        input.record_date = Some("2024-02-14".to_string());
        let fields = input.validate(now()).unwrap();
        assert_eq!(fields.record_date.to_string(), "2024-02-14 00:00:00");
    }

    #[test]
    fn test_required_fields() {
        let mut input = valid_new_record();
        input.student_id = None;
        assert!(matches!(
            input.validate(now()).unwrap_err(),
            Error::Validation(ValidationError::MissingField(_))
        ));

        let mut input = valid_new_record();
        input.record_type = Some(" ".to_string());
        assert!(matches!(
            input.validate(now()).unwrap_err(),
            Error::Validation(ValidationError::MissingField(_))
        ));
    }

    #[test]
    fn test_numeric_ranges() {
        let mut input = valid_new_record();
        input.height_cm = Some(NumericInput::from(300.5));
        assert_out_of_range(input.validate(now()).unwrap_err());

        let mut input = valid_new_record();
        input.weight_kg = Some(NumericInput::from(-1.0));
        assert_out_of_range(input.validate(now()).unwrap_err());

        let mut input = valid_new_record();
        input.temperature_celsius = Some(NumericInput::from("98.6"));
        assert_out_of_range(input.validate(now()).unwrap_err());

        let mut input = valid_new_record();
        input.temperature_celsius = Some(NumericInput::from(37.2));
        assert_eq!(input.validate(now()).unwrap().temperature_celsius, Some(37.2));
    }

    #[test]
    fn test_empty_measurements_are_absent_not_empty_strings() {
        let mut input = valid_new_record();
        input.height_cm = Some(NumericInput::from(""));
        input.weight_kg = Some(NumericInput::from(""));
        let fields = input.validate(now()).unwrap();
        assert_eq!(fields.height_cm, None);
        assert_eq!(fields.weight_kg, None);
    }

    #[test]
    fn test_client_bmi_is_ignored() {
        let input: NewHealthRecord = serde_json::from_str(
            r#"{"studentId":"s1","recordType":"Illness","height":"160","weight":50,"bmi":99.9}"#,
        )
        .unwrap();
        let fields = input.validate(now()).unwrap();
        assert_eq!(fields.height_cm, Some(160.0));
        assert_eq!(fields.weight_kg, Some(50.0));
    }

    #[test]
    fn test_next_appointment_parsing() {
        let mut input = valid_new_record();
        input.next_appointment = Some("2024-11-01".to_string());
        assert_eq!(
            input.validate(now()).unwrap().next_appointment,
            NaiveDate::from_ymd_opt(2024, 11, 1)
        );

        input.next_appointment = Some("soon".to_string());
        assert!(input.validate(now()).is_err());
    }

    // ==================== Derived BMI ====================

    #[test]
    fn test_view_computes_bmi() {
        let view = HealthRecordView::from(create_test_record());
        assert_eq!(view.bmi, Some(19.5));
        assert_eq!(view.bmi_category, Some(BmiCategory::Normal));
    }

    #[test]
    fn test_view_without_height_has_no_bmi() {
        let mut record = create_test_record();
        record.height_cm = None;
        let view = HealthRecordView::from(record);
        assert_eq!(view.bmi, None);
        assert_eq!(view.bmi_category, None);
    }

    #[test]
    fn test_view_serializes_flat_with_bmi() {
        let json = serde_json::to_value(HealthRecordView::from(create_test_record())).unwrap();
        assert_eq!(json["id"], "record-1");
        assert_eq!(json["heightCm"], 160.0);
        assert_eq!(json["bmi"], 19.5);
        assert_eq!(json["bmiCategory"], "NORMAL");
        assert_eq!(json["recordType"], "Annual Physical");
    }

    // ==================== HealthRecordUpdate / Patch ====================

    #[test]
    fn test_patch_recomputes_bmi_from_new_weight() {
        let mut record = create_test_record();
        let patch = HealthRecordUpdate {
            weight_kg: Some(NumericInput::from(64.0)),
            ..Default::default()
        }
        .validate()
        .unwrap();
        patch.apply_to(&mut record);
        assert_eq!(record.height_cm, Some(160.0));
        assert_eq!(record.bmi(), Some(25.0));
        assert_eq!(record.bmi_category(), Some(BmiCategory::Overweight));
    }

    #[test]
    fn test_patch_clears_measurement_with_empty_string() {
        let mut record = create_test_record();
        let patch = HealthRecordUpdate {
            height_cm: Some(NumericInput::from("")),
            allergies: Some("".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(patch.height_cm, Some(None));
        patch.apply_to(&mut record);
        assert_eq!(record.height_cm, None);
        assert_eq!(record.bmi(), None);
    }

    #[test]
    fn test_patch_validates_ranges_and_types() {
        let update = HealthRecordUpdate {
            weight_kg: Some(NumericInput::from(501.0)),
            ..Default::default()
        };
        assert_out_of_range(update.validate().unwrap_err());

        let update = HealthRecordUpdate {
            record_type: Some("Surgery".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_empty_update_is_empty_patch() {
        assert!(HealthRecordUpdate::default().validate().unwrap().is_empty());
    }
}
