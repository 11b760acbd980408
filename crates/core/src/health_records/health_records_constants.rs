/// Inclusive height range in centimetres.
pub const HEIGHT_CM_RANGE: (f64, f64) = (0.0, 300.0);

/// Inclusive weight range in kilograms.
pub const WEIGHT_KG_RANGE: (f64, f64) = (0.0, 500.0);

/// Inclusive body temperature range in degrees Celsius.
pub const TEMPERATURE_CELSIUS_RANGE: (f64, f64) = (30.0, 45.0);

/// Wire names of health record fields, used in validation messages.
pub mod record_fields {
    pub const STUDENT_ID: &str = "studentId";
    pub const RECORD_DATE: &str = "recordDate";
    pub const RECORD_TYPE: &str = "recordType";
    pub const HEIGHT_CM: &str = "heightCm";
    pub const WEIGHT_KG: &str = "weightKg";
    pub const TEMPERATURE_CELSIUS: &str = "temperatureCelsius";
    pub const NEXT_APPOINTMENT: &str = "nextAppointment";
}
