/// Lowest accepted grade (Kindergarten).
pub const MIN_GRADE: i32 = 0;

/// Highest accepted grade.
pub const MAX_GRADE: i32 = 12;

/// Wire names of student fields, used in validation messages.
pub mod student_fields {
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const DATE_OF_BIRTH: &str = "dateOfBirth";
    pub const GENDER: &str = "gender";
    pub const GRADE: &str = "grade";
}

/// Returns true if the grade is within the accepted range.
pub fn is_valid_grade(grade: i32) -> bool {
    (MIN_GRADE..=MAX_GRADE).contains(&grade)
}
