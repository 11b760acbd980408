//! Student domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::students_constants::{is_valid_grade, student_fields as fields, MAX_GRADE, MIN_GRADE};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::{
    age_on, clearable_text, normalize_text, parse_date, require_text, today_utc, NumericInput,
};

/// Gender, stored in its canonical capitalisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl FromStr for Gender {
    type Err = Error;

    /// Normalises to first letter upper-case, rest lower-case, then checks membership.
    fn from_str(raw: &str) -> Result<Self> {
        let normalized = capitalize(raw.trim());
        Gender::ALL
            .into_iter()
            .find(|gender| gender.as_str() == normalized)
            .ok_or_else(|| {
                ValidationError::invalid(format!(
                    "Gender must be one of Male, Female or Other, got '{}'",
                    raw
                ))
                .into()
            })
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The eight standard ABO/Rh blood types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodType {
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }
}

impl FromStr for BloodType {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_ascii_uppercase();
        BloodType::ALL
            .into_iter()
            .find(|blood_type| blood_type.as_str() == normalized)
            .ok_or_else(|| {
                ValidationError::invalid(format!("Unknown blood type '{}'", raw)).into()
            })
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain model representing a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    /// 0 is Kindergarten.
    pub grade: i32,
    pub blood_type: Option<BloodType>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in whole years on the given date.
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        age_on(self.date_of_birth, date)
    }

    /// Age in whole years today (UTC).
    pub fn age(&self) -> u32 {
        self.age_on(today_utc())
    }
}

/// Raw input for creating a student, as submitted by a form.
///
/// Everything is optional here so that a missing field surfaces as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub grade: Option<NumericInput>,
    pub blood_type: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
}

impl NewStudent {
    /// Validates the input and produces typed fields ready for storage.
    pub fn validate(&self, today: NaiveDate) -> Result<StudentFields> {
        let first_name = require_text(fields::FIRST_NAME, self.first_name.as_deref())?;
        let last_name = require_text(fields::LAST_NAME, self.last_name.as_deref())?;

        let date_of_birth = self
            .date_of_birth
            .as_deref()
            .ok_or_else(|| Error::from(ValidationError::missing(fields::DATE_OF_BIRTH)))
            .and_then(|raw| parse_date_of_birth(raw, today))?;

        let gender = normalize_text(self.gender.as_deref())
            .ok_or_else(|| Error::from(ValidationError::missing(fields::GENDER)))?
            .parse::<Gender>()?;

        let grade = self
            .grade
            .as_ref()
            .ok_or_else(|| Error::from(ValidationError::missing(fields::GRADE)))
            .and_then(parse_grade)?;

        Ok(StudentFields {
            first_name,
            last_name,
            date_of_birth,
            gender,
            grade,
            blood_type: parse_blood_type(self.blood_type.as_deref())?,
            father_name: normalize_text(self.father_name.as_deref()),
            mother_name: normalize_text(self.mother_name.as_deref()),
            contact_number: normalize_text(self.contact_number.as_deref()),
            address: normalize_text(self.address.as_deref()),
        })
    }
}

/// Validated student attributes, without identity or timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentFields {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub grade: i32,
    pub blood_type: Option<BloodType>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
}

/// Raw partial update. Absent (or null) fields are left unchanged; an empty
/// string clears an optional field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub grade: Option<NumericInput>,
    pub blood_type: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
}

impl StudentUpdate {
    pub fn validate(&self, today: NaiveDate) -> Result<StudentPatch> {
        Ok(StudentPatch {
            first_name: self
                .first_name
                .as_deref()
                .map(|raw| require_text(fields::FIRST_NAME, Some(raw)))
                .transpose()?,
            last_name: self
                .last_name
                .as_deref()
                .map(|raw| require_text(fields::LAST_NAME, Some(raw)))
                .transpose()?,
            date_of_birth: self
                .date_of_birth
                .as_deref()
                .map(|raw| parse_date_of_birth(raw, today))
                .transpose()?,
            gender: self
                .gender
                .as_deref()
                .map(str::parse::<Gender>)
                .transpose()?,
            grade: self.grade.as_ref().map(parse_grade).transpose()?,
            blood_type: self
                .blood_type
                .as_deref()
                .map(|raw| parse_blood_type(Some(raw)))
                .transpose()?,
            father_name: clearable_text(self.father_name.as_deref()),
            mother_name: clearable_text(self.mother_name.as_deref()),
            contact_number: clearable_text(self.contact_number.as_deref()),
            address: clearable_text(self.address.as_deref()),
        })
    }
}

/// Validated partial update. For optional attributes the outer `Option` says
/// whether the field changes, the inner one holds the new value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub grade: Option<i32>,
    pub blood_type: Option<Option<BloodType>>,
    pub father_name: Option<Option<String>>,
    pub mother_name: Option<Option<String>>,
    pub contact_number: Option<Option<String>>,
    pub address: Option<Option<String>>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        *self == StudentPatch::default()
    }

    /// Applies the changed fields onto an existing student.
    pub fn apply_to(self, student: &mut Student) {
        if let Some(first_name) = self.first_name {
            student.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            student.last_name = last_name;
        }
        if let Some(date_of_birth) = self.date_of_birth {
            student.date_of_birth = date_of_birth;
        }
        if let Some(gender) = self.gender {
            student.gender = gender;
        }
        if let Some(grade) = self.grade {
            student.grade = grade;
        }
        if let Some(blood_type) = self.blood_type {
            student.blood_type = blood_type;
        }
        if let Some(father_name) = self.father_name {
            student.father_name = father_name;
        }
        if let Some(mother_name) = self.mother_name {
            student.mother_name = mother_name;
        }
        if let Some(contact_number) = self.contact_number {
            student.contact_number = contact_number;
        }
        if let Some(address) = self.address {
            student.address = address;
        }
    }
}

/// Sort keys for student listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StudentSortField {
    /// First name, then last name.
    #[default]
    FirstName,
    LastName,
    Grade,
    DateOfBirth,
    CreatedAt,
}

impl FromStr for StudentSortField {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim() {
            "firstName" | "first_name" | "name" => Ok(StudentSortField::FirstName),
            "lastName" | "last_name" => Ok(StudentSortField::LastName),
            "grade" => Ok(StudentSortField::Grade),
            "dateOfBirth" | "date_of_birth" => Ok(StudentSortField::DateOfBirth),
            "createdAt" | "created_at" => Ok(StudentSortField::CreatedAt),
            other => Err(ValidationError::invalid(format!("Unknown sort field '{}'", other)).into()),
        }
    }
}

/// Filter and ordering for student listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentQuery {
    /// Case-insensitive substring over "first last".
    pub search: Option<String>,
    pub grade: Option<i32>,
    pub sort: StudentSortField,
    pub descending: bool,
}

impl StudentQuery {
    /// The lower-cased search term, if one was given.
    pub fn search_term(&self) -> Option<String> {
        normalize_text(self.search.as_deref()).map(|s| s.to_lowercase())
    }

    /// Whether a student passes the filters of this query.
    pub fn matches(&self, student: &Student) -> bool {
        if let Some(grade) = self.grade {
            if student.grade != grade {
                return false;
            }
        }
        match self.search_term() {
            Some(term) => student.full_name().to_lowercase().contains(&term),
            None => true,
        }
    }
}

/// Outcome of a cascading student delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDeletion {
    pub student_id: String,
    pub health_records_deleted: usize,
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn parse_date_of_birth(raw: &str, today: NaiveDate) -> Result<NaiveDate> {
    let date = parse_date(fields::DATE_OF_BIRTH, raw)?;
    if date > today {
        return Err(ValidationError::invalid(format!(
            "Date of birth {} is in the future",
            date
        ))
        .into());
    }
    Ok(date)
}

fn parse_grade(input: &NumericInput) -> Result<i32> {
    let grade = input
        .resolve_integer(fields::GRADE)?
        .ok_or_else(|| ValidationError::missing(fields::GRADE))?;
    if !is_valid_grade(grade) {
        return Err(ValidationError::OutOfRange {
            field: fields::GRADE.to_string(),
            value: grade as f64,
            min: MIN_GRADE as f64,
            max: MAX_GRADE as f64,
        }
        .into());
    }
    Ok(grade)
}

fn parse_blood_type(raw: Option<&str>) -> Result<Option<BloodType>> {
    normalize_text(raw)
        .map(|value| value.parse::<BloodType>())
        .transpose()
}
