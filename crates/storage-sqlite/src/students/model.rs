//! Database models for students.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use school_health_core::errors::Error;
use school_health_core::students::{Student, StudentFields};

/// Database model for students
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::students)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct StudentDB {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub grade: i32,
    pub blood_type: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl StudentDB {
    pub fn from_fields(id: String, fields: StudentFields, now: NaiveDateTime) -> Self {
        Self {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            date_of_birth: fields.date_of_birth,
            gender: fields.gender.to_string(),
            grade: fields.grade,
            blood_type: fields.blood_type.map(|b| b.to_string()),
            father_name: fields.father_name,
            mother_name: fields.mother_name,
            contact_number: fields.contact_number,
            address: fields.address,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<StudentDB> for Student {
    type Error = Error;

    fn try_from(db: StudentDB) -> Result<Self, Self::Error> {
        Ok(Student {
            gender: db.gender.parse()?,
            blood_type: db.blood_type.as_deref().map(str::parse).transpose()?,
            id: db.id,
            first_name: db.first_name,
            last_name: db.last_name,
            date_of_birth: db.date_of_birth,
            grade: db.grade,
            father_name: db.father_name,
            mother_name: db.mother_name,
            contact_number: db.contact_number,
            address: db.address,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<Student> for StudentDB {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            first_name: student.first_name,
            last_name: student.last_name,
            date_of_birth: student.date_of_birth,
            gender: student.gender.to_string(),
            grade: student.grade,
            blood_type: student.blood_type.map(|b| b.to_string()),
            father_name: student.father_name,
            mother_name: student.mother_name,
            contact_number: student.contact_number,
            address: student.address,
            created_at: student.created_at,
            updated_at: student.updated_at,
        }
    }
}
