//! Student repository and service traits.
//!
//! These traits define the contract for student operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::students_model::{
    NewStudent, Student, StudentDeletion, StudentFields, StudentPatch, StudentQuery, StudentUpdate,
};
use crate::errors::Result;

/// Trait defining the contract for Student repository operations.
///
/// Writes receive already-validated values; implementations assign identity
/// and timestamps.
#[async_trait]
pub trait StudentRepositoryTrait: Send + Sync {
    /// Inserts a student with a freshly generated identifier.
    async fn create(&self, fields: StudentFields) -> Result<Student>;

    /// Applies a patch to an existing student.
    ///
    /// Fails with `NotFound` if the student does not exist.
    async fn update(&self, student_id: &str, patch: StudentPatch) -> Result<Student>;

    /// Deletes a student together with all of its health records.
    ///
    /// Both deletions happen in one transaction; either everything is removed
    /// or nothing is. Fails with `NotFound` if the student does not exist.
    async fn delete(&self, student_id: &str) -> Result<StudentDeletion>;

    /// Retrieves a student by ID. Fails with `NotFound` if missing.
    fn get_by_id(&self, student_id: &str) -> Result<Student>;

    /// Lists students matching the query, in the query's order.
    fn list(&self, query: &StudentQuery) -> Result<Vec<Student>>;

    /// Grade of every student, read in a single statement.
    fn list_grades(&self) -> Result<Vec<i32>>;
}

/// Trait defining the contract for Student service operations.
#[async_trait]
pub trait StudentServiceTrait: Send + Sync {
    async fn create_student(&self, new_student: NewStudent) -> Result<Student>;

    async fn update_student(&self, student_id: &str, update: StudentUpdate) -> Result<Student>;

    async fn delete_student(&self, student_id: &str) -> Result<StudentDeletion>;

    fn get_student(&self, student_id: &str) -> Result<Student>;

    fn list_students(&self, query: &StudentQuery) -> Result<Vec<Student>>;
}
