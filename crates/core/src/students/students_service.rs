use log::debug;
use std::sync::Arc;

use super::students_model::{NewStudent, Student, StudentDeletion, StudentQuery, StudentUpdate};
use super::students_traits::{StudentRepositoryTrait, StudentServiceTrait};
use crate::errors::Result;
use crate::utils::today_utc;

/// Service for managing students
pub struct StudentService {
    repository: Arc<dyn StudentRepositoryTrait>,
}

impl StudentService {
    /// Creates a new StudentService instance
    pub fn new(repository: Arc<dyn StudentRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl StudentServiceTrait for StudentService {
    /// Validates and stores a new student
    async fn create_student(&self, new_student: NewStudent) -> Result<Student> {
        let fields = new_student.validate(today_utc())?;
        debug!(
            "Creating student {} {} (grade {})",
            fields.first_name, fields.last_name, fields.grade
        );
        self.repository.create(fields).await
    }

    /// Applies a partial update; fields not present in the update are kept
    async fn update_student(&self, student_id: &str, update: StudentUpdate) -> Result<Student> {
        let patch = update.validate(today_utc())?;
        if patch.is_empty() {
            return self.repository.get_by_id(student_id);
        }
        debug!("Updating student {}", student_id);
        self.repository.update(student_id, patch).await
    }

    /// Deletes a student and, atomically, all of its health records
    async fn delete_student(&self, student_id: &str) -> Result<StudentDeletion> {
        let deletion = self.repository.delete(student_id).await?;
        debug!(
            "Deleted student {} and {} health record(s)",
            deletion.student_id, deletion.health_records_deleted
        );
        Ok(deletion)
    }

    fn get_student(&self, student_id: &str) -> Result<Student> {
        self.repository.get_by_id(student_id)
    }

    fn list_students(&self, query: &StudentQuery) -> Result<Vec<Student>> {
        self.repository.list(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::students::{StudentFields, StudentPatch};
    use crate::utils::NumericInput;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::RwLock;

    #[derive(Default)]
    struct MockStudentRepository {
        students: RwLock<Vec<Student>>,
        writes: RwLock<usize>,
    }

    impl MockStudentRepository {
        fn write_count(&self) -> usize {
            *self.writes.read().unwrap()
        }
    }

    #[async_trait]
    impl StudentRepositoryTrait for MockStudentRepository {
        async fn create(&self, fields: StudentFields) -> Result<Student> {
            *self.writes.write().unwrap() += 1;
            let now = Utc::now().naive_utc();
            let mut students = self.students.write().unwrap();
            let student = Student {
                id: format!("student-{}", students.len() + 1),
                first_name: fields.first_name,
                last_name: fields.last_name,
                date_of_birth: fields.date_of_birth,
                gender: fields.gender,
                grade: fields.grade,
                blood_type: fields.blood_type,
                father_name: fields.father_name,
                mother_name: fields.mother_name,
                contact_number: fields.contact_number,
                address: fields.address,
                created_at: now,
                updated_at: now,
            };
            students.push(student.clone());
            Ok(student)
        }

        async fn update(&self, student_id: &str, patch: StudentPatch) -> Result<Student> {
            *self.writes.write().unwrap() += 1;
            let mut students = self.students.write().unwrap();
            let student = students
                .iter_mut()
                .find(|s| s.id == student_id)
                .ok_or_else(|| Error::not_found("Student", student_id))?;
            patch.apply_to(student);
            Ok(student.clone())
        }

        async fn delete(&self, student_id: &str) -> Result<StudentDeletion> {
            let mut students = self.students.write().unwrap();
            let before = students.len();
            students.retain(|s| s.id != student_id);
            if students.len() == before {
                return Err(Error::not_found("Student", student_id));
            }
            Ok(StudentDeletion {
                student_id: student_id.to_string(),
                health_records_deleted: 0,
            })
        }

        fn get_by_id(&self, student_id: &str) -> Result<Student> {
            self.students
                .read()
                .unwrap()
                .iter()
                .find(|s| s.id == student_id)
                .cloned()
                .ok_or_else(|| Error::not_found("Student", student_id))
        }

        fn list(&self, query: &StudentQuery) -> Result<Vec<Student>> {
            Ok(self
                .students
                .read()
                .unwrap()
                .iter()
                .filter(|s| query.matches(s))
                .cloned()
                .collect())
        }

        fn list_grades(&self) -> Result<Vec<i32>> {
            unimplemented!()
        }
    }

    fn new_student(first: &str, gender: &str, grade: &str) -> NewStudent {
        NewStudent {
            first_name: Some(first.to_string()),
            last_name: Some("Mensah".to_string()),
            date_of_birth: Some("2012-02-20".to_string()),
            gender: Some(gender.to_string()),
            grade: Some(NumericInput::from(grade)),
            ..Default::default()
        }
    }

    fn service() -> (StudentService, Arc<MockStudentRepository>) {
        let repo = Arc::new(MockStudentRepository::default());
        (StudentService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_create_student_normalizes_input() {
        let (service, _) = service();
        let created = service
            .create_student(new_student("Kofi", "mALE", "6"))
            .await
            .unwrap();
        assert_eq!(created.gender.as_str(), "Male");
        assert_eq!(created.grade, 6);
    }

    #[tokio::test]
    async fn test_invalid_student_never_reaches_repository() {
        let (service, repo) = service();
        let err = service
            .create_student(new_student("Kofi", "robot", "6"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn test_update_missing_student_is_not_found() {
        let (service, _) = service();
        let update = StudentUpdate {
            first_name: Some("Ama".to_string()),
            ..Default::default()
        };
        let err = service.update_student("nope", update).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_empty_update_skips_write() {
        let (service, repo) = service();
        let created = service
            .create_student(new_student("Kofi", "male", "6"))
            .await
            .unwrap();
        let unchanged = service
            .update_student(&created.id, StudentUpdate::default())
            .await
            .unwrap();
        assert_eq!(unchanged, created);
        assert_eq!(repo.write_count(), 1);
    }

    #[tokio::test]
    async fn test_invalid_gender_on_update_is_validation_error() {
        let (service, _) = service();
        let created = service
            .create_student(new_student("Kofi", "male", "6"))
            .await
            .unwrap();
        let update = StudentUpdate {
            gender: Some("x".to_string()),
            ..Default::default()
        };
        let err = service
            .update_student(&created.id, update)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (service, _) = service();
        let created = service
            .create_student(new_student("Kofi", "male", "6"))
            .await
            .unwrap();
        service.delete_student(&created.id).await.unwrap();
        assert!(service.get_student(&created.id).unwrap_err().is_not_found());
        assert!(service
            .delete_student(&created.id)
            .await
            .unwrap_err()
            .is_not_found());
    }
}
