use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use school_health_core::errors::{Error, Result};
use school_health_core::students::{
    Student, StudentDeletion, StudentFields, StudentPatch, StudentQuery, StudentRepositoryTrait,
    StudentSortField,
};

use super::model::StudentDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::health_records;
use crate::schema::students;
use crate::schema::students::dsl::*;

/// Repository for managing student data in the database
pub struct StudentRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl StudentRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

/// Loads one student row inside an existing connection or transaction.
fn find_student(conn: &mut SqliteConnection, student_id: &str) -> Result<StudentDB> {
    students
        .find(student_id)
        .select(StudentDB::as_select())
        .first::<StudentDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::not_found("Student", student_id))
}

/// Whether a student row exists.
pub(crate) fn student_exists(conn: &mut SqliteConnection, student_id: &str) -> Result<bool> {
    let found = students
        .find(student_id)
        .select(id)
        .first::<String>(conn)
        .optional()
        .map_err(StorageError::from)?;
    Ok(found.is_some())
}

#[async_trait]
impl StudentRepositoryTrait for StudentRepository {
    async fn create(&self, fields: StudentFields) -> Result<Student> {
        let student_db =
            StudentDB::from_fields(Uuid::new_v4().to_string(), fields, Utc::now().naive_utc());

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Student> {
                let inserted = diesel::insert_into(students::table)
                    .values(&student_db)
                    .returning(StudentDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Student::try_from(inserted)
            })
            .await
    }

    async fn update(&self, student_id: &str, patch: StudentPatch) -> Result<Student> {
        let student_id = student_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Student> {
                let mut student = Student::try_from(find_student(conn, &student_id)?)?;
                patch.apply_to(&mut student);
                student.updated_at = Utc::now().naive_utc();

                let student_db = StudentDB::from(student);
                diesel::update(students.find(&student_id))
                    .set(&student_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Student::try_from(student_db)
            })
            .await
    }

    async fn delete(&self, student_id: &str) -> Result<StudentDeletion> {
        let student_id = student_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<StudentDeletion> {
                if !student_exists(conn, &student_id)? {
                    return Err(Error::not_found("Student", &student_id));
                }

                // Records go first so the count reflects what this delete removed.
                let records_deleted = diesel::delete(
                    health_records::table.filter(health_records::student_id.eq(&student_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;

                diesel::delete(students.find(&student_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                debug!(
                    "Removed student {} with {} health record(s)",
                    student_id, records_deleted
                );
                Ok(StudentDeletion {
                    student_id,
                    health_records_deleted: records_deleted,
                })
            })
            .await
    }

    fn get_by_id(&self, student_id: &str) -> Result<Student> {
        let mut conn = get_connection(&self.pool)?;
        Student::try_from(find_student(&mut conn, student_id)?)
    }

    fn list(&self, query: &StudentQuery) -> Result<Vec<Student>> {
        let mut conn = get_connection(&self.pool)?;

        let mut statement = students.select(StudentDB::as_select()).into_boxed();

        if let Some(grade_filter) = query.grade {
            statement = statement.filter(grade.eq(grade_filter));
        }

        statement = match (query.sort, query.descending) {
            (StudentSortField::FirstName, false) => {
                statement.order_by((first_name.asc(), last_name.asc()))
            }
            (StudentSortField::FirstName, true) => {
                statement.order_by((first_name.desc(), last_name.desc()))
            }
            (StudentSortField::LastName, false) => {
                statement.order_by((last_name.asc(), first_name.asc()))
            }
            (StudentSortField::LastName, true) => {
                statement.order_by((last_name.desc(), first_name.desc()))
            }
            (StudentSortField::Grade, false) => {
                statement.order_by((grade.asc(), first_name.asc(), last_name.asc()))
            }
            (StudentSortField::Grade, true) => {
                statement.order_by((grade.desc(), first_name.asc(), last_name.asc()))
            }
            (StudentSortField::DateOfBirth, false) => statement.order_by(date_of_birth.asc()),
            (StudentSortField::DateOfBirth, true) => statement.order_by(date_of_birth.desc()),
            (StudentSortField::CreatedAt, false) => statement.order_by(created_at.asc()),
            (StudentSortField::CreatedAt, true) => statement.order_by(created_at.desc()),
        };

        let rows = statement
            .then_order_by(id.asc())
            .load::<StudentDB>(&mut conn)
            .map_err(StorageError::from)?;

        // SQLite only folds ASCII case, so the name search runs here.
        let mut matching = Vec::with_capacity(rows.len());
        for row in rows {
            let student = Student::try_from(row)?;
            if query.matches(&student) {
                matching.push(student);
            }
        }
        Ok(matching)
    }

    fn list_grades(&self) -> Result<Vec<i32>> {
        let mut conn = get_connection(&self.pool)?;
        let grades = students
            .select(grade)
            .load::<i32>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(grades)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, write_actor::spawn_writer};
    use chrono::NaiveDate;
    use school_health_core::students::{BloodType, Gender};
    use tempfile::tempdir;

    async fn create_test_repository() -> (StudentRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        (StudentRepository::new(pool, writer), temp_dir)
    }

    fn fields(first: &str, last: &str, grade_value: i32) -> StudentFields {
        StudentFields {
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2013, 5, 14).unwrap(),
            gender: Gender::Female,
            grade: grade_value,
            blood_type: Some(BloodType::ONegative),
            father_name: None,
            mother_name: Some("Efua".to_string()),
            contact_number: None,
            address: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let (repo, _temp_dir) = create_test_repository().await;
        let created = repo.create(fields("Ama", "Owusu", 4)).await.unwrap();

        assert!(!created.id.is_empty());
        let fetched = repo.get_by_id(&created.id).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.blood_type, Some(BloodType::ONegative));
    }

    #[tokio::test]
    async fn test_get_missing_student_is_not_found() {
        let (repo, _temp_dir) = create_test_repository().await;
        let err = repo.get_by_id("missing").unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_clears_optional_fields() {
        let (repo, _temp_dir) = create_test_repository().await;
        let created = repo.create(fields("Ama", "Owusu", 4)).await.unwrap();

        let patch = StudentPatch {
            grade: Some(5),
            mother_name: Some(None),
            ..Default::default()
        };
        let updated = repo.update(&created.id, patch).await.unwrap();
        assert_eq!(updated.grade, 5);
        assert_eq!(updated.mother_name, None);
        assert_eq!(updated.first_name, "Ama");
        assert!(updated.updated_at >= created.updated_at);

        let fetched = repo.get_by_id(&created.id).unwrap();
        assert_eq!(fetched.mother_name, None);
    }

    #[tokio::test]
    async fn test_update_missing_student_is_not_found() {
        let (repo, _temp_dir) = create_test_repository().await;
        let patch = StudentPatch {
            grade: Some(5),
            ..Default::default()
        };
        assert!(repo.update("missing", patch).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_filters_and_sorts() {
        let (repo, _temp_dir) = create_test_repository().await;
        repo.create(fields("Kwame", "Boateng", 3)).await.unwrap();
        repo.create(fields("ama", "Owusu", 3)).await.unwrap();
        repo.create(fields("Yaw", "Mensah", 7)).await.unwrap();

        let all = repo.list(&StudentQuery::default()).unwrap();
        let names: Vec<&str> = all.iter().map(|s| s.first_name.as_str()).collect();
        assert_eq!(names, vec!["ama", "Kwame", "Yaw"]);

        let grade_three = repo
            .list(&StudentQuery {
                grade: Some(3),
                sort: StudentSortField::LastName,
                ..Default::default()
            })
            .unwrap();
        let last_names: Vec<&str> = grade_three.iter().map(|s| s.last_name.as_str()).collect();
        assert_eq!(last_names, vec!["Boateng", "Owusu"]);

        let by_grade_desc = repo
            .list(&StudentQuery {
                sort: StudentSortField::Grade,
                descending: true,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_grade_desc[0].first_name, "Yaw");
    }

    #[tokio::test]
    async fn test_search_matches_full_name_case_insensitively() {
        let (repo, _temp_dir) = create_test_repository().await;
        repo.create(fields("Ama", "Owusu", 3)).await.unwrap();
        repo.create(fields("Kwame", "Boateng", 3)).await.unwrap();

        let hits = repo
            .list(&StudentQuery {
                search: Some("MA OW".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].last_name, "Owusu");

        let literal = repo
            .list(&StudentQuery {
                search: Some("%".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(literal.is_empty());
    }

    #[tokio::test]
    async fn test_search_folds_non_ascii_case() {
        let (repo, _temp_dir) = create_test_repository().await;
        repo.create(fields("Élodie", "Ørsted", 5)).await.unwrap();
        repo.create(fields("Elodie", "Mensah", 5)).await.unwrap();

        for term in ["Élodie Ø", "élodie", "ÉLODIE", "ørsted"] {
            let hits = repo
                .list(&StudentQuery {
                    search: Some(term.to_string()),
                    ..Default::default()
                })
                .unwrap();
            assert_eq!(hits.len(), 1, "search term {term:?}");
            assert_eq!(hits[0].last_name, "Ørsted");
        }

        let in_grade = repo
            .list(&StudentQuery {
                search: Some("ÉLO".to_string()),
                grade: Some(6),
                ..Default::default()
            })
            .unwrap();
        assert!(in_grade.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_student_is_not_found() {
        let (repo, _temp_dir) = create_test_repository().await;
        assert!(repo.delete("missing").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_grades_returns_every_student() {
        let (repo, _temp_dir) = create_test_repository().await;
        for (first, grade_value) in [("A", 0), ("B", 1), ("C", 1), ("D", 12)] {
            repo.create(fields(first, "Test", grade_value)).await.unwrap();
        }
        let mut grades = repo.list_grades().unwrap();
        grades.sort();
        assert_eq!(grades, vec![0, 1, 1, 12]);
    }
}
