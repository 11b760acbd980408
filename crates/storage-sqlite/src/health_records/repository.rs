use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use school_health_core::errors::{Error, Result};
use school_health_core::health_records::{
    HealthRecord, HealthRecordFields, HealthRecordPatch, HealthRecordRepositoryTrait,
};

use super::model::HealthRecordDB;
use crate::db::{get_connection, read_transaction, WriteHandle};
use crate::errors::StorageError;
use crate::schema::health_records;
use crate::schema::health_records::dsl::*;
use crate::schema::students;
use crate::students::student_exists;

pub struct HealthRecordRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl HealthRecordRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

fn ensure_student(conn: &mut SqliteConnection, owner_id: &str) -> Result<()> {
    if student_exists(conn, owner_id)? {
        Ok(())
    } else {
        Err(Error::not_found("Student", owner_id))
    }
}

fn into_records(rows: Vec<HealthRecordDB>) -> Result<Vec<HealthRecord>> {
    rows.into_iter().map(HealthRecord::try_from).collect()
}

#[async_trait]
impl HealthRecordRepositoryTrait for HealthRecordRepository {
    async fn create(&self, fields: HealthRecordFields) -> Result<HealthRecord> {
        let record_db =
            HealthRecordDB::from_fields(Uuid::new_v4().to_string(), fields, Utc::now().naive_utc());

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<HealthRecord> {
                ensure_student(conn, &record_db.student_id)?;
                let inserted = diesel::insert_into(health_records::table)
                    .values(&record_db)
                    .returning(HealthRecordDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                HealthRecord::try_from(inserted)
            })
            .await
    }

    async fn update(&self, record_id: &str, patch: HealthRecordPatch) -> Result<HealthRecord> {
        let record_id = record_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<HealthRecord> {
                let existing = health_records
                    .find(&record_id)
                    .select(HealthRecordDB::as_select())
                    .first::<HealthRecordDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| Error::not_found("Health record", &record_id))?;

                if let Some(new_owner) = &patch.student_id {
                    ensure_student(conn, new_owner)?;
                }

                let mut record = HealthRecord::try_from(existing)?;
                patch.apply_to(&mut record);
                record.updated_at = Utc::now().naive_utc();

                let record_db = HealthRecordDB::from(record);
                diesel::update(health_records.find(&record_id))
                    .set(&record_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                HealthRecord::try_from(record_db)
            })
            .await
    }

    async fn delete(&self, record_id: &str) -> Result<usize> {
        let record_id = record_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(health_records.find(record_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn get_by_id(&self, record_id: &str) -> Result<HealthRecord> {
        let mut conn = get_connection(&self.pool)?;
        let row = health_records
            .find(record_id)
            .select(HealthRecordDB::as_select())
            .first::<HealthRecordDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::not_found("Health record", record_id))?;
        HealthRecord::try_from(row)
    }

    fn list(&self) -> Result<Vec<HealthRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = health_records
            .select(HealthRecordDB::as_select())
            .order((record_date.desc(), created_at.desc(), id.asc()))
            .load::<HealthRecordDB>(&mut conn)
            .map_err(StorageError::from)?;
        into_records(rows)
    }

    fn list_by_student(&self, owner_id: &str) -> Result<Vec<HealthRecord>> {
        let rows = read_transaction(&self.pool, |conn| {
            ensure_student(conn, owner_id)?;
            let rows = health_records
                .filter(student_id.eq(owner_id))
                .select(HealthRecordDB::as_select())
                .order((record_date.desc(), created_at.desc(), id.asc()))
                .load::<HealthRecordDB>(conn)?;
            Ok(rows)
        })?;
        into_records(rows)
    }

    fn count_by_student(&self) -> Result<BTreeMap<String, usize>> {
        read_transaction(&self.pool, |conn| {
            let mut counts: BTreeMap<String, usize> = students::table
                .select(students::id)
                .load::<String>(conn)?
                .into_iter()
                .map(|owner| (owner, 0))
                .collect();

            let grouped = health_records
                .group_by(student_id)
                .select((student_id, count_star()))
                .load::<(String, i64)>(conn)?;

            for (owner, total) in grouped {
                counts.insert(owner, total as usize);
            }
            Ok(counts)
        })
    }
}
