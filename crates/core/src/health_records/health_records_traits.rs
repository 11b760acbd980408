//! Health record repository and service traits.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::health_records_model::{
    HealthRecord, HealthRecordFields, HealthRecordPatch, HealthRecordUpdate, HealthRecordView,
    NewHealthRecord,
};
use crate::errors::Result;

/// Trait defining the contract for HealthRecord repository operations.
///
/// Listings are ordered by record date descending, newest creation first on ties.
#[async_trait]
pub trait HealthRecordRepositoryTrait: Send + Sync {
    /// Inserts a record for an existing student.
    ///
    /// The owner lookup and the insert share one transaction; a missing
    /// student yields `NotFound` and nothing is written.
    async fn create(&self, fields: HealthRecordFields) -> Result<HealthRecord>;

    /// Applies a patch. Fails with `NotFound` if the record is missing, or if
    /// the patch moves the record to a student that does not exist.
    async fn update(&self, record_id: &str, patch: HealthRecordPatch) -> Result<HealthRecord>;

    /// Deletes one record and returns the number of deleted rows.
    async fn delete(&self, record_id: &str) -> Result<usize>;

    fn get_by_id(&self, record_id: &str) -> Result<HealthRecord>;

    fn list(&self) -> Result<Vec<HealthRecord>>;

    /// Records of one student. Fails with `NotFound` if the student does not exist.
    fn list_by_student(&self, student_id: &str) -> Result<Vec<HealthRecord>>;

    /// Number of records per student id, including students with none.
    ///
    /// Computed from a single snapshot of both tables.
    fn count_by_student(&self) -> Result<BTreeMap<String, usize>>;
}

/// Trait defining the contract for HealthRecord service operations.
///
/// Every read returns a [`HealthRecordView`] carrying a freshly computed BMI.
#[async_trait]
pub trait HealthRecordServiceTrait: Send + Sync {
    async fn create_health_record(&self, new_record: NewHealthRecord)
        -> Result<HealthRecordView>;

    async fn update_health_record(
        &self,
        record_id: &str,
        update: HealthRecordUpdate,
    ) -> Result<HealthRecordView>;

    async fn delete_health_record(&self, record_id: &str) -> Result<()>;

    fn get_health_record(&self, record_id: &str) -> Result<HealthRecordView>;

    fn list_health_records(&self) -> Result<Vec<HealthRecordView>>;

    fn list_student_health_records(&self, student_id: &str) -> Result<Vec<HealthRecordView>>;

    /// Most recent record of a student, if any.
    fn get_latest_health_record(&self, student_id: &str) -> Result<Option<HealthRecordView>>;
}
