use chrono::Utc;
use log::debug;
use std::sync::Arc;

use super::health_records_model::{HealthRecordUpdate, HealthRecordView, NewHealthRecord};
use super::health_records_traits::{HealthRecordRepositoryTrait, HealthRecordServiceTrait};
use crate::errors::{Error, Result};

/// Service for managing health records
pub struct HealthRecordService {
    repository: Arc<dyn HealthRecordRepositoryTrait>,
}

impl HealthRecordService {
    pub fn new(repository: Arc<dyn HealthRecordRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl HealthRecordServiceTrait for HealthRecordService {
    async fn create_health_record(
        &self,
        new_record: NewHealthRecord,
    ) -> Result<HealthRecordView> {
        let fields = new_record.validate(Utc::now().naive_utc())?;
        debug!(
            "Creating {} record for student {}",
            fields.record_type, fields.student_id
        );
        let record = self.repository.create(fields).await?;
        Ok(HealthRecordView::from(record))
    }

    async fn update_health_record(
        &self,
        record_id: &str,
        update: HealthRecordUpdate,
    ) -> Result<HealthRecordView> {
        let patch = update.validate()?;
        let record = if patch.is_empty() {
            self.repository.get_by_id(record_id)?
        } else {
            debug!("Updating health record {}", record_id);
            self.repository.update(record_id, patch).await?
        };
        Ok(HealthRecordView::from(record))
    }

    async fn delete_health_record(&self, record_id: &str) -> Result<()> {
        let deleted = self.repository.delete(record_id).await?;
        if deleted == 0 {
            return Err(Error::not_found("Health record", record_id));
        }
        debug!("Deleted health record {}", record_id);
        Ok(())
    }

    fn get_health_record(&self, record_id: &str) -> Result<HealthRecordView> {
        self.repository.get_by_id(record_id).map(HealthRecordView::from)
    }

    fn list_health_records(&self) -> Result<Vec<HealthRecordView>> {
        Ok(self
            .repository
            .list()?
            .into_iter()
            .map(HealthRecordView::from)
            .collect())
    }

    fn list_student_health_records(&self, student_id: &str) -> Result<Vec<HealthRecordView>> {
        Ok(self
            .repository
            .list_by_student(student_id)?
            .into_iter()
            .map(HealthRecordView::from)
            .collect())
    }

    fn get_latest_health_record(&self, student_id: &str) -> Result<Option<HealthRecordView>> {
        Ok(self
            .repository
            .list_by_student(student_id)?
            .into_iter()
            .next()
            .map(HealthRecordView::from))
    }
}
