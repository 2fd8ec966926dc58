use async_trait::async_trait;
use prep_core::model::{ProgressRecord, SubjectId, UserId};

use super::RestStore;
use super::mapping::ProgressRow;
use crate::repository::{ProgressRepository, RemoteError};

#[async_trait]
impl ProgressRepository for RestStore {
    async fn read_progress(
        &self,
        user_id: UserId,
        subject_id: SubjectId,
    ) -> Result<Option<ProgressRecord>, RemoteError> {
        let filters = [
            ("user_id", format!("eq.{user_id}")),
            ("subject_id", format!("eq.{subject_id}")),
            ("select", "*".to_owned()),
        ];
        let mut rows: Vec<ProgressRow> = self.get_rows("progress", &filters).await?;
        Ok(rows.pop().map(ProgressRow::into_record))
    }

    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<(), RemoteError> {
        let row = ProgressRow::from_record(record);
        self.upsert_row("progress", &row).await
    }
}
