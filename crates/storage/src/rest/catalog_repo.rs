use async_trait::async_trait;
use prep_core::model::{Question, Subject, SubjectId, Subtopic};

use super::RestStore;
use super::mapping::{QuestionRow, SubjectRow, SubtopicRow};
use crate::repository::{CatalogRepository, RemoteError};

#[async_trait]
impl CatalogRepository for RestStore {
    async fn list_subjects(&self) -> Result<Vec<Subject>, RemoteError> {
        let filters = [
            ("select", "*".to_owned()),
            ("order", "id.asc".to_owned()),
        ];
        let rows: Vec<SubjectRow> = self.get_rows("subjects", &filters).await?;
        Ok(rows.into_iter().map(SubjectRow::into_subject).collect())
    }

    async fn list_subtopics(&self, subject_id: SubjectId) -> Result<Vec<Subtopic>, RemoteError> {
        let filters = [
            ("subject_id", format!("eq.{subject_id}")),
            ("select", "*".to_owned()),
            ("order", "id.asc".to_owned()),
        ];
        let rows: Vec<SubtopicRow> = self.get_rows("subtopics", &filters).await?;
        Ok(rows.into_iter().map(SubtopicRow::into_subtopic).collect())
    }

    async fn list_questions(&self, subject_id: SubjectId) -> Result<Vec<Question>, RemoteError> {
        let filters = [
            ("subject_id", format!("eq.{subject_id}")),
            ("select", "*".to_owned()),
            ("order", "id.asc".to_owned()),
        ];
        let rows: Vec<QuestionRow> = self.get_rows("questions", &filters).await?;
        Ok(rows.into_iter().map(QuestionRow::into_question).collect())
    }
}
