use std::sync::Arc;

use prep_core::model::{Question, Subject, SubjectId, Subtopic};
use storage::CatalogRepository;

use crate::error::CatalogError;

/// One accordion section: a subtopic with its questions in catalog order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubtopicQuestions {
    pub subtopic: Subtopic,
    pub questions: Vec<Question>,
}

/// Read-only catalog queries the views render from.
///
/// Also the authority on subject cardinality: `question_total` supplies the
/// denominator that `ProgressService::get_progress` expects.
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog }
    }

    /// All subjects, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` when the remote read fails.
    pub async fn list_subjects(&self) -> Result<Vec<Subject>, CatalogError> {
        Ok(self.catalog.list_subjects().await?)
    }

    /// Look up one subject by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownSubject` when no subject has the id.
    pub async fn get_subject(&self, subject_id: SubjectId) -> Result<Subject, CatalogError> {
        self.catalog
            .list_subjects()
            .await?
            .into_iter()
            .find(|s| s.id == subject_id)
            .ok_or(CatalogError::UnknownSubject(subject_id))
    }

    /// The subject's questions grouped by subtopic, preserving subtopic
    /// order. Questions whose subtopic is missing from the catalog are
    /// dropped rather than surfaced in a phantom group.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` when a remote read fails.
    pub async fn subject_outline(
        &self,
        subject_id: SubjectId,
    ) -> Result<Vec<SubtopicQuestions>, CatalogError> {
        let subtopics = self.catalog.list_subtopics(subject_id).await?;
        let mut questions = self.catalog.list_questions(subject_id).await?;

        let mut outline: Vec<SubtopicQuestions> = subtopics
            .into_iter()
            .map(|subtopic| SubtopicQuestions {
                subtopic,
                questions: Vec::new(),
            })
            .collect();

        for question in questions.drain(..) {
            if let Some(section) = outline
                .iter_mut()
                .find(|s| s.subtopic.id == question.subtopic_id)
            {
                section.questions.push(question);
            }
        }

        Ok(outline)
    }

    /// Total number of questions under a subject; the progress denominator.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` when the remote read fails.
    pub async fn question_total(&self, subject_id: SubjectId) -> Result<u32, CatalogError> {
        let questions = self.catalog.list_questions(subject_id).await?;
        Ok(u32::try_from(questions.len()).unwrap_or(u32::MAX))
    }
}
