use std::sync::Arc;

use tracing::warn;

use prep_core::model::{ProgressRecord, QuestionId, SubjectId, UserId};
use storage::ProgressRepository;

use crate::error::ProgressServiceError;
use crate::session_context::SessionContext;

/// Read model the views render: the completed set plus a percentage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressView {
    pub completed_question_ids: Vec<QuestionId>,
    pub progress_percent: u32,
}

impl ProgressView {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            completed_question_ids: Vec::new(),
            progress_percent: 0,
        }
    }

    fn from_record(record: &ProgressRecord, total_questions: u32) -> Self {
        Self {
            completed_question_ids: record.completed_ids(),
            progress_percent: record.percent_complete(total_questions),
        }
    }
}

/// Tracks which questions a user has read, per subject.
///
/// Mutations are deliberately non-optimistic: each mark/unmark writes the
/// full record and then re-reads it, so the returned aggregate is always the
/// store's acknowledged state and a failed write leaves nothing local
/// behind. The grid of per-question state has exactly two states, unread and
/// read, and only these two operations move between them.
#[derive(Clone)]
pub struct ProgressService {
    progress: Arc<dyn ProgressRepository>,
    session: SessionContext,
}

impl ProgressService {
    #[must_use]
    pub fn new(progress: Arc<dyn ProgressRepository>, session: SessionContext) -> Self {
        Self { progress, session }
    }

    /// Mark a question as read for the signed-in user.
    ///
    /// Idempotent: marking an already-read question changes nothing. With no
    /// signed-in user this is a silent no-op returning `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` when the remote read or write fails;
    /// the caller should keep showing its last authoritative state.
    pub async fn mark_read(
        &self,
        subject_id: SubjectId,
        question_id: QuestionId,
    ) -> Result<Option<ProgressRecord>, ProgressServiceError> {
        let Some(user) = self.session.current_user() else {
            return Ok(None);
        };
        self.mutate(user.id, subject_id, |record| record.mark(question_id))
            .await
            .map(Some)
    }

    /// Remove a question from the completed set.
    ///
    /// Unmarking an id that was never marked is a no-op, not an error, and
    /// the record itself is never deleted. Silent no-op when signed out.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` when the remote read or write fails.
    pub async fn unmark_question(
        &self,
        subject_id: SubjectId,
        question_id: QuestionId,
    ) -> Result<Option<ProgressRecord>, ProgressServiceError> {
        let Some(user) = self.session.current_user() else {
            return Ok(None);
        };
        self.mutate(user.id, subject_id, |record| record.unmark(question_id))
            .await
            .map(Some)
    }

    /// Fetch the authoritative progress view for a subject.
    ///
    /// `total_questions` comes from the caller (the catalog knows subject
    /// cardinality, this service does not); a total of zero yields zero
    /// percent. Signed-out callers get an empty view.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` when the remote read fails.
    pub async fn get_progress(
        &self,
        subject_id: SubjectId,
        total_questions: u32,
    ) -> Result<ProgressView, ProgressServiceError> {
        let Some(user) = self.session.current_user() else {
            return Ok(ProgressView::empty());
        };
        let record = self.fetch(user.id, subject_id).await?;
        Ok(ProgressView::from_record(&record, total_questions))
    }

    /// Read-modify-write-reread cycle shared by both mutations.
    ///
    /// `apply` reports whether it changed the set; a no-op (re-marking a read
    /// question, unmarking one that was never marked) skips the write
    /// entirely, so records really are created only on the first mark. The
    /// value returned after a write is the post-write re-fetch, never the
    /// locally mutated copy.
    async fn mutate(
        &self,
        user_id: UserId,
        subject_id: SubjectId,
        apply: impl FnOnce(&mut ProgressRecord) -> bool,
    ) -> Result<ProgressRecord, ProgressServiceError> {
        let mut record = self.fetch(user_id, subject_id).await?;
        if !apply(&mut record) {
            return Ok(record);
        }
        if let Err(err) = self.progress.upsert_progress(&record).await {
            warn!(%subject_id, error = %err, "progress write failed");
            return Err(err.into());
        }
        self.fetch(user_id, subject_id).await
    }

    async fn fetch(
        &self,
        user_id: UserId,
        subject_id: SubjectId,
    ) -> Result<ProgressRecord, ProgressServiceError> {
        let existing = self.progress.read_progress(user_id, subject_id).await?;
        Ok(existing.unwrap_or_else(|| ProgressRecord::new(user_id, subject_id)))
    }
}
