use crate::model::{QuestionId, SubjectId, SubtopicId};

/// A single interview question with its markdown answer.
///
/// Read-only reference data; the only per-user state attached to a question
/// lives in `ProgressRecord`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub subtopic_id: SubtopicId,
    pub subject_id: SubjectId,
    pub question_text: String,
    /// Markdown body rendered by the client.
    pub answer_text: String,
}

impl Question {
    #[must_use]
    pub fn new(
        id: QuestionId,
        subtopic_id: SubtopicId,
        subject_id: SubjectId,
        question_text: impl Into<String>,
        answer_text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            subtopic_id,
            subject_id,
            question_text: question_text.into(),
            answer_text: answer_text.into(),
        }
    }
}
