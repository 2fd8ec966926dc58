use crate::model::{SubjectId, SubtopicId};

/// A named grouping of questions inside a subject, e.g. "CPU Scheduling".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subtopic {
    pub id: SubtopicId,
    pub subject_id: SubjectId,
    pub name: String,
}

impl Subtopic {
    #[must_use]
    pub fn new(id: SubtopicId, subject_id: SubjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            subject_id,
            name: name.into(),
        }
    }
}
