use async_trait::async_trait;
use prep_core::model::{
    InterviewExperience, ProgressRecord, Question, Subject, SubjectId, Subtopic, User, UserId,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by remote-store adapters.
///
/// Expected absences (no record yet, no active session) are `Option::None`
/// on the read contracts, not errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RemoteError {
    #[error("not found")]
    NotFound,

    #[error("unauthorized")]
    Unauthorized,

    #[error("remote call failed with status {0}")]
    Status(u16),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Contract for the per-(user, subject) progress rows.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the progress record for a user/subject pair.
    ///
    /// Returns `Ok(None)` when no record exists yet; records are created
    /// lazily on the first mark.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the remote read fails.
    async fn read_progress(
        &self,
        user_id: UserId,
        subject_id: SubjectId,
    ) -> Result<Option<ProgressRecord>, RemoteError>;

    /// Persist a progress record, replacing any existing row for the pair.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the remote write fails. The caller must not
    /// treat the write as applied in that case.
    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<(), RemoteError>;
}

/// Contract for the auth provider's current-session lookup.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Fetch the profile attached to the live session.
    ///
    /// Returns `Ok(None)` when no session is active.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` for transport failures, which are distinct from
    /// the "no session" case.
    async fn read_session(&self) -> Result<Option<User>, RemoteError>;
}

/// Contract for the read-only catalog: subjects, subtopics, questions.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// List all subjects.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the remote read fails.
    async fn list_subjects(&self) -> Result<Vec<Subject>, RemoteError>;

    /// List the subtopics of a subject, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the remote read fails.
    async fn list_subtopics(&self, subject_id: SubjectId) -> Result<Vec<Subtopic>, RemoteError>;

    /// List every question under a subject.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the remote read fails.
    async fn list_questions(&self, subject_id: SubjectId) -> Result<Vec<Question>, RemoteError>;
}

/// Contract for interview-experience rows.
#[async_trait]
pub trait ExperienceRepository: Send + Sync {
    /// Insert a validated experience and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the insert fails.
    async fn insert_experience(
        &self,
        experience: &InterviewExperience,
    ) -> Result<InterviewExperience, RemoteError>;

    /// List experiences whose authors opted into public sharing.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the remote read fails.
    async fn list_public(&self) -> Result<Vec<InterviewExperience>, RemoteError>;
}

/// In-memory store for tests and prototyping.
///
/// Seed the catalog and session through the helper methods, then hand the
/// same instance to every trait consumer.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    session: Arc<Mutex<Option<User>>>,
    progress: Arc<Mutex<HashMap<(UserId, SubjectId), ProgressRecord>>>,
    subjects: Arc<Mutex<Vec<Subject>>>,
    subtopics: Arc<Mutex<Vec<Subtopic>>>,
    questions: Arc<Mutex<Vec<Question>>>,
    experiences: Arc<Mutex<Vec<InterviewExperience>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active session; `None` simulates a signed-out state.
    pub fn set_session(&self, user: Option<User>) {
        if let Ok(mut guard) = self.session.lock() {
            *guard = user;
        }
    }

    pub fn seed_subject(&self, subject: Subject) {
        if let Ok(mut guard) = self.subjects.lock() {
            guard.push(subject);
        }
    }

    pub fn seed_subtopic(&self, subtopic: Subtopic) {
        if let Ok(mut guard) = self.subtopics.lock() {
            guard.push(subtopic);
        }
    }

    pub fn seed_question(&self, question: Question) {
        if let Ok(mut guard) = self.questions.lock() {
            guard.push(question);
        }
    }
}

#[async_trait]
impl ProgressRepository for InMemoryStore {
    async fn read_progress(
        &self,
        user_id: UserId,
        subject_id: SubjectId,
    ) -> Result<Option<ProgressRecord>, RemoteError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| RemoteError::Connection(e.to_string()))?;
        Ok(guard.get(&(user_id, subject_id)).cloned())
    }

    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<(), RemoteError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| RemoteError::Connection(e.to_string()))?;
        guard.insert((record.user_id, record.subject_id), record.clone());
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn read_session(&self) -> Result<Option<User>, RemoteError> {
        let guard = self
            .session
            .lock()
            .map_err(|e| RemoteError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryStore {
    async fn list_subjects(&self) -> Result<Vec<Subject>, RemoteError> {
        let guard = self
            .subjects
            .lock()
            .map_err(|e| RemoteError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn list_subtopics(&self, subject_id: SubjectId) -> Result<Vec<Subtopic>, RemoteError> {
        let guard = self
            .subtopics
            .lock()
            .map_err(|e| RemoteError::Connection(e.to_string()))?;
        Ok(guard
            .iter()
            .filter(|s| s.subject_id == subject_id)
            .cloned()
            .collect())
    }

    async fn list_questions(&self, subject_id: SubjectId) -> Result<Vec<Question>, RemoteError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| RemoteError::Connection(e.to_string()))?;
        Ok(guard
            .iter()
            .filter(|q| q.subject_id == subject_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ExperienceRepository for InMemoryStore {
    async fn insert_experience(
        &self,
        experience: &InterviewExperience,
    ) -> Result<InterviewExperience, RemoteError> {
        let mut guard = self
            .experiences
            .lock()
            .map_err(|e| RemoteError::Connection(e.to_string()))?;
        guard.push(experience.clone());
        Ok(experience.clone())
    }

    async fn list_public(&self) -> Result<Vec<InterviewExperience>, RemoteError> {
        let guard = self
            .experiences
            .lock()
            .map_err(|e| RemoteError::Connection(e.to_string()))?;
        Ok(guard.iter().filter(|e| e.is_public).cloned().collect())
    }
}

/// Aggregates the remote-store contracts behind trait objects so backends
/// can be swapped per environment (REST in the app, in-memory in tests).
#[derive(Clone)]
pub struct RemoteStore {
    pub progress: Arc<dyn ProgressRepository>,
    pub session: Arc<dyn SessionRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub experiences: Arc<dyn ExperienceRepository>,
}

impl RemoteStore {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(InMemoryStore::new())
    }

    /// Wrap an existing in-memory store, keeping the handle for seeding.
    #[must_use]
    pub fn from_in_memory(store: InMemoryStore) -> Self {
        let progress: Arc<dyn ProgressRepository> = Arc::new(store.clone());
        let session: Arc<dyn SessionRepository> = Arc::new(store.clone());
        let catalog: Arc<dyn CatalogRepository> = Arc::new(store.clone());
        let experiences: Arc<dyn ExperienceRepository> = Arc::new(store);
        Self {
            progress,
            session,
            catalog,
            experiences,
        }
    }

    /// Build a store backed by the hosted REST backend.
    ///
    /// # Errors
    ///
    /// Returns `RestInitError` if the configuration is unusable.
    pub fn rest(config: crate::rest::RestConfig) -> Result<Self, crate::rest::RestInitError> {
        let store = crate::rest::RestStore::new(config)?;
        let progress: Arc<dyn ProgressRepository> = Arc::new(store.clone());
        let session: Arc<dyn SessionRepository> = Arc::new(store.clone());
        let catalog: Arc<dyn CatalogRepository> = Arc::new(store.clone());
        let experiences: Arc<dyn ExperienceRepository> = Arc::new(store);
        Ok(Self {
            progress,
            session,
            catalog,
            experiences,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::model::{ProgressRecord, QuestionId};
    use uuid::Uuid;

    #[tokio::test]
    async fn progress_round_trip() {
        let store = InMemoryStore::new();
        let user = UserId::new(Uuid::new_v4());
        let subject = SubjectId::new(1);

        assert!(store.read_progress(user, subject).await.unwrap().is_none());

        let mut record = ProgressRecord::new(user, subject);
        record.mark(QuestionId::new(101));
        store.upsert_progress(&record).await.unwrap();

        let fetched = store.read_progress(user, subject).await.unwrap().unwrap();
        assert!(fetched.is_completed(QuestionId::new(101)));
    }

    #[tokio::test]
    async fn upsert_replaces_existing_row() {
        let store = InMemoryStore::new();
        let user = UserId::new(Uuid::new_v4());
        let subject = SubjectId::new(2);

        let mut record = ProgressRecord::new(user, subject);
        record.mark(QuestionId::new(1));
        store.upsert_progress(&record).await.unwrap();

        record.unmark(QuestionId::new(1));
        store.upsert_progress(&record).await.unwrap();

        let fetched = store.read_progress(user, subject).await.unwrap().unwrap();
        assert_eq!(fetched.completed_count(), 0);
    }

    #[tokio::test]
    async fn session_defaults_to_signed_out() {
        let store = InMemoryStore::new();
        assert!(store.read_session().await.unwrap().is_none());
    }
}
