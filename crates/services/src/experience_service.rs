use std::sync::Arc;

use tracing::warn;

use prep_core::Clock;
use prep_core::model::{ExperienceDraft, ExperienceId, InterviewExperience};
use storage::ExperienceRepository;

use crate::error::ExperienceServiceError;
use crate::session_context::SessionContext;

/// Handles interview-experience submissions and the public listing.
///
/// Unlike progress marks, submitting while signed out is a hard error: the
/// form flow requires login, so a missing session here is a caller bug the
/// user should see.
#[derive(Clone)]
pub struct ExperienceService {
    experiences: Arc<dyn ExperienceRepository>,
    session: SessionContext,
    clock: Clock,
}

impl ExperienceService {
    #[must_use]
    pub fn new(
        experiences: Arc<dyn ExperienceRepository>,
        session: SessionContext,
        clock: Clock,
    ) -> Self {
        Self {
            experiences,
            session,
            clock,
        }
    }

    /// Validate and store a draft for the signed-in user, returning the
    /// stored row.
    ///
    /// # Errors
    ///
    /// Returns `NotSignedIn` without a session, `Invalid` for validation
    /// failures, and `Remote` if the insert fails.
    pub async fn submit(
        &self,
        draft: ExperienceDraft,
    ) -> Result<InterviewExperience, ExperienceServiceError> {
        let user = self
            .session
            .current_user()
            .ok_or(ExperienceServiceError::NotSignedIn)?;

        let experience = draft.validate(ExperienceId::generate(), user.id, self.clock.now())?;

        match self.experiences.insert_experience(&experience).await {
            Ok(stored) => Ok(stored),
            Err(err) => {
                warn!(error = %err, "experience insert failed");
                Err(err.into())
            }
        }
    }

    /// Experiences shared publicly, newest first per the store's ordering.
    ///
    /// # Errors
    ///
    /// Returns `Remote` when the listing fails.
    pub async fn list_public(&self) -> Result<Vec<InterviewExperience>, ExperienceServiceError> {
        Ok(self.experiences.list_public().await?)
    }
}
