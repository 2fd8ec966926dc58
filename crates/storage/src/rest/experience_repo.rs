use async_trait::async_trait;
use prep_core::model::InterviewExperience;

use super::RestStore;
use super::mapping::ExperienceRow;
use crate::repository::{ExperienceRepository, RemoteError};

#[async_trait]
impl ExperienceRepository for RestStore {
    async fn insert_experience(
        &self,
        experience: &InterviewExperience,
    ) -> Result<InterviewExperience, RemoteError> {
        let body = ExperienceRow::from_domain(experience);
        let stored: ExperienceRow = self.insert_row("interview_experiences", &body).await?;
        stored.into_domain()
    }

    async fn list_public(&self) -> Result<Vec<InterviewExperience>, RemoteError> {
        let filters = [
            ("is_public", "eq.true".to_owned()),
            ("select", "*".to_owned()),
            ("order", "created_at.desc".to_owned()),
        ];
        let rows: Vec<ExperienceRow> = self.get_rows("interview_experiences", &filters).await?;
        rows.into_iter().map(ExperienceRow::into_domain).collect()
    }
}
