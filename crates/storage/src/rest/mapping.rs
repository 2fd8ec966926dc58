//! Wire rows for the hosted backend's tables and their conversions to the
//! domain model. Kept separate so protocol shape changes stay out of the
//! repository logic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use prep_core::model::{
    ExperienceId, InterviewExperience, ProgressRecord, Question, QuestionId, Subject, SubjectIcon,
    SubjectId, Subtopic, SubtopicId, User, UserId, UserRole,
};

use crate::repository::RemoteError;

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProgressRow {
    pub user_id: Uuid,
    pub subject_id: u64,
    pub completed_questions: Vec<u64>,
}

impl ProgressRow {
    pub fn from_record(record: &ProgressRecord) -> Self {
        Self {
            user_id: record.user_id.value(),
            subject_id: record.subject_id.value(),
            completed_questions: record.completed_ids().iter().map(|q| q.value()).collect(),
        }
    }

    pub fn into_record(self) -> ProgressRecord {
        ProgressRecord::from_completed(
            UserId::new(self.user_id),
            SubjectId::new(self.subject_id),
            self.completed_questions.into_iter().map(QuestionId::new),
        )
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubjectRow {
    pub id: u64,
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub question_count: Option<u32>,
}

impl SubjectRow {
    pub fn into_subject(self) -> Subject {
        let icon = self
            .icon
            .as_deref()
            .map_or(SubjectIcon::Book, SubjectIcon::from_tag);
        Subject::new(
            SubjectId::new(self.id),
            self.name,
            icon,
            self.description.unwrap_or_default(),
            self.question_count.unwrap_or(0),
        )
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubtopicRow {
    pub id: u64,
    pub subject_id: u64,
    pub name: String,
}

impl SubtopicRow {
    pub fn into_subtopic(self) -> Subtopic {
        Subtopic::new(
            SubtopicId::new(self.id),
            SubjectId::new(self.subject_id),
            self.name,
        )
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionRow {
    pub id: u64,
    pub subtopic_id: u64,
    pub subject_id: u64,
    pub question_text: String,
    pub answer_text: String,
}

impl QuestionRow {
    pub fn into_question(self) -> Question {
        Question::new(
            QuestionId::new(self.id),
            SubtopicId::new(self.subtopic_id),
            SubjectId::new(self.subject_id),
            self.question_text,
            self.answer_text,
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ExperienceRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_name: String,
    pub role: String,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub content: String,
    pub offer_type: String,
    pub opportunity_type: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

impl ExperienceRow {
    pub fn from_domain(experience: &InterviewExperience) -> Self {
        Self {
            id: experience.id.value(),
            user_id: experience.user_id.value(),
            company_name: experience.company_name.clone(),
            role: experience.role.clone(),
            linkedin_url: experience.linkedin_url.as_ref().map(Url::to_string),
            github_url: experience.github_url.as_ref().map(Url::to_string),
            content: experience.content.clone(),
            offer_type: experience.offer_type.clone(),
            opportunity_type: experience.opportunity_type.clone(),
            is_public: experience.is_public,
            created_at: experience.created_at,
        }
    }

    pub fn into_domain(self) -> Result<InterviewExperience, RemoteError> {
        Ok(InterviewExperience {
            id: ExperienceId::new(self.id),
            user_id: UserId::new(self.user_id),
            company_name: self.company_name,
            role: self.role,
            linkedin_url: parse_stored_link(self.linkedin_url)?,
            github_url: parse_stored_link(self.github_url)?,
            content: self.content,
            offer_type: self.offer_type,
            opportunity_type: self.opportunity_type,
            is_public: self.is_public,
            created_at: self.created_at,
        })
    }
}

fn parse_stored_link(raw: Option<String>) -> Result<Option<Url>, RemoteError> {
    raw.map(|s| Url::parse(&s))
        .transpose()
        .map_err(|e| RemoteError::Serialization(e.to_string()))
}

/// Profile payload from the auth provider's session endpoint.
///
/// The provider's own `role` field is a session marker, not an application
/// role, so it is ignored; the app role lives in the profile metadata.
#[derive(Debug, Deserialize)]
pub(crate) struct SessionUserRow {
    pub id: Uuid,
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: SessionUserMetadata,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SessionUserMetadata {
    pub name: Option<String>,
    pub profile_photo: Option<String>,
    pub role: Option<String>,
}

impl SessionUserRow {
    pub fn into_user(self) -> User {
        let role = match self.user_metadata.role.as_deref() {
            Some("admin") => UserRole::Admin,
            _ => UserRole::Member,
        };
        User {
            id: UserId::new(self.id),
            name: self.user_metadata.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            profile_photo: self.user_metadata.profile_photo,
            role,
        }
    }
}
