use chrono::{DateTime, Utc};
use thiserror::Error;
use url::Url;

use crate::model::{ExperienceId, UserId};

/// Validation failures for a submitted experience draft.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExperienceError {
    #[error("company name must not be empty")]
    EmptyCompany,
    #[error("role must not be empty")]
    EmptyRole,
    #[error("experience content must not be empty")]
    EmptyContent,
    #[error("invalid {field} link: {source}")]
    InvalidLink {
        field: &'static str,
        source: url::ParseError,
    },
}

/// Raw form input for an interview experience, before validation.
///
/// Link fields are free strings as typed; `validate` parses them into real
/// URLs. Experiences default to private until the author opts in.
#[derive(Clone, Debug, Default)]
pub struct ExperienceDraft {
    pub company_name: String,
    pub role: String,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    /// Markdown body.
    pub content: String,
    pub offer_type: String,
    pub opportunity_type: String,
    pub is_public: bool,
}

impl ExperienceDraft {
    /// Validates the draft and stamps it into a persistable record.
    ///
    /// # Errors
    ///
    /// Returns `ExperienceError` when company, role, or content are blank, or
    /// when a provided link fails to parse.
    pub fn validate(
        self,
        id: ExperienceId,
        user_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<InterviewExperience, ExperienceError> {
        if self.company_name.trim().is_empty() {
            return Err(ExperienceError::EmptyCompany);
        }
        if self.role.trim().is_empty() {
            return Err(ExperienceError::EmptyRole);
        }
        if self.content.trim().is_empty() {
            return Err(ExperienceError::EmptyContent);
        }

        let linkedin_url = parse_link(self.linkedin_url, "linkedin")?;
        let github_url = parse_link(self.github_url, "github")?;

        Ok(InterviewExperience {
            id,
            user_id,
            company_name: self.company_name.trim().to_owned(),
            role: self.role.trim().to_owned(),
            linkedin_url,
            github_url,
            content: self.content,
            offer_type: self.offer_type,
            opportunity_type: self.opportunity_type,
            is_public: self.is_public,
            created_at,
        })
    }
}

fn parse_link(raw: Option<String>, field: &'static str) -> Result<Option<Url>, ExperienceError> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => Url::parse(s.trim())
            .map(Some)
            .map_err(|source| ExperienceError::InvalidLink { field, source }),
    }
}

/// A validated interview experience, written once via form submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterviewExperience {
    pub id: ExperienceId,
    pub user_id: UserId,
    pub company_name: String,
    pub role: String,
    pub linkedin_url: Option<Url>,
    pub github_url: Option<Url>,
    pub content: String,
    pub offer_type: String,
    pub opportunity_type: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use uuid::Uuid;

    fn draft() -> ExperienceDraft {
        ExperienceDraft {
            company_name: "Acme".into(),
            role: "Backend Engineer".into(),
            content: "Three rounds, mostly systems design.".into(),
            offer_type: "full-time".into(),
            opportunity_type: "on-campus".into(),
            ..ExperienceDraft::default()
        }
    }

    fn ids() -> (ExperienceId, UserId) {
        (ExperienceId::generate(), UserId::new(Uuid::new_v4()))
    }

    #[test]
    fn valid_draft_passes() {
        let (id, user) = ids();
        let exp = draft().validate(id, user, fixed_now()).unwrap();
        assert_eq!(exp.company_name, "Acme");
        assert!(!exp.is_public);
    }

    #[test]
    fn blank_company_is_rejected() {
        let (id, user) = ids();
        let mut d = draft();
        d.company_name = "   ".into();
        assert_eq!(
            d.validate(id, user, fixed_now()),
            Err(ExperienceError::EmptyCompany)
        );
    }

    #[test]
    fn empty_link_is_treated_as_absent() {
        let (id, user) = ids();
        let mut d = draft();
        d.github_url = Some(String::new());
        let exp = d.validate(id, user, fixed_now()).unwrap();
        assert!(exp.github_url.is_none());
    }

    #[test]
    fn malformed_link_is_rejected() {
        let (id, user) = ids();
        let mut d = draft();
        d.linkedin_url = Some("not a url".into());
        assert!(matches!(
            d.validate(id, user, fixed_now()),
            Err(ExperienceError::InvalidLink { field: "linkedin", .. })
        ));
    }

    #[test]
    fn valid_links_are_parsed() {
        let (id, user) = ids();
        let mut d = draft();
        d.github_url = Some("https://github.com/someone".into());
        let exp = d.validate(id, user, fixed_now()).unwrap();
        assert_eq!(
            exp.github_url.unwrap().as_str(),
            "https://github.com/someone"
        );
    }
}
