use serde::{Deserialize, Serialize};

use crate::model::SubjectId;

/// Closed set of glyph tags a subject can carry.
///
/// Subjects store a free-form tag string; unknown or missing tags resolve to
/// `Book` so the catalog never fails to render over a bad tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectIcon {
    Server,
    Database,
    Network,
    Workflow,
    Cpu,
    Code2,
    Terminal,
    Lock,
    Cloud,
    GitBranch,
    #[default]
    Book,
}

impl SubjectIcon {
    /// Resolves a stored tag to an icon, case-insensitively.
    ///
    /// Never fails: anything unrecognized maps to the `Book` fallback.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "server" => Self::Server,
            "database" => Self::Database,
            "network" => Self::Network,
            "workflow" => Self::Workflow,
            "cpu" => Self::Cpu,
            "code2" => Self::Code2,
            "terminal" => Self::Terminal,
            "lock" => Self::Lock,
            "cloud" => Self::Cloud,
            "gitbranch" => Self::GitBranch,
            _ => Self::Book,
        }
    }

    /// The canonical tag string for this icon.
    #[must_use]
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Database => "database",
            Self::Network => "network",
            Self::Workflow => "workflow",
            Self::Cpu => "cpu",
            Self::Code2 => "code2",
            Self::Terminal => "terminal",
            Self::Lock => "lock",
            Self::Cloud => "cloud",
            Self::GitBranch => "gitbranch",
            Self::Book => "book",
        }
    }
}

/// A study subject, e.g. "Operating Systems".
///
/// Read-only reference data from the catalog; `question_count` is the
/// denominator for progress percentages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub icon: SubjectIcon,
    pub description: String,
    pub question_count: u32,
}

impl Subject {
    #[must_use]
    pub fn new(
        id: SubjectId,
        name: impl Into<String>,
        icon: SubjectIcon,
        description: impl Into<String>,
        question_count: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            icon,
            description: description.into(),
            question_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_resolve() {
        assert_eq!(SubjectIcon::from_tag("server"), SubjectIcon::Server);
        assert_eq!(SubjectIcon::from_tag("GitBranch"), SubjectIcon::GitBranch);
        assert_eq!(SubjectIcon::from_tag("  cpu "), SubjectIcon::Cpu);
    }

    #[test]
    fn unknown_tag_falls_back_to_book() {
        assert_eq!(SubjectIcon::from_tag("satellite"), SubjectIcon::Book);
        assert_eq!(SubjectIcon::from_tag(""), SubjectIcon::Book);
    }

    #[test]
    fn tag_roundtrip() {
        for icon in [
            SubjectIcon::Server,
            SubjectIcon::Database,
            SubjectIcon::Terminal,
            SubjectIcon::Book,
        ] {
            assert_eq!(SubjectIcon::from_tag(icon.as_tag()), icon);
        }
    }
}
