mod experience;
mod ids;
mod progress;
mod question;
mod subject;
mod subtopic;
mod user;

pub use experience::{ExperienceDraft, ExperienceError, InterviewExperience};
pub use ids::{ExperienceId, ParseIdError, QuestionId, SubjectId, SubtopicId, UserId};
pub use progress::ProgressRecord;
pub use question::Question;
pub use subject::{Subject, SubjectIcon};
pub use subtopic::Subtopic;
pub use user::{User, UserRole};
