#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_service;
pub mod error;
pub mod experience_service;
pub mod guard;
pub mod progress_service;
pub mod session_context;

pub use prep_core::Clock;

pub use app_services::AppServices;
pub use catalog_service::{CatalogService, SubtopicQuestions};
pub use error::{
    AppServicesError, CatalogError, ExperienceServiceError, ProgressServiceError, SessionError,
};
pub use experience_service::ExperienceService;
pub use guard::{AccessNotice, GuardOutcome, PendingRedirect, Redirect, RouteGuard};
pub use progress_service::{ProgressService, ProgressView};
pub use session_context::SessionContext;
