//! Shared error types for the services crate.

use thiserror::Error;

use prep_core::model::ExperienceError;
use storage::RemoteError;

/// Errors emitted by `ProgressService`.
///
/// An unauthenticated caller is not an error; mutations silently no-op and
/// reads return an empty view in that case.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Errors emitted by `SessionContext::refresh`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("unknown subject {0}")]
    UnknownSubject(prep_core::model::SubjectId),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Errors emitted by `ExperienceService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExperienceServiceError {
    #[error("sign in to submit an experience")]
    NotSignedIn,
    #[error(transparent)]
    Invalid(#[from] ExperienceError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Rest(#[from] storage::RestInitError),
}
