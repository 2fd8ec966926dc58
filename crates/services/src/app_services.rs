use std::sync::Arc;

use prep_core::Clock;
use storage::{RemoteStore, RestConfig};

use crate::catalog_service::CatalogService;
use crate::error::AppServicesError;
use crate::experience_service::ExperienceService;
use crate::guard::RouteGuard;
use crate::progress_service::ProgressService;
use crate::session_context::SessionContext;

/// Assembles the application-facing services over a remote store.
#[derive(Clone)]
pub struct AppServices {
    session: SessionContext,
    guard: RouteGuard,
    progress: Arc<ProgressService>,
    catalog: Arc<CatalogService>,
    experiences: Arc<ExperienceService>,
}

impl AppServices {
    /// Wire services over the given store and load the startup session.
    ///
    /// The initial refresh tolerates a signed-out state; only a transport
    /// failure aborts startup.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the startup session lookup fails.
    pub async fn connect(store: RemoteStore, clock: Clock) -> Result<Self, AppServicesError> {
        let session = SessionContext::new(Arc::clone(&store.session));
        session.refresh().await?;

        let guard = RouteGuard::new(session.clone());
        let progress = Arc::new(ProgressService::new(
            Arc::clone(&store.progress),
            session.clone(),
        ));
        let catalog = Arc::new(CatalogService::new(Arc::clone(&store.catalog)));
        let experiences = Arc::new(ExperienceService::new(
            Arc::clone(&store.experiences),
            session.clone(),
            clock,
        ));

        Ok(Self {
            session,
            guard,
            progress,
            catalog,
            experiences,
        })
    }

    /// Wire services against the hosted REST backend.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the client cannot be built or the
    /// startup session lookup fails.
    pub async fn connect_rest(config: RestConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let store = RemoteStore::rest(config)?;
        Self::connect(store, clock).await
    }

    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    #[must_use]
    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressService {
        &self.progress
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    #[must_use]
    pub fn experiences(&self) -> &ExperienceService {
        &self.experiences
    }
}
