use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use prep_core::model::User;
use storage::SessionRepository;

use crate::error::SessionError;

/// Shared holder of the current authenticated identity.
///
/// One instance is created at startup and cloned into everything that needs
/// identity; there is no ambient global. Callers refresh it after any
/// login/logout/signup mutation so every reader sees one source of truth.
///
/// "Authenticated" means exactly this: the context holds a profile that the
/// session repository returned from a live session. No provider sentinel
/// values are consulted.
#[derive(Clone)]
pub struct SessionContext {
    repo: Arc<dyn SessionRepository>,
    current: Arc<RwLock<Option<User>>>,
}

impl SessionContext {
    #[must_use]
    pub fn new(repo: Arc<dyn SessionRepository>) -> Self {
        Self {
            repo,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Re-read the session from the remote store and replace the held user.
    ///
    /// A definitive "no session" clears the held user. A transport failure
    /// leaves it untouched so readers keep the last authoritative identity.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when the remote lookup fails.
    pub async fn refresh(&self) -> Result<Option<User>, SessionError> {
        match self.repo.read_session().await {
            Ok(user) => {
                debug!(signed_in = user.is_some(), "session refreshed");
                if let Ok(mut guard) = self.current.write() {
                    guard.clone_from(&user);
                }
                Ok(user)
            }
            Err(err) => {
                warn!(error = %err, "session refresh failed");
                Err(err.into())
            }
        }
    }

    /// Drop the held identity, e.g. after a local sign-out.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.current.write() {
            *guard = None;
        }
    }

    /// Snapshot of the held user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.current.read().ok().and_then(|guard| guard.clone())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }
}
