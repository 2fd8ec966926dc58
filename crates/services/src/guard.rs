use std::time::Duration;

use tokio::time::sleep;

use crate::session_context::SessionContext;

/// How long the denial notice stays up before the redirect fires.
///
/// A UX grace period only; auth state is not re-checked during the wait.
pub const DEFAULT_GRACE: Duration = Duration::from_millis(2500);

/// Login route used as the redirect target.
pub const LOGIN_ROUTE: &str = "/auth/login";

/// Notice shown while the redirect is pending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessNotice {
    pub title: &'static str,
    pub message: &'static str,
}

impl AccessNotice {
    fn denied() -> Self {
        Self {
            title: "Access Denied",
            message: "You must be logged in to access this page. Redirecting to login...",
        }
    }
}

/// Navigation the view performs once the grace period elapses.
///
/// `from` carries the originally requested path so login can bounce back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub to: String,
    pub from: String,
}

/// Outcome of guarding a protected route.
#[derive(Debug)]
pub enum GuardOutcome {
    /// Render the protected content directly.
    Allow,
    /// Show the notice now; resolve the redirect after the grace delay.
    Deny(PendingRedirect),
}

/// A denial with its delayed redirect.
///
/// The notice is available synchronously; awaiting `into_redirect` sleeps
/// for the configured grace period and then yields the navigation target.
#[derive(Debug)]
pub struct PendingRedirect {
    notice: AccessNotice,
    redirect: Redirect,
    grace: Duration,
}

impl PendingRedirect {
    #[must_use]
    pub fn notice(&self) -> &AccessNotice {
        &self.notice
    }

    /// Wait out the grace period and return the redirect.
    pub async fn into_redirect(self) -> Redirect {
        sleep(self.grace).await;
        self.redirect
    }
}

/// Gate for protected views.
///
/// Consults the session context once per check: authenticated callers pass
/// through, everyone else gets an immediate denial notice and a redirect to
/// the login route after a fixed delay. The delay never re-attempts
/// authentication.
#[derive(Clone)]
pub struct RouteGuard {
    session: SessionContext,
    login_route: String,
    grace: Duration,
}

impl RouteGuard {
    #[must_use]
    pub fn new(session: SessionContext) -> Self {
        Self {
            session,
            login_route: LOGIN_ROUTE.to_owned(),
            grace: DEFAULT_GRACE,
        }
    }

    /// Override the grace delay (tests use a few milliseconds).
    #[must_use]
    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    #[must_use]
    pub fn with_login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = route.into();
        self
    }

    /// Decide whether `requested_path` may be rendered.
    #[must_use]
    pub fn check(&self, requested_path: &str) -> GuardOutcome {
        if self.session.is_authenticated() {
            return GuardOutcome::Allow;
        }
        GuardOutcome::Deny(PendingRedirect {
            notice: AccessNotice::denied(),
            redirect: Redirect {
                to: self.login_route.clone(),
                from: requested_path.to_owned(),
            },
            grace: self.grace,
        })
    }
}
