use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use prep_core::model::{User, UserId};
use services::{GuardOutcome, RouteGuard, SessionContext, SessionError};
use storage::{InMemoryStore, RemoteError, SessionRepository};
use uuid::Uuid;

fn signed_in(store: &InMemoryStore) {
    store.set_session(Some(User::new(
        UserId::new(Uuid::new_v4()),
        "Asha",
        "asha@example.com",
    )));
}

#[tokio::test]
async fn authenticated_caller_passes_through() {
    let store = InMemoryStore::new();
    signed_in(&store);
    let session = SessionContext::new(Arc::new(store));
    session.refresh().await.unwrap();

    let guard = RouteGuard::new(session);
    assert!(matches!(guard.check("/dashboard"), GuardOutcome::Allow));
}

#[tokio::test]
async fn denial_notice_is_available_before_the_delay() {
    let session = SessionContext::new(Arc::new(InMemoryStore::new()));
    let guard = RouteGuard::new(session).with_grace(Duration::from_millis(10));

    let GuardOutcome::Deny(pending) = guard.check("/subject/1") else {
        panic!("expected denial for signed-out caller");
    };
    assert_eq!(pending.notice().title, "Access Denied");
}

#[tokio::test]
async fn redirect_fires_after_grace_and_carries_original_path() {
    let session = SessionContext::new(Arc::new(InMemoryStore::new()));
    let grace = Duration::from_millis(20);
    let guard = RouteGuard::new(session).with_grace(grace);

    let GuardOutcome::Deny(pending) = guard.check("/subject/3") else {
        panic!("expected denial for signed-out caller");
    };

    let started = Instant::now();
    let redirect = pending.into_redirect().await;
    assert!(started.elapsed() >= grace);
    assert_eq!(redirect.to, "/auth/login");
    assert_eq!(redirect.from, "/subject/3");
}

#[tokio::test]
async fn grace_delay_does_not_recheck_auth() {
    let store = InMemoryStore::new();
    let session = SessionContext::new(Arc::new(store.clone()));
    let guard = RouteGuard::new(session.clone()).with_grace(Duration::from_millis(5));

    let GuardOutcome::Deny(pending) = guard.check("/admin") else {
        panic!("expected denial for signed-out caller");
    };

    // signing in mid-delay does not cancel the pending redirect
    signed_in(&store);
    session.refresh().await.unwrap();

    let redirect = pending.into_redirect().await;
    assert_eq!(redirect.from, "/admin");
}

/// Session endpoint that answers normally until told to drop connections.
struct UnreliableSession {
    user: User,
    failing: AtomicBool,
}

#[async_trait]
impl SessionRepository for UnreliableSession {
    async fn read_session(&self) -> Result<Option<User>, RemoteError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RemoteError::Connection("socket closed".into()));
        }
        Ok(Some(self.user.clone()))
    }
}

#[tokio::test]
async fn failed_refresh_keeps_last_authoritative_identity() {
    let user = User::new(UserId::new(Uuid::new_v4()), "Asha", "asha@example.com");
    let repo = Arc::new(UnreliableSession {
        user: user.clone(),
        failing: AtomicBool::new(false),
    });
    let session = SessionContext::new(repo.clone());
    session.refresh().await.unwrap();
    assert!(session.is_authenticated());

    repo.failing.store(true, Ordering::SeqCst);
    let err = session.refresh().await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Remote(RemoteError::Connection(_))
    ));

    // the transport failure did not clear the held profile
    assert!(session.is_authenticated());
    assert_eq!(session.current_user(), Some(user));
}

#[tokio::test]
async fn custom_login_route_is_honored() {
    let session = SessionContext::new(Arc::new(InMemoryStore::new()));
    let guard = RouteGuard::new(session)
        .with_grace(Duration::from_millis(1))
        .with_login_route("/login");

    let GuardOutcome::Deny(pending) = guard.check("/dashboard") else {
        panic!("expected denial for signed-out caller");
    };
    assert_eq!(pending.into_redirect().await.to, "/login");
}
