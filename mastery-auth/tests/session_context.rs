//! Session context behaviour against a mocked learning platform.

use mastery_api::endpoints::ChildId;
use mastery_api::{CredentialStore, MemoryCredentialStore};
use mastery_auth::{ParentIdentity, RegistrationForm, SessionContext, SessionEvent};
use secrecy::SecretString;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOGIN_PATH: &str = "/auth/api/parent/login/";
const REGISTER_PATH: &str = "/auth/api/parent/register/";
const CHECK_PATH: &str = "/auth/api/parent/check/";
const CHILDREN_PATH: &str = "/auth/api/parent/children/";
const LINK_PATH: &str = "/auth/api/parent/link-child/";
const REFRESH_PATH: &str = "/api/token/refresh/";

struct Harness {
    server: MockServer,
    store: Arc<MemoryCredentialStore>,
    session: SessionContext,
    events: mpsc::UnboundedReceiver<SessionEvent>,
}

async fn harness(store: MemoryCredentialStore) -> Harness {
    let server = MockServer::start().await;
    let store = Arc::new(store);
    let (tx, events) = mpsc::unbounded_channel();
    let session = SessionContext::new(&server.uri(), store.clone(), tx);
    Harness {
        server,
        store,
        session,
        events,
    }
}

fn drain(events: &mut mpsc::UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    seen
}

fn roster_body() -> serde_json::Value {
    json!({
        "children": [
            {"id": 1, "username": "sam", "mastery": 0.42, "total_xp": 300},
            {"id": 2, "username": "alex", "mastery": 0.9, "total_xp": 1200}
        ],
        "pending_invites": [{"code": "ABCD1234"}],
        "stats": {"total_children": 2}
    })
}

fn login_body() -> serde_json::Value {
    json!({
        "access": "access-1",
        "refresh": "refresh-1",
        "user": {"id": 10, "username": "pat", "first_name": "Pat", "last_name": "Doe"},
        "parent_profile": {"id": 4, "display_name": "Pat's family"}
    })
}

fn registration(password: &str, confirmation: &str) -> RegistrationForm {
    RegistrationForm {
        username: "pat".into(),
        email: "pat@example.com".into(),
        password: SecretString::from(password.to_string()),
        password_confirmation: SecretString::from(confirmation.to_string()),
        first_name: "Pat".into(),
        last_name: "Doe".into(),
        display_name: None,
    }
}

async fn mount_roster(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(CHILDREN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(roster_body()))
        .mount(server)
        .await;
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_success_stores_credentials_and_loads_roster() {
    let mut h = harness(MemoryCredentialStore::new()).await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .expect(1)
        .mount(&h.server)
        .await;
    mount_roster(&h.server).await;

    let outcome = h.session.login("pat", "correct-horse").await;

    assert!(outcome.is_success());
    assert_eq!(outcome.error, None);
    assert_eq!(h.store.access_token().unwrap().as_deref(), Some("access-1"));
    assert_eq!(h.store.refresh_token().unwrap().as_deref(), Some("refresh-1"));

    let identity = h.session.identity().unwrap();
    assert_eq!(identity.id, 4);
    assert_eq!(identity.display_name, "Pat's family");
    assert!(h.session.is_authenticated());
    assert_eq!(h.session.roster().unwrap().children.len(), 2);

    let events = drain(&mut h.events);
    assert!(matches!(events.first(), Some(SessionEvent::LoggedIn(_))));
    assert!(matches!(events.last(), Some(SessionEvent::RosterUpdated(_))));
}

#[tokio::test]
async fn test_login_failure_returns_message_and_leaves_store_untouched() {
    let h = harness(MemoryCredentialStore::new()).await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})),
        )
        .expect(1)
        .mount(&h.server)
        .await;
    // A rejected password must never reach the refresh path.
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&h.server)
        .await;

    let outcome = h.session.login("pat", "wrong").await;

    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("Invalid credentials"));
    assert!(h.store.is_empty());
    assert!(h.session.identity().is_none());
}

#[tokio::test]
async fn test_login_success_status_without_tokens_is_a_failure() {
    let h = harness(MemoryCredentialStore::new()).await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": "Not a parent account"})),
        )
        .mount(&h.server)
        .await;

    let outcome = h.session.login("kid", "pw").await;

    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("Not a parent account"));
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn test_login_still_succeeds_when_roster_fails() {
    let mut h = harness(MemoryCredentialStore::new()).await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path(CHILDREN_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&h.server)
        .await;

    let outcome = h.session.login("pat", "pw").await;

    assert!(outcome.success);
    assert_eq!(h.session.roster(), Some(Default::default()));

    let events = drain(&mut h.events);
    assert!(matches!(events.first(), Some(SessionEvent::LoggedIn(_))));
    assert_eq!(
        events[1..],
        [
            SessionEvent::RosterUpdated(Default::default()),
            SessionEvent::RosterLoadFailed(
                "Request failed (500 Internal Server Error)".into()
            ),
        ]
    );
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_success_does_not_start_a_session() {
    let h = harness(MemoryCredentialStore::new()).await;

    Mock::given(method("POST"))
        .and(path(REGISTER_PATH))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"message": "Account created"})),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = h.session.register(registration("longenough", "longenough")).await;

    assert!(outcome.success);
    assert!(h.store.is_empty());
    assert!(!h.session.is_authenticated());
}

#[tokio::test]
async fn test_register_field_errors_are_aggregated() {
    let h = harness(MemoryCredentialStore::new()).await;

    Mock::given(method("POST"))
        .and(path(REGISTER_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "password2": ["Passwords do not match."],
            "username": ["A user with that username already exists."]
        })))
        .mount(&h.server)
        .await;

    let outcome = h.session.register(registration("longenough", "different")).await;

    assert!(!outcome.success);
    let message = outcome.error.unwrap();
    assert!(message.contains("Passwords do not match."));
    assert!(message.contains("already exists"));
    assert!(h.store.is_empty());
}

// ============================================================================
// Logout
// ============================================================================

#[tokio::test]
async fn test_logout_clears_everything_and_is_idempotent() {
    let mut h = harness(MemoryCredentialStore::new()).await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .mount(&h.server)
        .await;
    mount_roster(&h.server).await;

    assert!(h.session.login("pat", "pw").await.success);
    drain(&mut h.events);

    h.session.logout();
    h.session.logout();

    assert!(h.store.is_empty());
    assert!(h.session.identity().is_none());
    assert!(h.session.roster().is_none());
    assert_eq!(
        drain(&mut h.events),
        vec![SessionEvent::LoggedOut, SessionEvent::LoggedOut]
    );
}

// ============================================================================
// Roster
// ============================================================================

#[tokio::test]
async fn test_fetch_children_failure_resets_roster_to_empty() {
    let mut h = harness(MemoryCredentialStore::with_pair("access-1", "refresh-1")).await;

    Mock::given(method("GET"))
        .and(path(CHILDREN_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&h.server)
        .await;

    let result = h.session.fetch_children().await;

    assert!(result.is_err());
    let roster = h.session.roster().unwrap();
    assert!(roster.is_empty());
    assert!(roster.pending_invites.is_empty());
    assert_eq!(
        drain(&mut h.events),
        vec![
            SessionEvent::RosterUpdated(Default::default()),
            SessionEvent::RosterLoadFailed("Request failed (503 Service Unavailable)".into()),
        ]
    );
    // Credentials survive a failed roster load.
    assert!(!h.store.is_empty());
}

// ============================================================================
// Identity restoration
// ============================================================================

#[tokio::test]
async fn test_fetch_identity_without_credential_makes_no_request() {
    let h = harness(MemoryCredentialStore::new()).await;

    assert_eq!(h.session.fetch_identity().await, None);
    assert!(h.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_fetch_identity_restores_parent_session() {
    let mut h = harness(MemoryCredentialStore::with_pair("access-1", "refresh-1")).await;

    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "is_parent": true,
            "parent_profile": {"id": 4, "display_name": "Pat's family", "username": "pat"}
        })))
        .expect(1)
        .mount(&h.server)
        .await;
    mount_roster(&h.server).await;

    let identity = h.session.fetch_identity().await;

    assert_eq!(
        identity,
        Some(ParentIdentity {
            id: 4,
            display_name: "Pat's family".into(),
            username: "pat".into(),
        })
    );
    assert_eq!(h.session.roster().unwrap().children.len(), 2);
    assert!(matches!(
        drain(&mut h.events).first(),
        Some(SessionEvent::LoggedIn(_))
    ));
}

#[tokio::test]
async fn test_fetch_identity_accepts_parent_without_profile() {
    let mut h = harness(MemoryCredentialStore::with_pair("access-1", "refresh-1")).await;

    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"is_parent": true})))
        .expect(1)
        .mount(&h.server)
        .await;
    mount_roster(&h.server).await;

    let identity = h.session.fetch_identity().await;

    assert!(identity.is_some());
    assert!(h.session.is_authenticated());
    assert_eq!(h.store.access_token().unwrap().as_deref(), Some("access-1"));
    assert_eq!(h.store.refresh_token().unwrap().as_deref(), Some("refresh-1"));
    assert!(matches!(
        drain(&mut h.events).first(),
        Some(SessionEvent::LoggedIn(_))
    ));
}

#[tokio::test]
async fn test_fetch_identity_clears_non_parent_credential() {
    let h = harness(MemoryCredentialStore::with_pair("access-1", "refresh-1")).await;

    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"is_parent": false})))
        .mount(&h.server)
        .await;

    assert_eq!(h.session.fetch_identity().await, None);
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn test_expired_session_emits_event_and_clears_state() {
    let mut h = harness(MemoryCredentialStore::with_pair("stale", "dead")).await;

    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Token is invalid"})))
        .expect(1)
        .mount(&h.server)
        .await;

    assert_eq!(h.session.fetch_identity().await, None);
    assert!(h.store.is_empty());
    assert_eq!(drain(&mut h.events), vec![SessionEvent::SessionExpired]);
}

// ============================================================================
// Invite codes and insights
// ============================================================================

#[tokio::test]
async fn test_generate_invite_code() {
    let h = harness(MemoryCredentialStore::with_pair("access-1", "refresh-1")).await;

    Mock::given(method("POST"))
        .and(path(LINK_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "invite_code": "XY12ZW34",
            "expires_at": "2026-10-26T12:00:00Z"
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let code = h.session.generate_invite_code().await.unwrap();
    assert_eq!(code, "XY12ZW34");
}

#[tokio::test]
async fn test_generate_invite_code_reports_service_error() {
    let h = harness(MemoryCredentialStore::with_pair("access-1", "refresh-1")).await;

    Mock::given(method("POST"))
        .and(path(LINK_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": "Too many pending invites"})),
        )
        .mount(&h.server)
        .await;

    let err = h.session.generate_invite_code().await.unwrap_err();
    assert_eq!(err.user_message(), "Too many pending invites");
}

#[tokio::test]
async fn test_insights_for_unknown_child_is_not_found() {
    let h = harness(MemoryCredentialStore::with_pair("access-1", "refresh-1")).await;

    Mock::given(method("GET"))
        .and(path("/auth/api/parent/child/99/insights/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Child not found"})))
        .mount(&h.server)
        .await;

    let err = h.session.fetch_insights(ChildId::from(99)).await.unwrap_err();
    assert!(err.is_not_found());
}
