//! Session events from a live session context driving the dashboard.

use mastery::state::LoadingState;
use mastery::testing::TestApp;
use mastery::ui::screens::Screen;
use mastery_api::MemoryCredentialStore;
use mastery_auth::SessionContext;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_login_with_failing_roster_shows_error_on_dashboard() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/api/parent/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "access-1",
            "refresh": "refresh-1",
            "user": {"id": 10, "username": "pat"},
            "parent_profile": {"id": 4, "display_name": "Pat's family"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/api/parent/children/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (tx, mut events) = mpsc::unbounded_channel();
    let session = SessionContext::new(&server.uri(), Arc::new(MemoryCredentialStore::new()), tx);

    assert!(session.login("pat", "pw").await.is_success());

    let mut app = TestApp::new();
    while let Ok(event) = events.try_recv() {
        app.send_session_event(event);
    }

    let Screen::Dashboard(dashboard) = app.state().current_screen() else {
        panic!("Expected Dashboard screen");
    };
    assert!(dashboard.roster.is_empty());
    assert!(matches!(dashboard.roster_loading, LoadingState::Error(_)));
}
