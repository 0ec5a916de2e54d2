use mastery::events::{AppCommand, DataEvent};
use mastery::input::{Key, KeyEvent};
use mastery::state::reducer::{REGISTRATION_COMPLETE, SESSION_EXPIRED};
use mastery::state::{InviteCodeState, LoadingState, LogsState, LoginState};
use mastery::testing::TestApp;
use mastery::ui::screens::Screen;
use mastery_api::endpoints::{
    children::{ChildSummary, Roster},
    insights::InsightsReport,
    ChildId, Mastery,
};
use mastery_auth::{ParentIdentity, SessionEvent};

fn identity() -> ParentIdentity {
    ParentIdentity {
        id: 1,
        display_name: "Pat Lee".to_string(),
        username: "pat".to_string(),
    }
}

fn child(id: i64, name: &str) -> ChildSummary {
    ChildSummary {
        id: ChildId::from(id),
        username: name.to_lowercase(),
        name: Some(name.to_string()),
        mastery: Mastery::new(0.6),
        total_xp: 120,
        last_active: None,
    }
}

fn roster() -> Roster {
    Roster {
        children: vec![child(10, "Sam"), child(11, "Alex")],
        ..Default::default()
    }
}

fn dashboard_screen() -> std::mem::Discriminant<Screen> {
    std::mem::discriminant(&Screen::Dashboard(Default::default()))
}

fn login_screen() -> std::mem::Discriminant<Screen> {
    std::mem::discriminant(&Screen::Login(LoginState::default()))
}

fn login_state(app: &TestApp) -> &LoginState {
    match app.state().current_screen() {
        Screen::Login(login_state) => login_state,
        other => panic!("Expected Login screen, got {:?}", other),
    }
}

#[test]
fn test_login_form_captures_global_keys() {
    let mut app = TestApp::new();

    // 'q' and '?' are ordinary characters in a username
    app.type_text("q?g");
    app.assert_not_quit();
    assert!(!app.state().help_visible);
    assert_eq!(login_state(&app).form.username.value(), "q?g");

    // Esc leaves the application from the login screen
    app.send_key(Key::Esc);
    app.assert_should_quit();
}

#[test]
fn test_ctrl_c_quits_from_form() {
    let mut app = TestApp::new();
    app.type_text("pat");

    app.send_key_event(KeyEvent::with_ctrl(Key::Char('c')));

    app.assert_should_quit();
}

#[test]
fn test_login_flow() {
    let mut app = TestApp::new();

    // Submitting an empty form is caught before any request
    app.send_key(Key::Tab);
    app.send_key(Key::Enter);
    assert_eq!(login_state(&app).error.as_deref(), Some("Username is required"));
    assert!(!login_state(&app).submitting.is_loading());

    app.send_key(Key::BackTab);
    app.type_text("pat");
    app.send_key(Key::Enter);
    app.type_text("hunter22");
    app.send_key(Key::Enter);

    assert!(login_state(&app).submitting.is_loading());
    assert_eq!(login_state(&app).error, None);
    assert!(app.executed_commands().contains(&AppCommand::SubmitLogin));

    // Typing is ignored while the request is in flight
    app.type_text("x");
    assert_eq!(login_state(&app).form.password.value(), "hunter22");

    app.send_data_event(DataEvent::LoginFailed {
        error: "Invalid credentials".to_string(),
    });
    assert_eq!(login_state(&app).error.as_deref(), Some("Invalid credentials"));
    assert_eq!(login_state(&app).form.password.value(), "");
    assert_eq!(login_state(&app).form.username.value(), "pat");

    app.type_text("correct-horse");
    app.send_key(Key::Enter);
    app.send_session_event(SessionEvent::LoggedIn(identity()));

    app.assert_screen_type(dashboard_screen());
    assert_eq!(app.state().history.len(), 1);
    assert_eq!(app.state().identity, Some(identity()));

    app.send_session_event(SessionEvent::RosterUpdated(roster()));
    let Screen::Dashboard(dashboard) = app.state().current_screen() else {
        panic!("Expected Dashboard screen");
    };
    assert_eq!(dashboard.roster.children.len(), 2);
    assert_eq!(dashboard.roster_loading, LoadingState::Loaded);
    assert_eq!(dashboard.selected_child().map(|c| c.id), Some(ChildId::from(10_i64)));
}

#[test]
fn test_registration_flow() {
    let mut app = TestApp::new();
    app.send_key_event(KeyEvent::with_ctrl(Key::Char('r')));
    assert!(matches!(app.state().current_screen(), Screen::Register(_)));

    app.type_text("pat");
    app.send_key(Key::Enter);
    app.type_text("pat@example.com");
    app.send_key(Key::Tab);
    app.type_text("Pat");
    app.send_key(Key::Down);
    app.type_text("Lee");
    app.send_key(Key::Tab);
    app.send_key(Key::Tab); // display name is optional
    app.type_text("longpassword");
    app.send_key(Key::Tab);
    app.type_text("longpasswort");
    app.send_key(Key::Enter);

    let Screen::Register(register_state) = app.state().current_screen() else {
        panic!("Expected Register screen");
    };
    assert_eq!(register_state.error.as_deref(), Some("Passwords do not match"));
    assert!(!register_state.submitting.is_loading());

    app.send_key_event(KeyEvent::with_ctrl(Key::Char('u')));
    app.type_text("longpassword");
    app.send_key(Key::Enter);

    let Screen::Register(register_state) = app.state().current_screen() else {
        panic!("Expected Register screen");
    };
    assert!(register_state.submitting.is_loading());

    app.send_data_event(DataEvent::RegistrationSucceeded);

    app.assert_screen_type(login_screen());
    assert_eq!(app.state().history.len(), 1);
    assert_eq!(login_state(&app).notice.as_deref(), Some(REGISTRATION_COMPLETE));
    // Registering does not sign the parent in
    assert_eq!(app.state().identity, None);
}

#[test]
fn test_registration_failure_stays_on_form() {
    let mut app = TestApp::new();
    app.send_command(AppCommand::ShowRegister);

    app.send_data_event(DataEvent::RegistrationFailed {
        error: "username: already taken".to_string(),
    });

    let Screen::Register(register_state) = app.state().current_screen() else {
        panic!("Expected Register screen");
    };
    assert_eq!(
        register_state.error.as_deref(),
        Some("username: already taken")
    );

    // Esc returns to the login form
    app.send_key(Key::Esc);
    app.assert_screen_type(login_screen());
    app.assert_not_quit();
}

#[test]
fn test_dashboard_to_insights_and_back() {
    let mut app = TestApp::logged_in(identity(), roster());

    app.send_key(Key::Char('j'));
    app.send_key(Key::Enter);

    let Screen::Insights(insights) = app.state().current_screen() else {
        panic!("Expected Insights screen");
    };
    assert_eq!(insights.child_id, ChildId::from(11_i64));
    assert_eq!(insights.child_name, "Alex");
    assert!(insights.loading.is_loading());

    // A late answer for another child is ignored
    app.send_data_event(DataEvent::InsightsLoaded {
        child_id: ChildId::from(10_i64),
        report: Box::default(),
    });
    let Screen::Insights(insights) = app.state().current_screen() else {
        panic!("Expected Insights screen");
    };
    assert!(insights.report.is_none());

    app.send_data_event(DataEvent::InsightsNotFound {
        child_id: ChildId::from(11_i64),
    });
    let Screen::Insights(insights) = app.state().current_screen() else {
        panic!("Expected Insights screen");
    };
    assert!(insights.not_found);

    app.send_key(Key::Enter);
    app.assert_screen_type(dashboard_screen());

    let Screen::Dashboard(dashboard) = app.state().current_screen() else {
        panic!("Expected Dashboard screen");
    };
    assert_eq!(dashboard.selected_child().map(|c| c.id), Some(ChildId::from(11_i64)));
}

#[test]
fn test_insights_report_scrolls() {
    let mut app = TestApp::logged_in(identity(), roster());
    app.send_key(Key::Enter);
    app.send_data_event(DataEvent::InsightsLoaded {
        child_id: ChildId::from(10_i64),
        report: Box::new(InsightsReport::default()),
    });

    app.send_keys(&[Key::Char('j'), Key::Char('j'), Key::Char('k')]);

    let Screen::Insights(insights) = app.state().current_screen() else {
        panic!("Expected Insights screen");
    };
    assert_eq!(insights.scroll, 1);
    assert_eq!(insights.loading, LoadingState::Loaded);

    app.send_key(Key::Esc);
    app.assert_screen_type(dashboard_screen());
}

#[test]
fn test_invite_code_popup() {
    let mut app = TestApp::logged_in(identity(), roster());

    app.send_key(Key::Char('i'));
    let Screen::Dashboard(dashboard) = app.state().current_screen() else {
        panic!("Expected Dashboard screen");
    };
    assert!(matches!(dashboard.invite, Some(InviteCodeState::Generating(_))));

    app.send_data_event(DataEvent::InviteCodeGenerated {
        code: "K7PQ2M".to_string(),
    });
    let Screen::Dashboard(dashboard) = app.state().current_screen() else {
        panic!("Expected Dashboard screen");
    };
    assert_eq!(
        dashboard.invite,
        Some(InviteCodeState::Ready("K7PQ2M".to_string()))
    );

    // The popup swallows navigation keys
    app.send_key(Key::Char('j'));
    app.send_key(Key::Esc);

    let Screen::Dashboard(dashboard) = app.state().current_screen() else {
        panic!("Expected Dashboard screen");
    };
    assert_eq!(dashboard.invite, None);
    assert_eq!(dashboard.selected_child().map(|c| c.id), Some(ChildId::from(10_i64)));
}

#[test]
fn test_roster_failure_shows_error() {
    let mut app = TestApp::new();
    app.send_session_event(SessionEvent::LoggedIn(identity()));

    app.send_session_event(SessionEvent::RosterUpdated(Roster::default()));
    app.send_session_event(SessionEvent::RosterLoadFailed(
        "Service unavailable".to_string(),
    ));

    let Screen::Dashboard(dashboard) = app.state().current_screen() else {
        panic!("Expected Dashboard screen");
    };
    assert_eq!(
        dashboard.roster_loading,
        LoadingState::Error("Service unavailable".to_string())
    );

    app.send_key(Key::Char('r'));
    let Screen::Dashboard(dashboard) = app.state().current_screen() else {
        panic!("Expected Dashboard screen");
    };
    assert!(dashboard.roster_loading.is_loading());
}

#[test]
fn test_session_expiry_returns_to_login() {
    let mut app = TestApp::logged_in(identity(), roster());
    app.send_key(Key::Enter);

    app.send_session_event(SessionEvent::SessionExpired);

    app.assert_screen_type(login_screen());
    assert_eq!(app.state().history.len(), 1);
    assert_eq!(app.state().identity, None);
    assert_eq!(login_state(&app).notice.as_deref(), Some(SESSION_EXPIRED));
}

#[test]
fn test_logout() {
    let mut app = TestApp::logged_in(identity(), roster());

    app.send_key(Key::Char('o'));

    app.assert_screen_type(login_screen());
    assert_eq!(app.state().identity, None);

    // The session confirms the logout; nothing further changes
    app.send_session_event(SessionEvent::LoggedOut);
    app.assert_screen_type(login_screen());
    assert_eq!(login_state(&app).notice, None);
}

#[test]
fn test_session_restore_without_credentials() {
    let mut app = TestApp::new();
    app.send_command(AppCommand::RestoreSession);
    assert!(login_state(&app).submitting.is_loading());

    app.send_data_event(DataEvent::SessionRestoreFinished { restored: false });

    assert_eq!(login_state(&app).submitting, LoadingState::NotStarted);
    app.assert_screen_type(login_screen());
}

#[test]
fn test_help_toggle_on_dashboard() {
    let mut app = TestApp::logged_in(identity(), roster());

    app.send_key(Key::Char('?'));
    assert!(app.state().help_visible);

    app.send_key(Key::Esc);
    assert!(!app.state().help_visible);
}

#[test]
fn test_logs_via_multi_key_sequence() {
    let mut app = TestApp::logged_in(identity(), roster());

    app.send_key(Key::Char('g'));
    assert_eq!(app.state().pending_key, Some('g'));
    app.send_key(Key::Char('l'));
    assert_eq!(app.state().pending_key, None);
    app.assert_screen_type(std::mem::discriminant(&Screen::Logs(LogsState::default())));

    app.send_key(Key::Char('h'));
    app.assert_screen_type(dashboard_screen());
}

#[test]
fn test_navigate_top_and_bottom() {
    let mut app = TestApp::logged_in(identity(), roster());

    app.send_key(Key::Char('G'));
    let Screen::Dashboard(dashboard) = app.state().current_screen() else {
        panic!("Expected Dashboard screen");
    };
    assert_eq!(dashboard.selected_child().map(|c| c.id), Some(ChildId::from(11_i64)));

    app.send_keys(&[Key::Char('g'), Key::Char('g')]);
    let Screen::Dashboard(dashboard) = app.state().current_screen() else {
        panic!("Expected Dashboard screen");
    };
    assert_eq!(dashboard.selected_child().map(|c| c.id), Some(ChildId::from(10_i64)));
}

#[test]
fn test_quit_from_dashboard() {
    let mut app = TestApp::logged_in(identity(), roster());
    app.assert_not_quit();

    app.send_key(Key::Char('q'));

    app.assert_should_quit();
}
