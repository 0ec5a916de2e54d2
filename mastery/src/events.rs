use mastery_api::endpoints::{insights::InsightsReport, ChildId};
use mastery_auth::SessionEvent;

/// Commands to execute (user actions → background tasks)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    SelectNext,
    SelectPrevious,
    NavigateToTop,
    NavigateToBottom,

    // Navigation
    NavigateBack,
    ShowRegister,
    ShowLogin,

    // Form editing (login and registration)
    FocusNextField,
    FocusPreviousField,
    AppendFieldChar(char),
    DeleteFieldChar,
    ClearField,
    SubmitLogin,
    SubmitRegistration,

    // Session
    RestoreSession,
    Logout,

    // Dashboard
    LoadRoster,
    GenerateInviteCode,
    DismissInviteCode,
    OpenInsights {
        child_id: ChildId,
        child_name: String,
    },

    // Child insights
    LoadInsights {
        child_id: ChildId,
    },
    BackToDashboard,

    ToggleHelp,

    // Log screen
    NavigateToLogs,
    ScrollLogsUp,
    ScrollLogsDown,
    ScrollLogsPageUp,
    ScrollLogsPageDown,
    ScrollLogsToTop,
    ScrollLogsToBottom,

    // Key sequence state
    SetPendingKey(char),
    ClearPendingKey,

    // System
    Quit,
}

impl AppCommand {
    /// Commands that carry typed text. These are never logged.
    pub fn carries_input(&self) -> bool {
        matches!(self, AppCommand::AppendFieldChar(_))
    }
}

/// Events from background tasks (responses to commands)
#[derive(Debug, Clone)]
pub enum DataEvent {
    // Login / registration
    LoginFailed {
        error: String,
    },
    RegistrationSucceeded,
    RegistrationFailed {
        error: String,
    },
    SessionRestoreFinished {
        restored: bool,
    },

    // Invite codes
    InviteCodeGenerated {
        code: String,
    },
    InviteCodeFailed {
        error: String,
    },

    // Child insights
    InsightsLoaded {
        child_id: ChildId,
        report: Box<InsightsReport>,
    },
    InsightsNotFound {
        child_id: ChildId,
    },
    InsightsLoadFailed {
        child_id: ChildId,
        error: String,
    },

    /// Forwarded from the session context.
    Session(SessionEvent),
}

impl From<SessionEvent> for DataEvent {
    fn from(event: SessionEvent) -> Self {
        DataEvent::Session(event)
    }
}
