pub mod dashboard_screen;
pub mod insights_screen;
pub mod login_screen;
pub mod logs_screen;
pub mod register_screen;

use crate::state::{DashboardState, InsightsState, LogsState, LoginState, RegisterState};

#[derive(Debug, Clone)]
pub enum Screen {
    Login(LoginState),
    Register(Box<RegisterState>),
    Dashboard(DashboardState),
    Insights(Box<InsightsState>),
    Logs(LogsState),
}
