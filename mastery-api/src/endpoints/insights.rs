use super::{ChildId, Mastery, children::ChildSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::Request;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pacing {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub sessions_per_week: f64,
    #[serde(default)]
    pub average_session_minutes: f64,
    #[serde(default)]
    pub days_since_last_session: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(default, rename = "type", alias = "kind")]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentSession {
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_minutes: Option<f64>,
    #[serde(default)]
    pub atoms_completed: u32,
    #[serde(default)]
    pub accuracy: Option<Mastery>,
    #[serde(default)]
    pub xp_earned: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptMastery {
    #[serde(alias = "concept_name")]
    pub concept: String,
    #[serde(default)]
    pub mastery: Mastery,
    #[serde(default)]
    pub atoms_mastered: u32,
    #[serde(default)]
    pub atoms_total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeakArea {
    #[serde(alias = "concept_name")]
    pub concept: String,
    #[serde(default)]
    pub mastery: Mastery,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    #[serde(default)]
    pub sessions: u32,
    #[serde(default)]
    pub minutes: f64,
    #[serde(default)]
    pub xp_earned: i64,
    #[serde(default)]
    pub atoms_mastered: u32,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct GetChildInsights {
    child_id: ChildId,
}

impl GetChildInsights {
    pub fn new(child_id: impl Into<ChildId>) -> Self {
        Self {
            child_id: child_id.into(),
        }
    }
}

impl Request for GetChildInsights {
    type Data = ();
    type Response = InsightsReport;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/auth/api/parent/child/{}/insights/", self.child_id).into()
    }
}

// Responses

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsReport {
    #[serde(default, alias = "child_summary")]
    pub child: Option<ChildSummary>,
    #[serde(default)]
    pub pacing: Option<Pacing>,
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub recent_sessions: Vec<RecentSession>,
    #[serde(default)]
    pub mastery_by_concept: Vec<ConceptMastery>,
    #[serde(default)]
    pub weak_areas: Vec<WeakArea>,
    #[serde(default)]
    pub weekly_summary: Option<WeeklySummary>,
}

impl InsightsReport {
    /// True when the service returned nothing worth rendering.
    pub fn is_empty(&self) -> bool {
        self.child.is_none()
            && self.pacing.is_none()
            && self.insights.is_empty()
            && self.recent_sessions.is_empty()
            && self.mastery_by_concept.is_empty()
            && self.weak_areas.is_empty()
            && self.weekly_summary.is_none()
    }
}
