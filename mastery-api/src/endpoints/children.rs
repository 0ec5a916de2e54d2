use super::{ChildId, Mastery};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request};

// Common

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildSummary {
    #[serde(alias = "child_id")]
    pub id: ChildId,
    #[serde(default)]
    pub username: String,
    #[serde(default, alias = "display_name", alias = "child_name")]
    pub name: Option<String>,
    #[serde(default, alias = "mastery_fraction", alias = "overall_mastery")]
    pub mastery: Mastery,
    #[serde(default, alias = "total_experience", alias = "xp")]
    pub total_xp: i64,
    #[serde(default, alias = "last_activity")]
    pub last_active: Option<DateTime<Utc>>,
}

impl ChildSummary {
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.username,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingInvite {
    #[serde(alias = "invite_code")]
    pub code: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterStats {
    #[serde(default)]
    pub total_children: u32,
    #[serde(default, alias = "active_children")]
    pub active_this_week: u32,
    #[serde(default)]
    pub average_mastery: Mastery,
    #[serde(default)]
    pub total_xp: i64,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListChildren;

impl ListChildren {
    pub fn new() -> Self {
        Self
    }
}

impl Request for ListChildren {
    type Data = ();
    type Response = Roster;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/api/parent/children/".into()
    }
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct LinkChild;

impl LinkChild {
    pub fn new() -> Self {
        Self
    }
}

impl Request for LinkChild {
    type Data = ();
    type Response = LinkChildResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/api/parent/link-child/".into()
    }
}

// Responses

/// The parent's linked children, outstanding invite codes and aggregates.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub children: Vec<ChildSummary>,
    #[serde(default)]
    pub pending_invites: Vec<PendingInvite>,
    #[serde(default)]
    pub stats: Option<RosterStats>,
}

impl Roster {
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.pending_invites.is_empty()
    }

    pub fn child(&self, id: ChildId) -> Option<&ChildSummary> {
        self.children.iter().find(|child| child.id == id)
    }
}

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct LinkChildResponse {
    #[serde(default)]
    pub invite_code: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub error: Option<String>,
}
