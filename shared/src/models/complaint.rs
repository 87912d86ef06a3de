//! Complaint / Compliment Model

use super::actor::ActorRef;
use serde::{Deserialize, Serialize};

/// Complaint or compliment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReputationKind {
    Complaint,
    Compliment,
}

/// Complaint lifecycle
///
/// ```text
/// Pending ──dispute──▶ Disputed
///    │                    │
///    └──────resolve───────┴──▶ Upheld | Dismissed (terminal)
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintStatus {
    Pending,
    Disputed,
    Upheld,
    Dismissed,
}

impl ComplaintStatus {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Upheld | Self::Dismissed)
    }
}

/// Manager decision on a complaint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Resolution {
    /// The complaint is valid
    Upheld,
    /// The complaint is false
    Dismissed,
}

impl From<Resolution> for ComplaintStatus {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Upheld => Self::Upheld,
            Resolution::Dismissed => Self::Dismissed,
        }
    }
}

/// Complaint or compliment record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    pub id: i64,
    pub filer: ActorRef,
    pub target: ActorRef,
    pub kind: ReputationKind,
    pub category: String,
    pub description: String,
    /// 2 when the filer was VIP at filing time, else 1; never recomputed
    pub weight: u32,
    pub status: ComplaintStatus,
    pub created_at: i64,
    pub resolved_at: Option<i64>,
}
