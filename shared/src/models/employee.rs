//! Employee Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Employee role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeRole {
    Chef,
    Delivery,
}

impl fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chef => write!(f, "chef"),
            Self::Delivery => write!(f, "delivery"),
        }
    }
}

/// Employee entity (chef or delivery)
///
/// Firing only clears `is_active`; the record is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub role: EmployeeRole,
    /// Base pay rate
    pub pay: f64,
    pub demotions: u32,
    pub bonuses: u32,
    /// Weighted complaint count (cumulative)
    pub complaints_count: u32,
    /// Weighted compliment count (cumulative)
    pub compliments_count: u32,
    pub rating_sum: u32,
    pub ratings_count: u32,
    /// False complaints filed by this employee; no transition depends on it
    pub warnings: u32,
    pub is_active: bool,
    pub hired_at: i64,
    pub updated_at: i64,
}

impl Employee {
    /// Average of all received ratings, `None` before the first rating
    pub fn average_rating(&self) -> Option<f64> {
        if self.ratings_count == 0 {
            return None;
        }
        Some(f64::from(self.rating_sum) / f64::from(self.ratings_count))
    }
}

/// Manual pay change requested by the manager
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayAdjustment {
    /// Raise by a percentage (10.0 = +10%)
    RaisePercent(f64),
    RaiseAmount(f64),
    /// Cut by a percentage (10.0 = -10%)
    CutPercent(f64),
    CutAmount(f64),
    Set(f64),
}
