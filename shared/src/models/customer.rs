//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer standing (顾客等级)
///
/// `Visitor` covers both never-approved registrations and deregistered
/// accounts; `blacklisted` tells the two apart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerRole {
    Visitor,
    Registered,
    Vip,
}

impl CustomerRole {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Visitor => "visitor",
            Self::Registered => "registered",
            Self::Vip => "vip",
        }
    }
}

/// Customer entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: CustomerRole,
    pub approved: bool,
    /// Deposit balance available for orders
    pub balance: f64,
    /// Cumulative spend over completed orders
    pub total_spent: f64,
    /// Completed-order count
    pub orders_count: u32,
    pub warnings: u32,
    /// Weighted complaint count received as a target
    pub complaints_count: u32,
    /// Weighted compliment count received as a target
    pub compliments_count: u32,
    /// Complaints against this customer resolved as upheld
    pub upheld_complaints: u32,
    pub free_delivery_credits: u32,
    pub blacklisted: bool,
    pub closure_requested: bool,
    pub vip_since: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Customer {
    /// Approved, not blacklisted and holding a registered or VIP role
    pub fn is_member(&self) -> bool {
        self.approved && !self.blacklisted && self.role != CustomerRole::Visitor
    }

    pub fn is_vip(&self) -> bool {
        self.role == CustomerRole::Vip
    }

    /// Identity match used to refuse re-registration of blacklisted customers
    pub fn matches_identity(&self, username: &str, email: &str) -> bool {
        self.username.eq_ignore_ascii_case(username.trim())
            || (!email.trim().is_empty() && self.email.eq_ignore_ascii_case(email.trim()))
    }
}
