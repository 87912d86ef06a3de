//! Standing events broadcast after a transition set commits

use serde::{Deserialize, Serialize};
use shared::models::Resolution;

/// Why an employee left active staff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FireReason {
    /// Reached the demotion limit
    Performance,
    /// Manager action
    Manual,
}

/// Standing transition notification
///
/// Published only once the operation's transaction has committed, so a
/// subscriber never sees a change that was rolled back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StandingEvent {
    Promoted {
        customer_id: i64,
        at: i64,
    },
    Downgraded {
        customer_id: i64,
        warnings: u32,
    },
    /// Account closed by warnings; the balance is refunded out of band
    Deregistered {
        customer_id: i64,
        refund: f64,
    },
    Demoted {
        employee_id: i64,
        demotions: u32,
        new_pay: f64,
    },
    Fired {
        employee_id: i64,
        reason: FireReason,
    },
    BonusApplied {
        employee_id: i64,
        new_pay: f64,
    },
    ComplaintResolved {
        complaint_id: i64,
        resolution: Resolution,
    },
    BidAccepted {
        order_id: i64,
        bid_id: i64,
        bidder_id: i64,
        amount: f64,
    },
    /// Closure request approved by a manager
    AccountClosed {
        customer_id: i64,
        refund: f64,
        blacklisted: bool,
    },
}
