//! Warning accrual
//!
//! After every warning:
//! 1. VIP at or above the downgrade threshold → Registered (count kept)
//! 2. Registered at or above the deregistration threshold → Visitor,
//!    blacklisted, full balance refunded
//!
//! Both steps run in the same pass, so a VIP may go straight to
//! deregistration when its count already exceeds both thresholds.

use serde::{Deserialize, Serialize};
use shared::models::{Customer, CustomerRole};

use crate::core::StandingConfig;

/// Why a warning was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningReason {
    /// Order rejected because the balance did not cover it
    InsufficientBalance,
    /// A complaint filed by this actor was dismissed
    FalseComplaint,
    /// A complaint against this actor was upheld
    UpheldComplaint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleTransition {
    None,
    Downgraded,
    Deregistered,
}

/// Result of adding one warning
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WarningOutcome {
    pub new_warning_count: u32,
    pub role_transition: RoleTransition,
    /// Close-and-refund signal, true only on the deregistering warning
    pub refund_triggered: bool,
    pub refund_amount: f64,
}

impl WarningOutcome {
    /// Warning recorded with no standing change
    pub fn recorded(new_warning_count: u32) -> Self {
        Self {
            new_warning_count,
            role_transition: RoleTransition::None,
            refund_triggered: false,
            refund_amount: 0.0,
        }
    }
}

/// Add one warning to a customer and apply the resulting transitions
pub fn add_warning(customer: &mut Customer, config: &StandingConfig, now: i64) -> WarningOutcome {
    customer.warnings += 1;
    customer.updated_at = now;
    let mut outcome = WarningOutcome::recorded(customer.warnings);

    if customer.role == CustomerRole::Vip && customer.warnings >= config.vip_downgrade_warnings {
        customer.role = CustomerRole::Registered;
        customer.vip_since = None;
        outcome.role_transition = RoleTransition::Downgraded;
    }

    if customer.role == CustomerRole::Registered && customer.warnings >= config.deregister_warnings
    {
        outcome.refund_amount = customer.balance;
        outcome.refund_triggered = true;
        outcome.role_transition = RoleTransition::Deregistered;

        customer.role = CustomerRole::Visitor;
        customer.approved = false;
        customer.blacklisted = true;
        customer.closure_requested = false;
        customer.balance = 0.0;
    }

    outcome
}
