//! VIP promotion
//!
//! A registered customer becomes VIP after a completed order when either
//! condition holds:
//! - cumulative spend reached the spend threshold
//! - completed orders reached the order threshold with no upheld complaint
//!   against the customer

use serde::Serialize;
use shared::models::{Customer, CustomerRole};
use std::cmp::Ordering;

use crate::core::StandingConfig;
use crate::money;

/// Result of a promotion evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PromotionOutcome {
    pub promoted: bool,
    pub new_role: CustomerRole,
}

/// Whether the customer's history satisfies either VIP condition
pub fn qualifies_for_vip(customer: &Customer, config: &StandingConfig) -> bool {
    let spend_reached =
        money::cmp(customer.total_spent, config.vip_spend_threshold) != Ordering::Less;
    let clean_orders = customer.orders_count >= config.vip_order_threshold
        && customer.upheld_complaints == 0;
    spend_reached || clean_orders
}

/// Promote a qualifying registered member to VIP.
///
/// Idempotent: VIPs, visitors and non-members are returned unchanged.
pub fn evaluate_promotion(
    customer: &mut Customer,
    config: &StandingConfig,
    now: i64,
) -> PromotionOutcome {
    if customer.role != CustomerRole::Registered
        || !customer.is_member()
        || !qualifies_for_vip(customer, config)
    {
        return PromotionOutcome {
            promoted: false,
            new_role: customer.role,
        };
    }

    customer.role = CustomerRole::Vip;
    customer.vip_since = Some(now);
    customer.updated_at = now;

    PromotionOutcome {
        promoted: true,
        new_role: CustomerRole::Vip,
    }
}
