//! Standing rules
//!
//! Pure functions over a single record and [`StandingConfig`](crate::core::StandingConfig).
//! The engine loads records inside a write transaction, applies these
//! rules, then saves the result.

pub mod bids;
pub mod performance;
pub mod pricing;
pub mod promotion;
pub mod reputation;
pub mod staffing;
pub mod warnings;

#[cfg(test)]
pub(crate) mod test_support;

pub use performance::PerformanceOutcome;
pub use pricing::OrderQuote;
pub use promotion::PromotionOutcome;
pub use reputation::ReputationCounts;
pub use warnings::{RoleTransition, WarningOutcome, WarningReason};
