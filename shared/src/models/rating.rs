//! Rating Model

use serde::{Deserialize, Serialize};

/// Lowest accepted score
pub const MIN_SCORE: u8 = 1;
/// Highest accepted score
pub const MAX_SCORE: u8 = 5;

/// A single 1-5 score given to an employee for an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub id: i64,
    pub order_id: i64,
    pub customer_id: i64,
    pub employee_id: i64,
    pub score: u8,
    pub created_at: i64,
}

/// Rating submission for a delivered order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatingInput {
    /// Credited to the order's chef
    pub food: Option<u8>,
    /// Credited to the order's delivery person
    pub delivery: Option<u8>,
}
