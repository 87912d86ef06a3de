//! Delivery Bid Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BidStatus {
    Pending,
    Accepted,
    Rejected,
}

/// Delivery bid placed by a delivery employee on a ready order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryBid {
    pub id: i64,
    pub order_id: i64,
    /// Delivery employee id
    pub bidder_id: i64,
    pub amount: f64,
    pub status: BidStatus,
    /// Manager justification, set when a non-minimum bid is accepted
    pub memo: Option<String>,
    pub created_at: i64,
}
