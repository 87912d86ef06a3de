//! Order Model

use serde::{Deserialize, Serialize};

/// Order lifecycle
///
/// Pending → Preparing → Ready → Delivering → Delivered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivering,
    Delivered,
}

/// Order record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    /// Cart total before discounts
    pub subtotal: f64,
    pub discount: f64,
    /// Amount debited from the customer balance
    pub total: f64,
    pub status: OrderStatus,
    pub chef_id: Option<i64>,
    pub delivery_person_id: Option<i64>,
    /// Accepted bid amount
    pub delivery_fee: Option<f64>,
    pub free_delivery: bool,
    pub food_rating: Option<u8>,
    pub delivery_rating: Option<u8>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Order {
    pub fn is_rated(&self) -> bool {
        self.food_rating.is_some() || self.delivery_rating.is_some()
    }
}
