//! Order pricing for members

use serde::Serialize;
use shared::models::Customer;

use crate::core::StandingConfig;
use crate::money;

/// Price of an order for a given customer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrderQuote {
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
    /// Order earns a free-delivery credit
    pub free_delivery: bool,
}

/// VIPs get the configured discount, and every Nth order (counting the one
/// being placed) earns a free-delivery credit.
pub fn quote_order(customer: &Customer, subtotal: f64, config: &StandingConfig) -> OrderQuote {
    if !customer.is_vip() {
        return OrderQuote {
            subtotal,
            discount: 0.0,
            total: subtotal,
            free_delivery: false,
        };
    }

    let discount = money::percent_of(subtotal, config.vip_discount_percent);
    let total = money::sub_floor_zero(subtotal, discount);
    let ratio = config.vip_free_delivery_ratio.max(1);
    let free_delivery = customer.orders_count > 0 && (customer.orders_count + 1) % ratio == 0;

    OrderQuote {
        subtotal,
        discount,
        total,
        free_delivery,
    }
}
