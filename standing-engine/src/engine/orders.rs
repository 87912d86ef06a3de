//! Order flow and ratings
//!
//! Pending → Preparing → Ready → Delivering → Delivered. Completing an order
//! updates the customer's spend and may promote them; rating it feeds the
//! chef's and delivery person's performance checks.

use serde::Serialize;
use shared::error::ErrorCode;
use shared::models::{
    ActorRef, Customer, Employee, EmployeeRole, MAX_SCORE, MIN_SCORE, Order, OrderStatus, Rating,
    RatingInput,
};
use std::cmp::Ordering;

use super::customers::require_member;
use super::{EngineError, EngineResult, StandingEngine, Tx};
use crate::money;
use crate::rules::pricing;
use crate::rules::{PerformanceOutcome, PromotionOutcome, WarningOutcome, WarningReason};

/// Result of placing an order
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderPlacement {
    Accepted { order: Order },
    /// Balance did not cover the total; the customer was warned
    Rejected {
        total: f64,
        balance: f64,
        warning: WarningOutcome,
    },
}

/// Performance checks triggered by a rating
#[derive(Debug, Clone, Default, Serialize)]
pub struct RatingOutcome {
    pub chef: Option<PerformanceOutcome>,
    pub delivery: Option<PerformanceOutcome>,
}

impl StandingEngine {
    /// Place an order, debiting the balance.
    ///
    /// An insufficient balance is not an error: the customer gets a warning
    /// (which may downgrade or deregister them) and the order is rejected.
    pub fn place_order(&self, customer_id: i64, subtotal: f64) -> EngineResult<OrderPlacement> {
        let subtotal = money::require_positive(subtotal, "Order subtotal")?;

        self.transact(|tx| {
            let mut customer: Customer = tx.load(customer_id)?;
            require_member(&customer)?;

            let quote = pricing::quote_order(&customer, subtotal, tx.config);
            if money::cmp(customer.balance, quote.total) == Ordering::Less {
                tracing::info!(customer_id, total = quote.total, balance = customer.balance, "Order rejected: insufficient balance");
                let balance = customer.balance;
                let warning = tx.warn(ActorRef::Customer(customer_id), WarningReason::InsufficientBalance)?;
                return Ok(OrderPlacement::Rejected {
                    total: quote.total,
                    balance,
                    warning,
                });
            }

            customer.balance = money::sub_floor_zero(customer.balance, quote.total);
            if quote.free_delivery {
                customer.free_delivery_credits += 1;
            }
            customer.updated_at = tx.now;
            tx.save(&customer)?;

            let order = Order {
                id: tx.next_id::<Order>()?,
                customer_id,
                subtotal: quote.subtotal,
                discount: quote.discount,
                total: quote.total,
                status: OrderStatus::Pending,
                chef_id: None,
                delivery_person_id: None,
                delivery_fee: None,
                free_delivery: quote.free_delivery,
                food_rating: None,
                delivery_rating: None,
                created_at: tx.now,
                updated_at: tx.now,
            };
            tx.save(&order)?;
            tracing::info!(order_id = order.id, customer_id, total = order.total, discount = order.discount, "Order placed");
            Ok(OrderPlacement::Accepted { order })
        })
    }

    /// Pending → Preparing under an active chef
    pub fn assign_chef(&self, order_id: i64, chef_id: i64) -> EngineResult<Order> {
        self.transact(|tx| {
            let mut order: Order = tx.load(order_id)?;
            require_status(&order, &[OrderStatus::Pending])?;
            let chef: Employee = tx.load(chef_id)?;
            require_active_role(&chef, EmployeeRole::Chef)?;

            order.chef_id = Some(chef_id);
            order.status = OrderStatus::Preparing;
            order.updated_at = tx.now;
            tx.save(&order)?;
            tracing::info!(order_id, chef_id, "Chef assigned");
            Ok(order)
        })
    }

    /// Kitchen done: the order opens for delivery bids
    pub fn mark_order_ready(&self, order_id: i64) -> EngineResult<Order> {
        self.transact(|tx| {
            let mut order: Order = tx.load(order_id)?;
            require_status(&order, &[OrderStatus::Pending, OrderStatus::Preparing])?;

            order.status = OrderStatus::Ready;
            order.updated_at = tx.now;
            tx.save(&order)?;
            tracing::info!(order_id, "Order ready for delivery");
            Ok(order)
        })
    }

    /// Delivering → Delivered; records spend and evaluates VIP promotion
    pub fn complete_order(&self, order_id: i64) -> EngineResult<PromotionOutcome> {
        self.transact(|tx| {
            let mut order: Order = tx.load(order_id)?;
            require_status(&order, &[OrderStatus::Delivering])?;
            order.status = OrderStatus::Delivered;
            order.updated_at = tx.now;
            tx.save(&order)?;

            let mut customer: Customer = tx.load(order.customer_id)?;
            customer.total_spent = money::add(customer.total_spent, order.total);
            customer.orders_count += 1;
            customer.updated_at = tx.now;
            let outcome = tx.promote(&mut customer);
            tx.save(&customer)?;

            tracing::info!(order_id, customer_id = customer.id, total_spent = customer.total_spent, "Order delivered");
            Ok(outcome)
        })
    }

    /// Rate a delivered order. The food score goes to the chef, the delivery
    /// score to the delivery person; each rated employee is then checked.
    pub fn submit_rating(
        &self,
        order_id: i64,
        customer_id: i64,
        input: RatingInput,
    ) -> EngineResult<RatingOutcome> {
        if input.food.is_none() && input.delivery.is_none() {
            return Err(EngineError::validation(
                ErrorCode::InvalidRating,
                "At least one score is required",
            ));
        }
        for score in [input.food, input.delivery].into_iter().flatten() {
            if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
                return Err(EngineError::validation(
                    ErrorCode::InvalidRating,
                    format!("Score must be between {MIN_SCORE} and {MAX_SCORE}, got {score}"),
                ));
            }
        }

        self.transact(|tx| {
            let mut order: Order = tx.load(order_id)?;
            if order.customer_id != customer_id {
                return Err(EngineError::validation(
                    ErrorCode::PermissionDenied,
                    format!("Order {order_id} does not belong to customer {customer_id}"),
                ));
            }
            require_status(&order, &[OrderStatus::Delivered])?;
            if order.is_rated() {
                return Err(EngineError::invalid_state(
                    ErrorCode::OrderAlreadyRated,
                    format!("Order {order_id} is already rated"),
                ));
            }

            let mut outcome = RatingOutcome::default();
            if let Some(score) = input.food {
                let chef_id = order.chef_id.ok_or_else(|| {
                    EngineError::validation(
                        ErrorCode::InvalidRating,
                        format!("Order {order_id} has no chef to rate"),
                    )
                })?;
                outcome.chef = Some(tx.rate(&order, chef_id, score)?);
                order.food_rating = Some(score);
            }
            if let Some(score) = input.delivery {
                let delivery_id = order.delivery_person_id.ok_or_else(|| {
                    EngineError::validation(
                        ErrorCode::InvalidRating,
                        format!("Order {order_id} has no delivery person to rate"),
                    )
                })?;
                outcome.delivery = Some(tx.rate(&order, delivery_id, score)?);
                order.delivery_rating = Some(score);
            }

            order.updated_at = tx.now;
            tx.save(&order)?;
            Ok(outcome)
        })
    }
}

impl Tx<'_> {
    fn rate(&mut self, order: &Order, employee_id: i64, score: u8) -> EngineResult<PerformanceOutcome> {
        let mut employee: Employee = self.load(employee_id)?;
        employee.rating_sum += u32::from(score);
        employee.ratings_count += 1;
        employee.updated_at = self.now;
        self.save(&employee)?;

        let rating = Rating {
            id: self.next_id::<Rating>()?,
            order_id: order.id,
            customer_id: order.customer_id,
            employee_id,
            score,
            created_at: self.now,
        };
        self.save(&rating)?;
        tracing::info!(order_id = order.id, employee_id, score, "Rating recorded");

        self.check_performance(employee_id)
    }
}

pub(super) fn require_status(order: &Order, allowed: &[OrderStatus]) -> EngineResult<()> {
    if !allowed.contains(&order.status) {
        return Err(EngineError::invalid_state(
            ErrorCode::OrderInvalidStatus,
            format!("Order {} is {:?}, expected one of {:?}", order.id, order.status, allowed),
        ));
    }
    Ok(())
}

pub(super) fn require_active_role(employee: &Employee, role: EmployeeRole) -> EngineResult<()> {
    if !employee.is_active {
        return Err(EngineError::validation(
            ErrorCode::EmployeeInactive,
            format!("Employee {} is not active", employee.id),
        ));
    }
    if employee.role != role {
        return Err(EngineError::validation(
            ErrorCode::WrongEmployeeRole,
            format!("Employee {} is {}, not {}", employee.id, employee.role, role),
        ));
    }
    Ok(())
}
