//! Delivery bidding
//!
//! Active delivery staff bid on ready, unassigned orders. The manager
//! accepts one bid; picking anything but the lowest requires a memo.

use serde::Serialize;
use shared::error::ErrorCode;
use shared::models::{BidStatus, DeliveryBid, Employee, EmployeeRole, Order, OrderStatus};

use super::orders::{require_active_role, require_status};
use super::{EngineError, EngineResult, StandingEngine, StandingEvent};
use crate::money;
use crate::rules::bids;

/// Result of accepting a bid
#[derive(Debug, Clone, Serialize)]
pub struct BidAcceptance {
    pub accepted: DeliveryBid,
    /// Other bids on the order, now rejected
    pub rejected: Vec<DeliveryBid>,
    pub order: Order,
}

impl StandingEngine {
    pub fn submit_bid(&self, order_id: i64, bidder_id: i64, amount: f64) -> EngineResult<DeliveryBid> {
        let amount = money::require_positive(amount, "Bid amount")?;

        self.transact(|tx| {
            let order: Order = tx.load(order_id)?;
            require_open_for_bids(&order)?;
            let bidder: Employee = tx.load(bidder_id)?;
            require_active_role(&bidder, EmployeeRole::Delivery)?;

            let duplicate = tx.all::<DeliveryBid>()?.iter().any(|b| {
                b.order_id == order_id && b.bidder_id == bidder_id && b.status == BidStatus::Pending
            });
            if duplicate {
                return Err(EngineError::validation(
                    ErrorCode::DuplicateBid,
                    format!("Employee {bidder_id} already has a pending bid on order {order_id}"),
                ));
            }

            let bid = DeliveryBid {
                id: tx.next_id::<DeliveryBid>()?,
                order_id,
                bidder_id,
                amount,
                status: BidStatus::Pending,
                memo: None,
                created_at: tx.now,
            };
            tx.save(&bid)?;
            tracing::info!(bid_id = bid.id, order_id, bidder_id, amount = bid.amount, "Delivery bid submitted");
            Ok(bid)
        })
    }

    /// Accept a pending bid: the bidder gets the delivery, other pending bids
    /// on the order are rejected, and the order moves to Delivering.
    pub fn accept_bid(&self, order_id: i64, bid_id: i64, memo: Option<&str>) -> EngineResult<BidAcceptance> {
        self.transact(|tx| {
            let mut accepted: DeliveryBid = tx.load(bid_id)?;
            if accepted.order_id != order_id {
                return Err(EngineError::not_found::<DeliveryBid>(bid_id));
            }
            if accepted.status != BidStatus::Pending {
                return Err(EngineError::invalid_state(
                    ErrorCode::BidNotPending,
                    format!("Bid {bid_id} is {:?}", accepted.status),
                ));
            }

            let mut order: Order = tx.load(order_id)?;
            require_open_for_bids(&order)?;
            let bidder: Employee = tx.load(accepted.bidder_id)?;
            require_active_role(&bidder, EmployeeRole::Delivery)?;

            let order_bids: Vec<DeliveryBid> = tx
                .all::<DeliveryBid>()?
                .into_iter()
                .filter(|b| b.order_id == order_id)
                .collect();
            accepted.memo = bids::check_memo(&accepted, &order_bids, memo)?;
            accepted.status = BidStatus::Accepted;
            tx.save(&accepted)?;

            let mut rejected = Vec::new();
            for mut other in order_bids {
                if other.id == bid_id || other.status != BidStatus::Pending {
                    continue;
                }
                other.status = BidStatus::Rejected;
                tx.save(&other)?;
                rejected.push(other);
            }

            order.delivery_person_id = Some(accepted.bidder_id);
            order.delivery_fee = Some(accepted.amount);
            order.status = OrderStatus::Delivering;
            order.updated_at = tx.now;
            tx.save(&order)?;

            tracing::info!(order_id, bid_id, bidder_id = accepted.bidder_id, amount = accepted.amount, rejected = rejected.len(), "Delivery bid accepted");
            tx.emit(StandingEvent::BidAccepted {
                order_id,
                bid_id,
                bidder_id: accepted.bidder_id,
                amount: accepted.amount,
            });

            Ok(BidAcceptance {
                accepted,
                rejected,
                order,
            })
        })
    }
}

fn require_open_for_bids(order: &Order) -> EngineResult<()> {
    require_status(order, &[OrderStatus::Ready])?;
    if order.delivery_person_id.is_some() {
        return Err(EngineError::invalid_state(
            ErrorCode::OrderAlreadyAssigned,
            format!("Order {} already has a delivery person", order.id),
        ));
    }
    Ok(())
}
