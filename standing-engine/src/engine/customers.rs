//! Customer lifecycle: registration, deposits, warnings, promotion, closure

use serde::Serialize;
use shared::error::ErrorCode;
use shared::models::{ActorRef, Customer, CustomerRole, Employee};
use std::cmp::Ordering;

use super::{EngineError, EngineResult, StandingEngine, StandingEvent, Tx};
use crate::money;
use crate::rules::promotion::{self, PromotionOutcome};
use crate::rules::warnings::{self, RoleTransition, WarningOutcome, WarningReason};
use crate::utils::validation::{
    MAX_SHORT_TEXT_LEN, validate_email, validate_required_text,
};

/// Result of an approved closure request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClosureOutcome {
    pub refund: f64,
    pub blacklisted: bool,
}

impl StandingEngine {
    /// Register a new customer as an unapproved visitor.
    ///
    /// Usernames are unique (case-insensitive). A blacklisted customer's
    /// username or email cannot be registered again.
    pub fn register_customer(&self, username: &str, email: &str) -> EngineResult<Customer> {
        validate_required_text(username, "username", MAX_SHORT_TEXT_LEN)?;
        validate_email(email)?;
        let username = username.trim();
        let email = email.trim();

        self.transact(|tx| {
            for existing in tx.all::<Customer>()? {
                if existing.blacklisted && existing.matches_identity(username, email) {
                    tracing::warn!(username = %username, blacklisted_id = existing.id, "Registration refused: blacklisted identity");
                    return Err(EngineError::validation(
                        ErrorCode::CustomerBlacklisted,
                        format!("{username} is blacklisted"),
                    ));
                }
                if existing.username.eq_ignore_ascii_case(username) {
                    return Err(EngineError::validation(
                        ErrorCode::UsernameTaken,
                        format!("Username already taken: {username}"),
                    ));
                }
            }

            let customer = Customer {
                id: tx.next_id::<Customer>()?,
                username: username.to_string(),
                email: email.to_string(),
                role: CustomerRole::Visitor,
                approved: false,
                balance: 0.0,
                total_spent: 0.0,
                orders_count: 0,
                warnings: 0,
                complaints_count: 0,
                compliments_count: 0,
                upheld_complaints: 0,
                free_delivery_credits: 0,
                blacklisted: false,
                closure_requested: false,
                vip_since: None,
                created_at: tx.now,
                updated_at: tx.now,
            };
            tx.save(&customer)?;
            tracing::info!(customer_id = customer.id, username = %customer.username, "Customer registered");
            Ok(customer)
        })
    }

    /// Manager approval: visitor → registered
    pub fn approve_registration(&self, customer_id: i64) -> EngineResult<Customer> {
        self.transact(|tx| {
            let mut customer: Customer = tx.load(customer_id)?;
            if customer.blacklisted {
                return Err(EngineError::invalid_state(
                    ErrorCode::CustomerBlacklisted,
                    format!("Customer {customer_id} is blacklisted"),
                ));
            }
            if customer.approved {
                return Err(EngineError::invalid_state(
                    ErrorCode::InvalidState,
                    format!("Customer {customer_id} is already approved"),
                ));
            }

            customer.approved = true;
            customer.role = CustomerRole::Registered;
            customer.updated_at = tx.now;
            tx.save(&customer)?;
            tracing::info!(customer_id, "Registration approved");
            Ok(customer)
        })
    }

    /// Add funds; returns the new balance
    pub fn deposit(&self, customer_id: i64, amount: f64) -> EngineResult<f64> {
        let amount = money::require_positive(amount, "Deposit")?;
        if money::cmp(amount, self.config.max_deposit) == Ordering::Greater {
            return Err(EngineError::validation(
                ErrorCode::DepositLimitExceeded,
                format!(
                    "Deposit {amount:.2} exceeds the limit of {:.2}",
                    self.config.max_deposit
                ),
            ));
        }

        self.transact(|tx| {
            let mut customer: Customer = tx.load(customer_id)?;
            require_member(&customer)?;

            customer.balance = money::add(customer.balance, amount);
            customer.updated_at = tx.now;
            tx.save(&customer)?;
            tracing::info!(customer_id, amount, balance = customer.balance, "Deposit recorded");
            Ok(customer.balance)
        })
    }

    /// Re-evaluate VIP eligibility. No-op for VIPs and non-members.
    pub fn evaluate_promotion(&self, customer_id: i64) -> EngineResult<PromotionOutcome> {
        self.transact(|tx| {
            let mut customer: Customer = tx.load(customer_id)?;
            let outcome = tx.promote(&mut customer);
            if outcome.promoted {
                tx.save(&customer)?;
            }
            Ok(outcome)
        })
    }

    /// Issue one warning and apply downgrade / deregistration.
    ///
    /// Warnings against employees are only counted.
    pub fn add_warning(&self, actor: ActorRef, reason: WarningReason) -> EngineResult<WarningOutcome> {
        self.transact(|tx| tx.warn(actor, reason))
    }

    pub fn request_closure(&self, customer_id: i64) -> EngineResult<Customer> {
        self.transact(|tx| {
            let mut customer: Customer = tx.load(customer_id)?;
            require_member(&customer)?;
            if customer.closure_requested {
                return Err(EngineError::invalid_state(
                    ErrorCode::ClosureAlreadyRequested,
                    format!("Customer {customer_id} already requested closure"),
                ));
            }

            customer.closure_requested = true;
            customer.updated_at = tx.now;
            tx.save(&customer)?;
            tracing::info!(customer_id, "Closure requested");
            Ok(customer)
        })
    }

    pub fn deny_closure(&self, customer_id: i64) -> EngineResult<Customer> {
        self.transact(|tx| {
            let mut customer: Customer = tx.load(customer_id)?;
            require_closure_requested(&customer)?;

            customer.closure_requested = false;
            customer.updated_at = tx.now;
            tx.save(&customer)?;
            tracing::info!(customer_id, "Closure denied");
            Ok(customer)
        })
    }

    /// Close the account, refunding the full balance, optionally blacklisting
    pub fn approve_closure(&self, customer_id: i64, blacklist: bool) -> EngineResult<ClosureOutcome> {
        self.transact(|tx| {
            let mut customer: Customer = tx.load(customer_id)?;
            require_closure_requested(&customer)?;

            let refund = customer.balance;
            customer.balance = 0.0;
            customer.role = CustomerRole::Visitor;
            customer.approved = false;
            customer.closure_requested = false;
            customer.vip_since = None;
            customer.blacklisted |= blacklist;
            customer.updated_at = tx.now;
            tx.save(&customer)?;

            let outcome = ClosureOutcome {
                refund,
                blacklisted: customer.blacklisted,
            };
            tracing::info!(customer_id, refund, blacklisted = outcome.blacklisted, "Account closed");
            tx.emit(StandingEvent::AccountClosed {
                customer_id,
                refund,
                blacklisted: outcome.blacklisted,
            });
            Ok(outcome)
        })
    }

    /// Lift a blacklist: the customer returns as a registered member with a
    /// clean warning record
    pub fn unblacklist(&self, customer_id: i64) -> EngineResult<Customer> {
        self.transact(|tx| {
            let mut customer: Customer = tx.load(customer_id)?;
            if !customer.blacklisted {
                return Err(EngineError::invalid_state(
                    ErrorCode::InvalidState,
                    format!("Customer {customer_id} is not blacklisted"),
                ));
            }

            customer.blacklisted = false;
            customer.warnings = 0;
            customer.role = CustomerRole::Registered;
            customer.approved = true;
            customer.vip_since = None;
            customer.free_delivery_credits = 0;
            customer.updated_at = tx.now;
            tx.save(&customer)?;
            tracing::info!(customer_id, "Customer removed from blacklist");
            Ok(customer)
        })
    }
}

pub(super) fn require_member(customer: &Customer) -> EngineResult<()> {
    if customer.blacklisted {
        return Err(EngineError::validation(
            ErrorCode::CustomerBlacklisted,
            format!("Customer {} is blacklisted", customer.id),
        ));
    }
    if !customer.is_member() {
        return Err(EngineError::validation(
            ErrorCode::CustomerNotApproved,
            format!("Customer {} is not an approved member", customer.id),
        ));
    }
    Ok(())
}

fn require_closure_requested(customer: &Customer) -> EngineResult<()> {
    if !customer.closure_requested {
        return Err(EngineError::invalid_state(
            ErrorCode::ClosureNotRequested,
            format!("Customer {} has not requested closure", customer.id),
        ));
    }
    Ok(())
}

impl Tx<'_> {
    /// Add a warning to `actor`, save, and emit any resulting transition
    pub(super) fn warn(&mut self, actor: ActorRef, reason: WarningReason) -> EngineResult<WarningOutcome> {
        match actor {
            ActorRef::Employee(id) => {
                let mut employee: Employee = self.load(id)?;
                employee.warnings += 1;
                employee.updated_at = self.now;
                self.save(&employee)?;
                tracing::info!(employee_id = id, ?reason, warnings = employee.warnings, "Employee warned");
                Ok(WarningOutcome::recorded(employee.warnings))
            }
            ActorRef::Customer(id) => {
                let mut customer: Customer = self.load(id)?;
                let outcome = warnings::add_warning(&mut customer, self.config, self.now);
                self.save(&customer)?;
                tracing::info!(customer_id = id, ?reason, warnings = outcome.new_warning_count, "Customer warned");

                match outcome.role_transition {
                    RoleTransition::None => {}
                    RoleTransition::Downgraded => {
                        tracing::info!(customer_id = id, "VIP downgraded to registered");
                        self.emit(StandingEvent::Downgraded {
                            customer_id: id,
                            warnings: outcome.new_warning_count,
                        });
                    }
                    RoleTransition::Deregistered => {
                        tracing::warn!(customer_id = id, refund = outcome.refund_amount, "Customer deregistered and blacklisted");
                        self.emit(StandingEvent::Deregistered {
                            customer_id: id,
                            refund: outcome.refund_amount,
                        });
                    }
                }
                Ok(outcome)
            }
        }
    }

    /// Apply VIP promotion to a loaded customer; the caller saves it
    pub(super) fn promote(&mut self, customer: &mut Customer) -> PromotionOutcome {
        let outcome = promotion::evaluate_promotion(customer, self.config, self.now);
        if outcome.promoted {
            tracing::info!(customer_id = customer.id, total_spent = customer.total_spent, orders = customer.orders_count, "Customer promoted to VIP");
            self.emit(StandingEvent::Promoted {
                customer_id: customer.id,
                at: self.now,
            });
        }
        outcome
    }
}
