//! Complaints and compliments
//!
//! Filing adjusts the target's weighted counters immediately. A complaint
//! can then be disputed by its target and resolved by a manager:
//!
//! ```text
//! Pending ──dispute──▶ Disputed
//!    │                    │
//!    └──────resolve───────┴──▶ Upheld | Dismissed
//! ```
//!
//! - Upheld against a customer: warning to the customer
//! - Upheld against an employee: performance check
//! - Dismissed: the weight is removed from the target and the filer is
//!   warned for a false complaint

use serde::Serialize;
use shared::error::ErrorCode;
use shared::models::{
    ActorRef, Complaint, ComplaintStatus, Customer, Employee, EmployeeRole, ReputationKind,
    Resolution,
};

use super::{EngineError, EngineResult, StandingEngine, StandingEvent, Tx};
use crate::rules::reputation::{self, ReputationCounts, ReputationTarget};
use crate::rules::{PerformanceOutcome, WarningOutcome, WarningReason};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};

/// Result of filing a complaint or compliment
#[derive(Debug, Clone, Serialize)]
pub struct FilingOutcome {
    pub complaint: Complaint,
    pub weight_applied: u32,
    /// Target counters after the filing
    pub target_counts: ReputationCounts,
}

/// Result of resolving a complaint
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionOutcome {
    pub complaint: Complaint,
    /// Who was warned, and the warning's effect
    pub warning: Option<(ActorRef, WarningOutcome)>,
    /// Present when the target is an employee
    pub performance: Option<PerformanceOutcome>,
    pub target_counts: ReputationCounts,
}

impl StandingEngine {
    /// File a complaint or compliment.
    ///
    /// Filers are approved customers, or active delivery staff filing about
    /// a customer. A VIP filer's entry weighs double.
    pub fn file_reputation_event(
        &self,
        filer: ActorRef,
        target: ActorRef,
        kind: ReputationKind,
        category: &str,
        description: &str,
    ) -> EngineResult<FilingOutcome> {
        validate_required_text(category, "category", MAX_NAME_LEN)?;
        validate_optional_text(Some(description), "description", MAX_NOTE_LEN)?;
        if filer == target {
            return Err(EngineError::validation(
                ErrorCode::SelfComplaint,
                format!("{filer} cannot file about themselves"),
            ));
        }

        self.transact(|tx| {
            let weight = match filer {
                ActorRef::Customer(id) => {
                    let customer: Customer = tx.load(id)?;
                    super::customers::require_member(&customer)?;
                    reputation::filing_weight(customer.is_vip())
                }
                ActorRef::Employee(id) => {
                    let employee: Employee = tx.load(id)?;
                    super::orders::require_active_role(&employee, EmployeeRole::Delivery)?;
                    if !target.is_customer() {
                        return Err(EngineError::validation(
                            ErrorCode::PermissionDenied,
                            "Delivery staff may only file about customers",
                        ));
                    }
                    reputation::STANDARD_WEIGHT
                }
            };

            let target_counts = match target {
                ActorRef::Customer(id) => {
                    let mut customer: Customer = tx.load(id)?;
                    if !customer.is_member() {
                        return Err(invalid_target(target));
                    }
                    let counts = reputation::apply_filing(&mut customer, kind, weight);
                    customer.updated_at = tx.now;
                    tx.save(&customer)?;
                    counts
                }
                ActorRef::Employee(id) => {
                    let mut employee: Employee = tx.load(id)?;
                    if !employee.is_active {
                        return Err(invalid_target(target));
                    }
                    let counts = reputation::apply_filing(&mut employee, kind, weight);
                    employee.updated_at = tx.now;
                    tx.save(&employee)?;
                    counts
                }
            };

            let complaint = Complaint {
                id: tx.next_id::<Complaint>()?,
                filer,
                target,
                kind,
                category: category.trim().to_string(),
                description: description.trim().to_string(),
                weight,
                status: ComplaintStatus::Pending,
                created_at: tx.now,
                resolved_at: None,
            };
            tx.save(&complaint)?;
            tracing::info!(complaint_id = complaint.id, %filer, %target, ?kind, weight, "Reputation event filed");

            Ok(FilingOutcome {
                complaint,
                weight_applied: weight,
                target_counts,
            })
        })
    }

    /// The target contests a pending complaint
    pub fn dispute_complaint(&self, complaint_id: i64, disputer: ActorRef) -> EngineResult<Complaint> {
        self.transact(|tx| {
            let mut complaint: Complaint = tx.load(complaint_id)?;
            require_complaint(&complaint)?;
            if complaint.target != disputer {
                return Err(EngineError::validation(
                    ErrorCode::ComplaintNotDisputable,
                    format!("Only the target may dispute complaint {complaint_id}"),
                ));
            }
            match complaint.status {
                ComplaintStatus::Pending => {}
                ComplaintStatus::Disputed => {
                    return Err(EngineError::invalid_state(
                        ErrorCode::ComplaintNotDisputable,
                        format!("Complaint {complaint_id} is already disputed"),
                    ));
                }
                ComplaintStatus::Upheld | ComplaintStatus::Dismissed => {
                    return Err(already_resolved(complaint_id));
                }
            }

            complaint.status = ComplaintStatus::Disputed;
            tx.save(&complaint)?;
            tracing::info!(complaint_id, %disputer, "Complaint disputed");
            Ok(complaint)
        })
    }

    /// Manager decision on a pending or disputed complaint
    pub fn resolve_complaint(
        &self,
        complaint_id: i64,
        resolution: Resolution,
    ) -> EngineResult<ResolutionOutcome> {
        self.transact(|tx| {
            let mut complaint: Complaint = tx.load(complaint_id)?;
            require_complaint(&complaint)?;
            if complaint.status.is_resolved() {
                return Err(already_resolved(complaint_id));
            }

            complaint.status = resolution.into();
            complaint.resolved_at = Some(tx.now);
            tx.save(&complaint)?;

            let (warning, performance, target_counts) = match resolution {
                Resolution::Upheld => tx.uphold(&complaint)?,
                Resolution::Dismissed => tx.dismiss(&complaint)?,
            };

            tracing::info!(complaint_id, ?resolution, target = %complaint.target, "Complaint resolved");
            tx.emit(StandingEvent::ComplaintResolved {
                complaint_id,
                resolution,
            });

            Ok(ResolutionOutcome {
                complaint,
                warning,
                performance,
                target_counts,
            })
        })
    }
}

type ResolutionEffects = (
    Option<(ActorRef, WarningOutcome)>,
    Option<PerformanceOutcome>,
    ReputationCounts,
);

impl Tx<'_> {
    fn uphold(&mut self, complaint: &Complaint) -> EngineResult<ResolutionEffects> {
        match complaint.target {
            ActorRef::Customer(id) => {
                let mut customer: Customer = self.load(id)?;
                customer.upheld_complaints += 1;
                self.save(&customer)?;
                let warning = self.warn(complaint.target, WarningReason::UpheldComplaint)?;
                let customer: Customer = self.load(id)?;
                Ok((Some((complaint.target, warning)), None, customer.counts()))
            }
            ActorRef::Employee(id) => {
                let performance = self.check_performance(id)?;
                let employee: Employee = self.load(id)?;
                Ok((None, Some(performance), employee.counts()))
            }
        }
    }

    fn dismiss(&mut self, complaint: &Complaint) -> EngineResult<ResolutionEffects> {
        let (performance, target_counts) = match complaint.target {
            ActorRef::Customer(id) => {
                let mut customer: Customer = self.load(id)?;
                let counts = reputation::remove_complaint_weight(&mut customer, complaint.weight);
                customer.updated_at = self.now;
                self.save(&customer)?;
                (None, counts)
            }
            ActorRef::Employee(id) => {
                let mut employee: Employee = self.load(id)?;
                let counts = reputation::remove_complaint_weight(&mut employee, complaint.weight);
                employee.updated_at = self.now;
                self.save(&employee)?;
                (Some(self.check_performance(id)?), counts)
            }
        };

        let warning = self.warn(complaint.filer, WarningReason::FalseComplaint)?;
        Ok((Some((complaint.filer, warning)), performance, target_counts))
    }
}

fn require_complaint(complaint: &Complaint) -> EngineResult<()> {
    if complaint.kind != ReputationKind::Complaint {
        return Err(EngineError::validation(
            ErrorCode::InvalidRequest,
            format!("Entry {} is a compliment, not a complaint", complaint.id),
        ));
    }
    Ok(())
}

/// Only approved members and active staff can be filed about
fn invalid_target(target: ActorRef) -> EngineError {
    EngineError::validation(
        ErrorCode::InvalidRequest,
        format!("{target} is not an active member or employee"),
    )
}

fn already_resolved(complaint_id: i64) -> EngineError {
    EngineError::invalid_state(
        ErrorCode::ComplaintAlreadyResolved,
        format!("Complaint {complaint_id} is already resolved"),
    )
}
