//! Complaint and compliment weighting
//!
//! Filings by a VIP count double. A compliment raises the target's
//! compliment count and cancels up to the same weight of complaints.

use serde::Serialize;
use shared::models::{Customer, Employee, ReputationKind};

/// Weight of a filing made by a VIP customer
pub const VIP_WEIGHT: u32 = 2;
pub const STANDARD_WEIGHT: u32 = 1;

pub fn filing_weight(filer_is_vip: bool) -> u32 {
    if filer_is_vip {
        VIP_WEIGHT
    } else {
        STANDARD_WEIGHT
    }
}

/// Weighted counters after a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReputationCounts {
    pub complaints: u32,
    pub compliments: u32,
}

/// Anything that receives complaints and compliments
pub trait ReputationTarget {
    fn counters_mut(&mut self) -> (&mut u32, &mut u32);
    fn counts(&self) -> ReputationCounts;
}

macro_rules! impl_reputation_target {
    ($ty:ty) => {
        impl ReputationTarget for $ty {
            fn counters_mut(&mut self) -> (&mut u32, &mut u32) {
                (&mut self.complaints_count, &mut self.compliments_count)
            }

            fn counts(&self) -> ReputationCounts {
                ReputationCounts {
                    complaints: self.complaints_count,
                    compliments: self.compliments_count,
                }
            }
        }
    };
}

impl_reputation_target!(Customer);
impl_reputation_target!(Employee);

/// Apply a new filing to its target
pub fn apply_filing<T: ReputationTarget>(
    target: &mut T,
    kind: ReputationKind,
    weight: u32,
) -> ReputationCounts {
    let (complaints, compliments) = target.counters_mut();
    match kind {
        ReputationKind::Complaint => *complaints += weight,
        ReputationKind::Compliment => {
            *compliments += weight;
            *complaints -= weight.min(*complaints);
        }
    }
    target.counts()
}

/// Remove a dismissed complaint's weight, floored at zero
pub fn remove_complaint_weight<T: ReputationTarget>(
    target: &mut T,
    weight: u32,
) -> ReputationCounts {
    let (complaints, _) = target.counters_mut();
    *complaints = complaints.saturating_sub(weight);
    target.counts()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{customer, employee};
    use shared::models::{CustomerRole, EmployeeRole};

    #[test]
    fn test_vip_filings_weigh_double() {
        assert_eq!(filing_weight(true), 2);
        assert_eq!(filing_weight(false), 1);
    }

    #[test]
    fn test_complaint_adds_weight() {
        let mut chef = employee(EmployeeRole::Chef, 5000.0);
        apply_filing(&mut chef, ReputationKind::Complaint, 2);
        let counts = apply_filing(&mut chef, ReputationKind::Complaint, 1);
        assert_eq!(counts.complaints, 3);
        assert_eq!(counts.compliments, 0);
    }

    #[test]
    fn test_compliment_cancels_complaints() {
        let mut chef = employee(EmployeeRole::Chef, 5000.0);
        chef.complaints_count = 1;

        let counts = apply_filing(&mut chef, ReputationKind::Compliment, 2);
        assert_eq!(counts.compliments, 2);
        assert_eq!(counts.complaints, 0);
    }

    #[test]
    fn test_compliment_on_clean_record() {
        let mut c = customer(CustomerRole::Registered);
        let counts = apply_filing(&mut c, ReputationKind::Compliment, 1);
        assert_eq!(
            counts,
            ReputationCounts {
                complaints: 0,
                compliments: 1
            }
        );
    }

    #[test]
    fn test_dismissal_floors_at_zero() {
        let mut c = customer(CustomerRole::Registered);
        c.complaints_count = 1;
        assert_eq!(remove_complaint_weight(&mut c, 2).complaints, 0);
    }
}
