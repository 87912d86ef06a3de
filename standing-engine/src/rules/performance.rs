//! Employee performance rules
//!
//! Demotion when the average rating is below the floor or complaints reach
//! the limit; the employee is fired at the demotion limit. Bonus when the
//! average rating is above the ceiling or compliments reach the limit.
//! Demotion is checked first, so a bonus applies to the already-cut pay.

use serde::Serialize;
use shared::models::Employee;

use crate::core::StandingConfig;
use crate::money;

/// Result of one performance check
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceOutcome {
    pub demoted: bool,
    pub fired: bool,
    pub bonus_applied: bool,
    pub new_pay: f64,
}

impl PerformanceOutcome {
    fn unchanged(pay: f64) -> Self {
        Self {
            demoted: false,
            fired: false,
            bonus_applied: false,
            new_pay: pay,
        }
    }
}

pub fn demotion_due(employee: &Employee, config: &StandingConfig) -> bool {
    let low_rating = employee
        .average_rating()
        .is_some_and(|avg| avg < config.demotion_rating_threshold);
    low_rating || employee.complaints_count >= config.demotion_complaint_threshold
}

pub fn bonus_due(employee: &Employee, config: &StandingConfig) -> bool {
    let high_rating = employee
        .average_rating()
        .is_some_and(|avg| avg > config.bonus_rating_threshold);
    high_rating || employee.compliments_count >= config.bonus_compliment_threshold
}

/// Run the demotion and bonus checks against an employee.
///
/// Counters are not reset, so a demoted employee whose record does not
/// improve is demoted again on the next check. Inactive employees are left
/// untouched.
pub fn check_performance(
    employee: &mut Employee,
    config: &StandingConfig,
    now: i64,
) -> PerformanceOutcome {
    if !employee.is_active {
        return PerformanceOutcome::unchanged(employee.pay);
    }

    let mut outcome = PerformanceOutcome::unchanged(employee.pay);

    if demotion_due(employee, config) {
        employee.pay = money::cut_by_percent(employee.pay, config.demotion_pay_cut_percent);
        employee.demotions += 1;
        outcome.demoted = true;

        if employee.demotions >= config.demotions_before_firing {
            employee.is_active = false;
            outcome.fired = true;
        }
    }

    if !outcome.fired && bonus_due(employee, config) {
        employee.pay = money::raise_by_percent(employee.pay, config.bonus_raise_percent);
        employee.bonuses += 1;
        outcome.bonus_applied = true;
    }

    if outcome.demoted || outcome.bonus_applied {
        employee.updated_at = now;
    }
    outcome.new_pay = employee.pay;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::employee;
    use shared::models::EmployeeRole;

    fn rated(sum: u32, count: u32) -> Employee {
        let mut e = employee(EmployeeRole::Chef, 1000.0);
        e.rating_sum = sum;
        e.ratings_count = count;
        e
    }

    #[test]
    fn test_low_rating_demotes_with_pay_cut() {
        let config = StandingConfig::default();
        let mut e = rated(3, 2); // 1.5

        let outcome = check_performance(&mut e, &config, 0);
        assert!(outcome.demoted);
        assert!(!outcome.fired);
        assert_eq!(outcome.new_pay, 900.0);
        assert_eq!(e.demotions, 1);
    }

    #[test]
    fn test_rating_exactly_two_is_not_demoted() {
        let config = StandingConfig::default();
        let mut e = rated(4, 2);
        assert!(!check_performance(&mut e, &config, 0).demoted);
    }

    #[test]
    fn test_no_ratings_never_demotes_on_rating() {
        let config = StandingConfig::default();
        let mut e = rated(0, 0);
        assert_eq!(
            check_performance(&mut e, &config, 0),
            PerformanceOutcome::unchanged(1000.0)
        );
    }

    #[test]
    fn test_complaints_at_limit_demote() {
        let config = StandingConfig::default();
        let mut e = rated(0, 0);
        e.complaints_count = 3;
        assert!(check_performance(&mut e, &config, 0).demoted);
    }

    #[test]
    fn test_second_demotion_fires() {
        let config = StandingConfig::default();
        let mut e = rated(3, 2);
        e.demotions = 1;

        let outcome = check_performance(&mut e, &config, 0);
        assert!(outcome.demoted);
        assert!(outcome.fired);
        assert!(!e.is_active);
        assert_eq!(e.demotions, 2);
        assert_eq!(e.pay, 900.0);
    }

    #[test]
    fn test_bonus_needs_rating_strictly_above_four() {
        let config = StandingConfig::default();
        let mut at_four = rated(8, 2);
        assert!(!check_performance(&mut at_four, &config, 0).bonus_applied);

        let mut above = rated(9, 2);
        let outcome = check_performance(&mut above, &config, 0);
        assert!(outcome.bonus_applied);
        assert_eq!(outcome.new_pay, 1100.0);
        assert_eq!(above.bonuses, 1);
    }

    #[test]
    fn test_compliments_at_limit_give_bonus() {
        let config = StandingConfig::default();
        let mut e = rated(0, 0);
        e.compliments_count = 3;
        assert!(check_performance(&mut e, &config, 0).bonus_applied);
    }

    #[test]
    fn test_demotion_then_bonus_on_cut_pay() {
        let config = StandingConfig::default();
        let mut e = rated(0, 0);
        e.complaints_count = 3;
        e.compliments_count = 3;

        let outcome = check_performance(&mut e, &config, 0);
        assert!(outcome.demoted);
        assert!(outcome.bonus_applied);
        // 1000 → 900 → 990
        assert_eq!(outcome.new_pay, 990.0);
    }

    #[test]
    fn test_fired_employee_gets_no_bonus() {
        let config = StandingConfig::default();
        let mut e = rated(0, 0);
        e.demotions = 1;
        e.complaints_count = 3;
        e.compliments_count = 5;

        let outcome = check_performance(&mut e, &config, 0);
        assert!(outcome.fired);
        assert!(!outcome.bonus_applied);
        assert_eq!(e.bonuses, 0);
    }

    #[test]
    fn test_inactive_is_noop() {
        let config = StandingConfig::default();
        let mut e = rated(2, 2);
        e.is_active = false;

        let outcome = check_performance(&mut e, &config, 0);
        assert!(!outcome.demoted);
        assert_eq!(e.demotions, 0);
        assert_eq!(e.pay, 1000.0);
    }
}
