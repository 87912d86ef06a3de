//! Staffing floor and default pay

use shared::models::EmployeeRole;

use crate::core::StandingConfig;
use crate::engine::{EngineError, EngineResult};

/// Refuse a manual firing that would leave fewer than the minimum active
/// staff in the role. `active` counts the employee being fired.
pub fn check_firing_allowed(
    role: EmployeeRole,
    active: usize,
    config: &StandingConfig,
) -> EngineResult<()> {
    let minimum = config.min_active_staff;
    if active.saturating_sub(1) < minimum as usize {
        return Err(EngineError::StaffingFloor {
            role,
            active,
            minimum,
        });
    }
    Ok(())
}

pub fn default_pay(role: EmployeeRole, config: &StandingConfig) -> f64 {
    match role {
        EmployeeRole::Chef => config.default_chef_pay,
        EmployeeRole::Delivery => config.default_delivery_pay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_blocks_firing_at_minimum() {
        let config = StandingConfig::default();
        let err = check_firing_allowed(EmployeeRole::Chef, 2, &config).unwrap_err();
        assert!(matches!(
            err,
            EngineError::StaffingFloor {
                active: 2,
                minimum: 2,
                ..
            }
        ));
        assert!(check_firing_allowed(EmployeeRole::Chef, 3, &config).is_ok());
    }

    #[test]
    fn test_default_pay_by_role() {
        let config = StandingConfig::default();
        assert_eq!(default_pay(EmployeeRole::Chef, &config), 5000.0);
        assert_eq!(default_pay(EmployeeRole::Delivery, &config), 3000.0);
    }
}
