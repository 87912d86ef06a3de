//! Employee HR operations and performance checks

use shared::error::ErrorCode;
use shared::models::{Employee, EmployeeRole, PayAdjustment};

use super::{EngineError, EngineResult, FireReason, StandingEngine, StandingEvent, Tx};
use crate::money;
use crate::rules::performance::{self, PerformanceOutcome};
use crate::rules::staffing;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};

impl StandingEngine {
    /// Run the demotion / bonus checks on demand
    pub fn check_employee_performance(&self, employee_id: i64) -> EngineResult<PerformanceOutcome> {
        self.transact(|tx| tx.check_performance(employee_id))
    }

    /// Hire an employee at `pay`, or the role's default pay
    pub fn hire_employee(
        &self,
        name: &str,
        role: EmployeeRole,
        pay: Option<f64>,
    ) -> EngineResult<Employee> {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
        let pay = match pay {
            Some(pay) => money::require_amount(pay, "Pay", true)?,
            None => staffing::default_pay(role, &self.config),
        };

        self.transact(|tx| {
            let employee = Employee {
                id: tx.next_id::<Employee>()?,
                name: name.trim().to_string(),
                role,
                pay,
                demotions: 0,
                bonuses: 0,
                complaints_count: 0,
                compliments_count: 0,
                rating_sum: 0,
                ratings_count: 0,
                warnings: 0,
                is_active: true,
                hired_at: tx.now,
                updated_at: tx.now,
            };
            tx.save(&employee)?;
            tracing::info!(employee_id = employee.id, %role, pay, "Employee hired");
            Ok(employee)
        })
    }

    /// Manager firing, refused when it would break the staffing floor
    pub fn fire_employee(&self, employee_id: i64) -> EngineResult<Employee> {
        self.transact(|tx| {
            let mut employee: Employee = tx.load(employee_id)?;
            require_active(&employee)?;

            let active = tx
                .all::<Employee>()?
                .iter()
                .filter(|e| e.is_active && e.role == employee.role)
                .count();
            staffing::check_firing_allowed(employee.role, active, tx.config)?;

            employee.is_active = false;
            employee.updated_at = tx.now;
            tx.save(&employee)?;
            tracing::info!(employee_id, role = %employee.role, "Employee fired by manager");
            tx.emit(StandingEvent::Fired {
                employee_id,
                reason: FireReason::Manual,
            });
            Ok(employee)
        })
    }

    /// Change an active employee's pay; returns the new pay
    pub fn adjust_pay(&self, employee_id: i64, adjustment: PayAdjustment) -> EngineResult<f64> {
        let value = match adjustment {
            PayAdjustment::RaisePercent(v)
            | PayAdjustment::RaiseAmount(v)
            | PayAdjustment::CutPercent(v)
            | PayAdjustment::CutAmount(v)
            | PayAdjustment::Set(v) => v,
        };
        let value = money::require_amount(value, "Pay adjustment", true)?;
        if let PayAdjustment::CutPercent(percent) = adjustment
            && percent > 100.0
        {
            return Err(EngineError::validation(
                ErrorCode::ValueOutOfRange,
                format!("Pay cut cannot exceed 100%, got {percent}"),
            ));
        }

        self.transact(|tx| {
            let mut employee: Employee = tx.load(employee_id)?;
            require_active(&employee)?;

            let old_pay = employee.pay;
            employee.pay = match adjustment {
                PayAdjustment::RaisePercent(p) => money::raise_by_percent(old_pay, p),
                PayAdjustment::RaiseAmount(a) => money::add(old_pay, a),
                PayAdjustment::CutPercent(p) => money::cut_by_percent(old_pay, p),
                PayAdjustment::CutAmount(a) => money::sub_floor_zero(old_pay, a),
                PayAdjustment::Set(_) => value,
            };
            if employee.pay > money::MAX_AMOUNT {
                return Err(EngineError::validation(
                    ErrorCode::ValueOutOfRange,
                    format!("Pay {} exceeds maximum allowed ({})", employee.pay, money::MAX_AMOUNT),
                ));
            }
            employee.updated_at = tx.now;
            tx.save(&employee)?;
            tracing::info!(employee_id, old_pay, new_pay = employee.pay, "Pay adjusted");
            Ok(employee.pay)
        })
    }
}

impl Tx<'_> {
    /// Load, check, save, and emit for one employee
    pub(super) fn check_performance(&mut self, employee_id: i64) -> EngineResult<PerformanceOutcome> {
        let mut employee: Employee = self.load(employee_id)?;
        let outcome = performance::check_performance(&mut employee, self.config, self.now);
        if !(outcome.demoted || outcome.bonus_applied) {
            return Ok(outcome);
        }
        self.save(&employee)?;

        if outcome.demoted {
            tracing::warn!(employee_id, demotions = employee.demotions, new_pay = employee.pay, "Employee demoted");
            self.emit(StandingEvent::Demoted {
                employee_id,
                demotions: employee.demotions,
                new_pay: employee.pay,
            });
        }
        if outcome.fired {
            tracing::warn!(employee_id, role = %employee.role, "Employee fired after repeated demotions");
            self.emit(StandingEvent::Fired {
                employee_id,
                reason: FireReason::Performance,
            });
        }
        if outcome.bonus_applied {
            tracing::info!(employee_id, bonuses = employee.bonuses, new_pay = employee.pay, "Employee bonus applied");
            self.emit(StandingEvent::BonusApplied {
                employee_id,
                new_pay: employee.pay,
            });
        }
        Ok(outcome)
    }
}

fn require_active(employee: &Employee) -> EngineResult<()> {
    if !employee.is_active {
        return Err(EngineError::invalid_state(
            ErrorCode::EmployeeInactive,
            format!("Employee {} is not active", employee.id),
        ));
    }
    Ok(())
}
