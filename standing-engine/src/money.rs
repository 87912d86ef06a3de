//! Money calculation utilities using rust_decimal for precision
//!
//! Records keep amounts as `f64`; every calculation converts to `Decimal`,
//! does the arithmetic there and rounds back to 2 decimal places.

use rust_decimal::prelude::*;
use shared::error::ErrorCode;

use crate::engine::{EngineError, EngineResult};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Largest amount any single input may carry (order subtotal, bid, pay)
pub const MAX_AMOUNT: f64 = 1_000_000_000.0;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_else(|| {
            tracing::error!(value = %value, "Decimal not representable as f64, defaulting to zero");
            0.0
        })
}

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> EngineResult<()> {
    if !value.is_finite() {
        return Err(EngineError::validation(
            ErrorCode::InvalidAmount,
            format!("{field_name} must be a finite number, got {value}"),
        ));
    }
    Ok(())
}

/// Validate an input amount and return it rounded to cents.
///
/// Rejects non-finite values, anything above [`MAX_AMOUNT`], and anything
/// below zero (or at zero when `allow_zero` is false) after rounding.
pub fn require_amount(value: f64, field_name: &str, allow_zero: bool) -> EngineResult<f64> {
    require_finite(value, field_name)?;
    if value > MAX_AMOUNT {
        return Err(EngineError::validation(
            ErrorCode::ValueOutOfRange,
            format!("{field_name} exceeds maximum allowed ({MAX_AMOUNT}), got {value}"),
        ));
    }

    let rounded = to_f64(to_decimal(value));
    if value < 0.0 || (!allow_zero && rounded <= 0.0) {
        return Err(EngineError::validation(
            ErrorCode::InvalidAmount,
            format!("{field_name} is below the minimum amount, got {value}"),
        ));
    }
    Ok(rounded)
}

/// [`require_amount`] for amounts that must be strictly positive
#[inline]
pub fn require_positive(value: f64, field_name: &str) -> EngineResult<f64> {
    require_amount(value, field_name, false)
}

/// `percent`% of `amount` (5.0 = 5%)
pub fn percent_of(amount: f64, percent: f64) -> f64 {
    to_f64(to_decimal(amount) * to_decimal(percent) / Decimal::ONE_HUNDRED)
}

/// Increase `amount` by `percent`%
pub fn raise_by_percent(amount: f64, percent: f64) -> f64 {
    let factor = Decimal::ONE + to_decimal(percent) / Decimal::ONE_HUNDRED;
    to_f64(to_decimal(amount) * factor)
}

/// Decrease `amount` by `percent`%, floored at zero
pub fn cut_by_percent(amount: f64, percent: f64) -> f64 {
    let factor = Decimal::ONE - to_decimal(percent) / Decimal::ONE_HUNDRED;
    to_f64((to_decimal(amount) * factor).max(Decimal::ZERO))
}

pub fn add(a: f64, b: f64) -> f64 {
    to_f64(to_decimal(a) + to_decimal(b))
}

/// `a - b`, floored at zero
pub fn sub_floor_zero(a: f64, b: f64) -> f64 {
    to_f64((to_decimal(a) - to_decimal(b)).max(Decimal::ZERO))
}

/// Exact comparison after rounding both sides to cents
pub fn cmp(a: f64, b: f64) -> std::cmp::Ordering {
    let a = to_decimal(a).round_dp(DECIMAL_PLACES);
    let b = to_decimal(b).round_dp(DECIMAL_PLACES);
    a.cmp(&b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(40.0, 5.0), 2.0);
        assert_eq!(percent_of(19.99, 5.0), 1.0);
    }

    #[test]
    fn test_raise_and_cut() {
        assert_eq!(raise_by_percent(5000.0, 10.0), 5500.0);
        assert_eq!(cut_by_percent(5000.0, 10.0), 4500.0);
        assert_eq!(cut_by_percent(4500.0, 10.0), 4050.0);
        assert_eq!(cut_by_percent(10.0, 100.0), 0.0);
    }

    #[test]
    fn test_float_noise_is_absorbed() {
        // 0.1 + 0.2 != 0.3 in f64
        assert_eq!(add(0.1, 0.2), 0.3);
        assert_eq!(cmp(add(0.1, 0.2), 0.3), Ordering::Equal);
    }

    #[test]
    fn test_sub_floor_zero() {
        assert_eq!(sub_floor_zero(10.0, 2.5), 7.5);
        assert_eq!(sub_floor_zero(2.0, 5.0), 0.0);
    }

    fn code_of(result: EngineResult<f64>) -> ErrorCode {
        result.expect_err("amount should be rejected").code()
    }

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive(0.01, "amount").unwrap(), 0.01);
        assert_eq!(require_positive(12.345, "amount").unwrap(), 12.35);
        assert_eq!(require_positive(MAX_AMOUNT, "amount").unwrap(), MAX_AMOUNT);
        assert_eq!(code_of(require_positive(0.0, "amount")), ErrorCode::InvalidAmount);
        assert_eq!(code_of(require_positive(-3.0, "amount")), ErrorCode::InvalidAmount);
        assert_eq!(code_of(require_positive(f64::NAN, "amount")), ErrorCode::InvalidAmount);
        assert_eq!(code_of(require_positive(f64::INFINITY, "amount")), ErrorCode::InvalidAmount);
    }

    #[test]
    fn test_amount_rounding_to_zero_is_rejected() {
        assert_eq!(code_of(require_positive(0.001, "amount")), ErrorCode::InvalidAmount);
        assert_eq!(require_amount(0.001, "pay", true).unwrap(), 0.0);
        assert_eq!(code_of(require_amount(-0.5, "pay", true)), ErrorCode::InvalidAmount);
    }

    #[test]
    fn test_amount_above_decimal_range_is_rejected() {
        // Beyond Decimal::MAX; must never silently become zero
        assert_eq!(code_of(require_positive(1e30, "amount")), ErrorCode::ValueOutOfRange);
        assert_eq!(code_of(require_positive(MAX_AMOUNT + 1.0, "amount")), ErrorCode::ValueOutOfRange);
    }
}
