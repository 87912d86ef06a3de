//! Delivery bid selection rules

use shared::error::ErrorCode;
use shared::models::{BidStatus, DeliveryBid};
use std::cmp::Ordering;

use crate::engine::{EngineError, EngineResult};
use crate::money;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};

/// Lowest amount among pending bids
pub fn lowest_pending_amount<'a>(bids: impl IntoIterator<Item = &'a DeliveryBid>) -> Option<f64> {
    bids.into_iter()
        .filter(|bid| bid.status == BidStatus::Pending)
        .map(|bid| bid.amount)
        .min_by(|a, b| money::cmp(*a, *b))
}

/// Check the memo rule for accepting `selected` among the order's bids.
///
/// Picking a bid above the lowest pending amount requires a non-empty memo.
/// Returns the trimmed memo to store, if any.
pub fn check_memo(
    selected: &DeliveryBid,
    order_bids: &[DeliveryBid],
    memo: Option<&str>,
) -> EngineResult<Option<String>> {
    let memo = memo.map(str::trim).filter(|m| !m.is_empty());
    validate_optional_text(memo, "memo", MAX_NOTE_LEN)?;

    let lowest = lowest_pending_amount(order_bids).unwrap_or(selected.amount);
    if money::cmp(selected.amount, lowest) == Ordering::Greater && memo.is_none() {
        return Err(EngineError::validation(
            ErrorCode::MemoRequired,
            format!(
                "Bid {} ({:.2}) is above the lowest bid ({:.2}); a memo is required",
                selected.id, selected.amount, lowest
            ),
        ));
    }

    Ok(memo.map(str::to_string))
}
