//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::CustomerNotFound
            | Self::OrderNotFound
            | Self::ComplaintNotFound
            | Self::BidNotFound
            | Self::EmployeeNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::InvalidState
            | Self::UsernameTaken
            | Self::ClosureAlreadyRequested
            | Self::OrderAlreadyAssigned
            | Self::OrderAlreadyRated
            | Self::ComplaintAlreadyResolved
            | Self::BidNotPending
            | Self::DuplicateBid => StatusCode::CONFLICT,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::RoleRequired
            | Self::CustomerNotApproved
            | Self::CustomerBlacklisted
            | Self::ComplaintNotDisputable => StatusCode::FORBIDDEN,

            // 402 Payment Required
            Self::InsufficientBalance => StatusCode::PAYMENT_REQUIRED,

            // 422 Unprocessable (business rule)
            Self::StaffingFloor | Self::MemoRequired => StatusCode::UNPROCESSABLE_ENTITY,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::SystemBusy => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError
            | Self::StorageFull
            | Self::StorageCorrupted => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
