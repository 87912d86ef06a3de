//! Unified error codes for the restaurant platform
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Customer account errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 5xxx: Balance / payment errors
//! - 6xxx: Complaint and compliment errors
//! - 7xxx: Delivery bid errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Record is in a state that does not allow the operation
    InvalidState = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Customer account ====================
    /// Customer not found
    CustomerNotFound = 1001,
    /// Customer registration has not been approved
    CustomerNotApproved = 1002,
    /// Customer identity is blacklisted
    CustomerBlacklisted = 1003,
    /// Username already registered
    UsernameTaken = 1004,
    /// No pending closure request
    ClosureNotRequested = 1005,
    /// Closure already requested
    ClosureAlreadyRequested = 1006,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order status does not allow the operation
    OrderInvalidStatus = 4002,
    /// Order already has a delivery person
    OrderAlreadyAssigned = 4003,
    /// Order has already been rated
    OrderAlreadyRated = 4004,
    /// Rating outside 1..=5
    InvalidRating = 4005,

    // ==================== 5xxx: Balance ====================
    /// Balance does not cover the order
    InsufficientBalance = 5001,
    /// Deposit exceeds the single-deposit limit
    DepositLimitExceeded = 5002,
    /// Amount is not a positive finite number
    InvalidAmount = 5003,

    // ==================== 6xxx: Complaints ====================
    /// Complaint not found
    ComplaintNotFound = 6001,
    /// Complaint already resolved
    ComplaintAlreadyResolved = 6002,
    /// Complaint cannot be disputed by this actor
    ComplaintNotDisputable = 6003,
    /// Filer and target are the same actor
    SelfComplaint = 6004,

    // ==================== 7xxx: Delivery bids ====================
    /// Delivery bid not found
    BidNotFound = 7001,
    /// Delivery bid is no longer pending
    BidNotPending = 7002,
    /// Memo required when accepting a non-minimum bid
    MemoRequired = 7003,
    /// Bidder already has a pending bid on the order
    DuplicateBid = 7004,

    // ==================== 8xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 8001,
    /// Employee is not active
    EmployeeInactive = 8002,
    /// Action would leave too few active staff
    StaffingFloor = 8003,
    /// Employee has the wrong role for the action
    WrongEmployeeRole = 8004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,

    // ==================== 94xx: Storage ====================
    /// Storage full (disk space insufficient)
    StorageFull = 9401,
    /// Storage corrupted (data file damaged)
    StorageCorrupted = 9403,
    /// System busy (IO error, retry later)
    SystemBusy = 9404,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidState => "Operation not allowed in the current state",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Customer account
            ErrorCode::CustomerNotFound => "Customer not found",
            ErrorCode::CustomerNotApproved => "Customer registration is pending approval",
            ErrorCode::CustomerBlacklisted => "Customer is blacklisted",
            ErrorCode::UsernameTaken => "Username is already registered",
            ErrorCode::ClosureNotRequested => "No account closure was requested",
            ErrorCode::ClosureAlreadyRequested => "Account closure already requested",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderInvalidStatus => "Order status does not allow this operation",
            ErrorCode::OrderAlreadyAssigned => "Order already has a delivery person",
            ErrorCode::OrderAlreadyRated => "Order has already been rated",
            ErrorCode::InvalidRating => "Rating must be between 1 and 5",

            // Balance
            ErrorCode::InsufficientBalance => "Insufficient balance",
            ErrorCode::DepositLimitExceeded => "Deposit exceeds the maximum amount",
            ErrorCode::InvalidAmount => "Amount must be a positive number",

            // Complaints
            ErrorCode::ComplaintNotFound => "Complaint not found",
            ErrorCode::ComplaintAlreadyResolved => "Complaint has already been resolved",
            ErrorCode::ComplaintNotDisputable => "Complaint cannot be disputed",
            ErrorCode::SelfComplaint => "Cannot file a complaint or compliment about yourself",

            // Delivery bids
            ErrorCode::BidNotFound => "Delivery bid not found",
            ErrorCode::BidNotPending => "Delivery bid is no longer pending",
            ErrorCode::MemoRequired => "Memo is required when choosing a bid above the lowest",
            ErrorCode::DuplicateBid => "A pending bid already exists for this delivery person",

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeInactive => "Employee is not active",
            ErrorCode::StaffingFloor => "Minimum active staffing would be violated",
            ErrorCode::WrongEmployeeRole => "Employee role does not allow this operation",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",

            // Storage
            ErrorCode::StorageFull => "Storage is full",
            ErrorCode::StorageCorrupted => "Storage is corrupted",
            ErrorCode::SystemBusy => "System busy, retry later",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidState),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Customer account
            1001 => Ok(ErrorCode::CustomerNotFound),
            1002 => Ok(ErrorCode::CustomerNotApproved),
            1003 => Ok(ErrorCode::CustomerBlacklisted),
            1004 => Ok(ErrorCode::UsernameTaken),
            1005 => Ok(ErrorCode::ClosureNotRequested),
            1006 => Ok(ErrorCode::ClosureAlreadyRequested),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderInvalidStatus),
            4003 => Ok(ErrorCode::OrderAlreadyAssigned),
            4004 => Ok(ErrorCode::OrderAlreadyRated),
            4005 => Ok(ErrorCode::InvalidRating),

            // Balance
            5001 => Ok(ErrorCode::InsufficientBalance),
            5002 => Ok(ErrorCode::DepositLimitExceeded),
            5003 => Ok(ErrorCode::InvalidAmount),

            // Complaints
            6001 => Ok(ErrorCode::ComplaintNotFound),
            6002 => Ok(ErrorCode::ComplaintAlreadyResolved),
            6003 => Ok(ErrorCode::ComplaintNotDisputable),
            6004 => Ok(ErrorCode::SelfComplaint),

            // Delivery bids
            7001 => Ok(ErrorCode::BidNotFound),
            7002 => Ok(ErrorCode::BidNotPending),
            7003 => Ok(ErrorCode::MemoRequired),
            7004 => Ok(ErrorCode::DuplicateBid),

            // Employee
            8001 => Ok(ErrorCode::EmployeeNotFound),
            8002 => Ok(ErrorCode::EmployeeInactive),
            8003 => Ok(ErrorCode::StaffingFloor),
            8004 => Ok(ErrorCode::WrongEmployeeRole),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            // Storage
            9401 => Ok(ErrorCode::StorageFull),
            9403 => Ok(ErrorCode::StorageCorrupted),
            9404 => Ok(ErrorCode::SystemBusy),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
