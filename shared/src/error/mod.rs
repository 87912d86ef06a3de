//! Unified error system for the restaurant platform
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Customer account errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 5xxx: Balance errors
//! - 6xxx: Complaint errors
//! - 7xxx: Delivery bid errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::MemoRequired);
//! assert_eq!(err.code.code(), 7003);
//!
//! let err = AppError::with_message(ErrorCode::MemoRequired, "Memo must not be empty")
//!     .with_detail("field", "memo");
//! assert_eq!(err.http_status().as_u16(), 422);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::AppError;
