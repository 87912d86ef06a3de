use crate::core::ConfigError;
use crate::storage::{Record, StorageError};
use shared::error::{AppError, ErrorCode};
use shared::models::{Complaint, Customer, DeliveryBid, Employee, EmployeeRole, Order, Rating};
use thiserror::Error;

/// Engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("{kind} not found: {id}")]
    NotFound {
        code: ErrorCode,
        kind: &'static str,
        id: i64,
    },

    #[error("Validation failed: {message}")]
    Validation { code: ErrorCode, message: String },

    #[error("Invalid state: {message}")]
    InvalidState { code: ErrorCode, message: String },

    #[error("Cannot go below {minimum} active {role} staff (currently {active})")]
    StaffingFloor {
        role: EmployeeRole,
        active: usize,
        minimum: u32,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Coarse error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input, rejected before any change
    Validation,
    /// Entity exists but is in the wrong state for the operation
    State,
    NotFound,
    /// Storage or configuration failure
    Storage,
}

impl EngineError {
    pub fn validation(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_state(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::InvalidState {
            code,
            message: message.into(),
        }
    }

    pub fn not_found<R: Lookup>(id: i64) -> Self {
        Self::NotFound {
            code: R::NOT_FOUND,
            kind: R::KIND,
            id,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::StaffingFloor { .. } => ErrorKind::Validation,
            Self::InvalidState { .. } => ErrorKind::State,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Storage(_) | Self::Config(_) => ErrorKind::Storage,
        }
    }

    /// Error code reported to callers
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Storage(e) => classify_storage_error(e),
            Self::Config(_) => ErrorCode::ConfigError,
            Self::NotFound { code, .. }
            | Self::Validation { code, .. }
            | Self::InvalidState { code, .. } => *code,
            Self::StaffingFloor { .. } => ErrorCode::StaffingFloor,
        }
    }
}

/// A record that can be looked up by id, with its not-found code
pub trait Lookup: Record {
    const NOT_FOUND: ErrorCode;
}

impl Lookup for Customer {
    const NOT_FOUND: ErrorCode = ErrorCode::CustomerNotFound;
}
impl Lookup for Employee {
    const NOT_FOUND: ErrorCode = ErrorCode::EmployeeNotFound;
}
impl Lookup for Complaint {
    const NOT_FOUND: ErrorCode = ErrorCode::ComplaintNotFound;
}
impl Lookup for DeliveryBid {
    const NOT_FOUND: ErrorCode = ErrorCode::BidNotFound;
}
impl Lookup for Order {
    const NOT_FOUND: ErrorCode = ErrorCode::OrderNotFound;
}
impl Lookup for Rating {
    const NOT_FOUND: ErrorCode = ErrorCode::NotFound;
}

/// 将存储错误转换为错误码
fn classify_storage_error(e: &StorageError) -> ErrorCode {
    if let StorageError::Serialization(_) = e {
        return ErrorCode::InternalError;
    }

    // redb 错误通过字符串匹配分类
    let err_str = e.to_string().to_lowercase();

    if err_str.contains("no space") || err_str.contains("disk full") || err_str.contains("enospc")
    {
        return ErrorCode::StorageFull;
    }

    if err_str.contains("corrupt") || err_str.contains("invalid database") {
        return ErrorCode::StorageCorrupted;
    }

    ErrorCode::SystemBusy
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        let code = err.code();
        match &err {
            EngineError::Storage(e) => {
                tracing::error!(error = %e, error_code = ?code, "Storage error occurred");
            }
            EngineError::Config(e) => {
                tracing::error!(error = %e, "Configuration error");
            }
            _ => {}
        }

        let message = err.to_string();
        let app = AppError::with_message(code, message);
        match err {
            EngineError::NotFound { kind, id, .. } => {
                app.with_detail("kind", kind).with_detail("id", id)
            }
            EngineError::StaffingFloor {
                role,
                active,
                minimum,
            } => app
                .with_detail("role", role.to_string())
                .with_detail("active", active)
                .with_detail("minimum", minimum),
            _ => app,
        }
    }
}
