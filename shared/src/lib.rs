//! Shared types for the restaurant platform
//!
//! Domain records used by the standing engine and by any outer surface
//! that exposes it, plus the unified error-code system.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
