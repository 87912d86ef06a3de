//! Data models
//!
//! Records owned by the standing engine. All IDs are `i64` allocated per
//! table by the store; timestamps are Unix milliseconds.

pub mod actor;
pub mod complaint;
pub mod customer;
pub mod delivery_bid;
pub mod employee;
pub mod order;
pub mod rating;

// Re-exports
pub use actor::*;
pub use complaint::*;
pub use customer::*;
pub use delivery_bid::*;
pub use employee::*;
pub use order::*;
pub use rating::*;
