//! Actor references
//!
//! Complaints, compliments and warnings point at either a customer or an
//! employee record. Ids are only unique within their own table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a customer or employee record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorRef {
    Customer(i64),
    Employee(i64),
}

impl ActorRef {
    pub fn id(&self) -> i64 {
        match self {
            Self::Customer(id) | Self::Employee(id) => *id,
        }
    }

    pub fn is_customer(&self) -> bool {
        matches!(self, Self::Customer(_))
    }
}

impl fmt::Display for ActorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Customer(id) => write!(f, "customer:{}", id),
            Self::Employee(id) => write!(f, "employee:{}", id),
        }
    }
}
