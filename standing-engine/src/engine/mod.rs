//! StandingEngine - customer and employee standing transitions
//!
//! Every public operation runs as one unit:
//!
//! ```text
//! operation(args)
//!     ├─ 1. Begin write transaction (redb serializes writers)
//!     ├─ 2. Load records, validate
//!     ├─ 3. Apply rules (warnings, promotion, performance, ...)
//!     ├─ 4. Save records, collect StandingEvents
//!     ├─ 5. Commit transaction
//!     └─ 6. Broadcast events
//! ```
//!
//! An error at any step before the commit drops the transaction, so none of
//! the operation's changes are visible and no event is sent.

mod bids;
mod complaints;
mod customers;
mod employees;
mod error;
mod events;
mod orders;

#[cfg(test)]
mod tests;

pub use bids::BidAcceptance;
pub use complaints::{FilingOutcome, ResolutionOutcome};
pub use customers::ClosureOutcome;
pub use error::{EngineError, EngineResult, ErrorKind, Lookup};
pub use events::{FireReason, StandingEvent};
pub use orders::{OrderPlacement, RatingOutcome};

use crate::core::{Config, StandingConfig};
use crate::storage::{Record, StandingStorage, StoreTxn};
use shared::models::{
    ActorRef, Complaint, Customer, DeliveryBid, Employee, EmployeeRole, Order, Rating,
};
use shared::util::now_millis;
use tokio::sync::broadcast;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Standing engine over a redb store
pub struct StandingEngine {
    storage: StandingStorage,
    config: StandingConfig,
    event_tx: broadcast::Sender<StandingEvent>,
}

impl std::fmt::Debug for StandingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandingEngine")
            .field("storage", &"<StandingStorage>")
            .field("event_tx", &"<broadcast::Sender>")
            .field("config", &self.config)
            .finish()
    }
}

impl StandingEngine {
    /// Create an engine over existing storage; the configuration is validated
    pub fn new(storage: StandingStorage, config: StandingConfig) -> EngineResult<Self> {
        config.validate()?;
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            storage,
            config,
            event_tx,
        })
    }

    /// Open the database named by the configuration
    pub fn open(config: &Config) -> EngineResult<Self> {
        let db_path = config.db_path();
        let storage = StandingStorage::open(&db_path)?;
        tracing::info!(db_path = %db_path.display(), "Standing engine opened");
        Self::new(storage, config.standing.clone())
    }

    /// Subscribe to standing events
    pub fn subscribe(&self) -> broadcast::Receiver<StandingEvent> {
        self.event_tx.subscribe()
    }

    pub fn config(&self) -> &StandingConfig {
        &self.config
    }

    /// Run `op` in one write transaction, commit, then broadcast its events
    fn transact<T>(&self, op: impl FnOnce(&mut Tx<'_>) -> EngineResult<T>) -> EngineResult<T> {
        let mut tx = Tx {
            txn: self.storage.begin_write()?,
            config: &self.config,
            events: Vec::new(),
            now: now_millis(),
        };

        let value = match op(&mut tx) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, kind = ?e.kind(), "Operation rejected, transaction dropped");
                return Err(e);
            }
        };

        let Tx { txn, events, .. } = tx;
        txn.commit()?;

        for event in events {
            // No subscribers is fine
            let _ = self.event_tx.send(event);
        }
        Ok(value)
    }

    fn find<R: Lookup>(&self, id: i64) -> EngineResult<R> {
        self.storage
            .get::<R>(id)?
            .ok_or_else(|| EngineError::not_found::<R>(id))
    }

    // ========== Queries ==========

    pub fn customer(&self, id: i64) -> EngineResult<Customer> {
        self.find(id)
    }

    pub fn employee(&self, id: i64) -> EngineResult<Employee> {
        self.find(id)
    }

    pub fn complaint(&self, id: i64) -> EngineResult<Complaint> {
        self.find(id)
    }

    pub fn order(&self, id: i64) -> EngineResult<Order> {
        self.find(id)
    }

    pub fn bid(&self, id: i64) -> EngineResult<DeliveryBid> {
        self.find(id)
    }

    /// All bids on an order, oldest first
    pub fn bids_for_order(&self, order_id: i64) -> EngineResult<Vec<DeliveryBid>> {
        let bids = self.storage.all::<DeliveryBid>()?;
        Ok(bids.into_iter().filter(|b| b.order_id == order_id).collect())
    }

    /// Complaints and compliments naming `target`
    pub fn complaints_against(&self, target: ActorRef) -> EngineResult<Vec<Complaint>> {
        let complaints = self.storage.all::<Complaint>()?;
        Ok(complaints
            .into_iter()
            .filter(|c| c.target == target)
            .collect())
    }

    pub fn ratings_for_employee(&self, employee_id: i64) -> EngineResult<Vec<Rating>> {
        let ratings = self.storage.all::<Rating>()?;
        Ok(ratings
            .into_iter()
            .filter(|r| r.employee_id == employee_id)
            .collect())
    }

    /// Active employees holding `role`
    pub fn active_staff(&self, role: EmployeeRole) -> EngineResult<Vec<Employee>> {
        let employees = self.storage.all::<Employee>()?;
        Ok(employees
            .into_iter()
            .filter(|e| e.is_active && e.role == role)
            .collect())
    }
}

/// State of one in-flight operation
struct Tx<'a> {
    txn: StoreTxn,
    config: &'a StandingConfig,
    events: Vec<StandingEvent>,
    now: i64,
}

impl Tx<'_> {
    fn load<R: Lookup>(&self, id: i64) -> EngineResult<R> {
        self.txn
            .get::<R>(id)?
            .ok_or_else(|| EngineError::not_found::<R>(id))
    }

    fn save<R: Record>(&self, record: &R) -> EngineResult<()> {
        self.txn.put(record)?;
        Ok(())
    }

    fn all<R: Record>(&self) -> EngineResult<Vec<R>> {
        Ok(self.txn.all::<R>()?)
    }

    fn next_id<R: Record>(&self) -> EngineResult<i64> {
        Ok(self.txn.next_id::<R>()?)
    }

    fn emit(&mut self, event: StandingEvent) {
        self.events.push(event);
    }
}
