//! redb-based record store
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `customers` | `id` | `Customer` | Customer standing |
//! | `employees` | `id` | `Employee` | Chef / delivery staff |
//! | `complaints` | `id` | `Complaint` | Complaints and compliments |
//! | `delivery_bids` | `id` | `DeliveryBid` | Bids on ready orders |
//! | `orders` | `id` | `Order` | Orders |
//! | `ratings` | `id` | `Rating` | Employee ratings |
//! | `sequence_counter` | table name | `i64` | Per-table id allocation |
//!
//! Values are JSON-serialized. Every engine operation runs inside a single
//! [`StoreTxn`]; redb allows one writer at a time, so increments to the same
//! counter can never interleave, and dropping an uncommitted transaction
//! discards all of its writes.

use redb::{
    Database, ReadableDatabase, ReadableTable, TableDefinition, TableHandle, WriteTransaction,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{Complaint, Customer, DeliveryBid, Employee, Order, Rating};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

type RecordTable = TableDefinition<'static, i64, &'static [u8]>;

const CUSTOMERS_TABLE: RecordTable = TableDefinition::new("customers");
const EMPLOYEES_TABLE: RecordTable = TableDefinition::new("employees");
const COMPLAINTS_TABLE: RecordTable = TableDefinition::new("complaints");
const BIDS_TABLE: RecordTable = TableDefinition::new("delivery_bids");
const ORDERS_TABLE: RecordTable = TableDefinition::new("orders");
const RATINGS_TABLE: RecordTable = TableDefinition::new("ratings");

/// Table for id allocation: key = record table name, value = last issued id
const SEQUENCE_TABLE: TableDefinition<&str, i64> = TableDefinition::new("sequence_counter");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A record type with its own table
pub trait Record: Serialize + DeserializeOwned {
    const TABLE: RecordTable;
    /// Human-readable kind, used in errors and logs
    const KIND: &'static str;

    fn id(&self) -> i64;
}

macro_rules! impl_record {
    ($ty:ty, $table:expr, $kind:literal) => {
        impl Record for $ty {
            const TABLE: RecordTable = $table;
            const KIND: &'static str = $kind;

            fn id(&self) -> i64 {
                self.id
            }
        }
    };
}

impl_record!(Customer, CUSTOMERS_TABLE, "Customer");
impl_record!(Employee, EMPLOYEES_TABLE, "Employee");
impl_record!(Complaint, COMPLAINTS_TABLE, "Complaint");
impl_record!(DeliveryBid, BIDS_TABLE, "Delivery bid");
impl_record!(Order, ORDERS_TABLE, "Order");
impl_record!(Rating, RATINGS_TABLE, "Rating");

/// Record store backed by redb
#[derive(Clone)]
pub struct StandingStorage {
    db: Arc<Database>,
}

impl std::fmt::Debug for StandingStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandingStorage").finish_non_exhaustive()
    }
}

impl StandingStorage {
    /// Open or create the database at the given path
    ///
    /// redb commits with `Durability::Immediate` by default: once `commit()`
    /// returns the transition set is on disk.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(CUSTOMERS_TABLE)?;
            let _ = write_txn.open_table(EMPLOYEES_TABLE)?;
            let _ = write_txn.open_table(COMPLAINTS_TABLE)?;
            let _ = write_txn.open_table(BIDS_TABLE)?;
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(RATINGS_TABLE)?;
            let _ = write_txn.open_table(SEQUENCE_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<StoreTxn> {
        Ok(StoreTxn {
            txn: self.db.begin_write()?,
        })
    }

    // ========== Read-only access ==========

    /// Load a single record
    pub fn get<R: Record>(&self, id: i64) -> StorageResult<Option<R>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(R::TABLE)?;
        match table.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Load every record of a table, ordered by id
    pub fn all<R: Record>(&self) -> StorageResult<Vec<R>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(R::TABLE)?;
        let mut records = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            records.push(serde_json::from_slice(value.value())?);
        }
        Ok(records)
    }
}

/// Write transaction over all record tables
///
/// Changes become visible only after [`StoreTxn::commit`]; dropping the
/// value aborts the transaction.
pub struct StoreTxn {
    txn: WriteTransaction,
}

impl StoreTxn {
    pub fn get<R: Record>(&self, id: i64) -> StorageResult<Option<R>> {
        let table = self.txn.open_table(R::TABLE)?;
        match table.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Insert or replace a record
    pub fn put<R: Record>(&self, record: &R) -> StorageResult<()> {
        let bytes = serde_json::to_vec(record)?;
        let mut table = self.txn.open_table(R::TABLE)?;
        table.insert(record.id(), bytes.as_slice())?;
        Ok(())
    }

    /// Load every record of a table, ordered by id
    pub fn all<R: Record>(&self) -> StorageResult<Vec<R>> {
        let table = self.txn.open_table(R::TABLE)?;
        let mut records = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            records.push(serde_json::from_slice(value.value())?);
        }
        Ok(records)
    }

    /// Allocate the next id for a record table (starts at 1)
    pub fn next_id<R: Record>(&self) -> StorageResult<i64> {
        let mut table = self.txn.open_table(SEQUENCE_TABLE)?;
        let definition = R::TABLE;
        let name = definition.name();
        let current = table.get(name)?.map(|guard| guard.value()).unwrap_or(0);
        let next = current + 1;
        table.insert(name, next)?;
        Ok(next)
    }

    pub fn commit(self) -> StorageResult<()> {
        self.txn.commit()?;
        Ok(())
    }
}
