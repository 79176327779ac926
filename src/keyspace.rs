// src/keyspace.rs

//! The contract between this module and the keyspace that hosts it.
//!
//! The host owns storage, per-key reader/writer locks, and key lifecycle.
//! Handlers borrow keys through [`LockSet`], which records every acquisition
//! and releases all of them when it goes out of scope, on success, error,
//! and cancellation paths alike.

use crate::errors::ZSetError;
use crate::storage::SortedSet;
use async_trait::async_trait;
use bytes::Bytes;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// A value stored under a key in the host keyspace.
///
/// The keyspace holds heterogeneous types; this module only ever produces
/// sorted sets, but it must recognize foreign values to report type errors.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    String(Bytes),
    SortedSet(SortedSet),
}

/// The surface the host keyspace exposes to command handlers.
///
/// Lock acquisition may suspend and must honor the cancellation handle; all
/// other operations are non-blocking and assume the caller holds the
/// appropriate lock.
#[async_trait]
pub trait KeyspaceHost: Send + Sync {
    /// Non-blocking existence probe.
    fn key_exists(&self, key: &Bytes) -> bool;

    /// Acquires the shared (read) lock for `key`.
    async fn read_lock(&self, cancel: &CancellationToken, key: &Bytes) -> Result<(), ZSetError>;

    /// Acquires the exclusive (write) lock for `key`.
    async fn write_lock(&self, cancel: &CancellationToken, key: &Bytes) -> Result<(), ZSetError>;

    /// Creates `key` if absent and acquires its exclusive lock atomically.
    async fn create_and_write_lock(
        &self,
        cancel: &CancellationToken,
        key: &Bytes,
    ) -> Result<(), ZSetError>;

    /// Releases whichever lock is held on `key`.
    fn release(&self, key: &Bytes);

    /// Reads the value under the lock currently held.
    fn get_value(&self, key: &Bytes) -> Option<DataValue>;

    /// Writes a new value under the exclusive lock currently held.
    fn set_value(&self, key: &Bytes, value: DataValue) -> Result<(), ZSetError>;
}

/// Per-command execution context handed to every handler.
pub struct ExecutionContext<'a> {
    pub host: &'a dyn KeyspaceHost,
    pub cancel: &'a CancellationToken,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(host: &'a dyn KeyspaceHost, cancel: &'a CancellationToken) -> Self {
        Self { host, cancel }
    }

    /// Starts an empty lock set scoped to this context's host.
    pub fn lock_set(&self) -> LockSet<'a> {
        LockSet::new(self.host)
    }
}

/// A scoped set of acquired key locks.
///
/// Locks are acquired in the order the handler requests them (left-to-right
/// over the user's key list) and released in reverse order on drop. The host
/// is expected to provide its own deadlock avoidance for overlapping
/// multi-key commands.
pub struct LockSet<'a> {
    host: &'a dyn KeyspaceHost,
    held: Vec<Bytes>,
}

impl<'a> LockSet<'a> {
    pub fn new(host: &'a dyn KeyspaceHost) -> Self {
        Self {
            host,
            held: Vec::new(),
        }
    }

    pub async fn read(&mut self, cancel: &CancellationToken, key: &Bytes) -> Result<(), ZSetError> {
        self.host.read_lock(cancel, key).await?;
        trace!(key = %String::from_utf8_lossy(key), "acquired read lock");
        self.held.push(key.clone());
        Ok(())
    }

    pub async fn write(&mut self, cancel: &CancellationToken, key: &Bytes) -> Result<(), ZSetError> {
        self.host.write_lock(cancel, key).await?;
        trace!(key = %String::from_utf8_lossy(key), "acquired write lock");
        self.held.push(key.clone());
        Ok(())
    }

    pub async fn create_and_write(
        &mut self,
        cancel: &CancellationToken,
        key: &Bytes,
    ) -> Result<(), ZSetError> {
        self.host.create_and_write_lock(cancel, key).await?;
        trace!(key = %String::from_utf8_lossy(key), "created key and acquired write lock");
        self.held.push(key.clone());
        Ok(())
    }

    /// Releases the most recently acquired lock on `key` ahead of drop.
    /// Used by commands that probe several keys and move on.
    pub fn release(&mut self, key: &Bytes) {
        if let Some(pos) = self.held.iter().rposition(|held| held == key) {
            self.held.remove(pos);
            self.host.release(key);
            trace!(key = %String::from_utf8_lossy(key), "released lock");
        }
    }
}

impl Drop for LockSet<'_> {
    fn drop(&mut self) {
        for key in self.held.drain(..).rev() {
            self.host.release(&key);
            trace!(key = %String::from_utf8_lossy(&key), "released lock");
        }
    }
}

/// Interprets a value read from the keyspace as a sorted set.
///
/// A missing value maps to an empty set; a value of another type is a type
/// error naming the key.
pub fn as_sorted_set(value: Option<DataValue>, key: &Bytes) -> Result<SortedSet, ZSetError> {
    match value {
        Some(DataValue::SortedSet(set)) => Ok(set),
        Some(_) => Err(ZSetError::WrongType(
            String::from_utf8_lossy(key).into_owned(),
        )),
        None => Ok(SortedSet::new()),
    }
}
