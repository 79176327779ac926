// tests/common/mod.rs

//! Test helpers: an in-memory mock of the host keyspace and a small command
//! runner wrapping `dispatch`.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use citrine_zset::{DataValue, KeyspaceHost, ZSetError, dispatch};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Default)]
struct KeyEntry {
    lock: Arc<RwLock<()>>,
    value: Option<DataValue>,
}

enum HeldLock {
    Read(OwnedRwLockReadGuard<()>),
    Write(OwnedRwLockWriteGuard<()>),
}

/// A keyspace host backed by one `tokio::sync::RwLock` per key. Acquired
/// guards are parked in a side table so the module's synchronous `release`
/// can drop them.
#[derive(Default)]
pub struct MockKeyspace {
    entries: Mutex<HashMap<Bytes, KeyEntry>>,
    held: Mutex<HashMap<Bytes, Vec<HeldLock>>>,
}

impl MockKeyspace {
    pub fn new() -> Self {
        Default::default()
    }

    fn lock_for(&self, key: &Bytes) -> Arc<RwLock<()>> {
        let mut entries = self.entries.lock().unwrap();
        entries.entry(key.clone()).or_default().lock.clone()
    }

    fn remember(&self, key: &Bytes, guard: HeldLock) {
        self.held
            .lock()
            .unwrap()
            .entry(key.clone())
            .or_default()
            .push(guard);
    }

    /// Stores a value directly, bypassing the locking protocol. Test setup
    /// only.
    pub fn put(&self, key: &str, value: DataValue) {
        let key = Bytes::copy_from_slice(key.as_bytes());
        self.entries.lock().unwrap().entry(key).or_default().value = Some(value);
    }
}

#[async_trait]
impl KeyspaceHost for MockKeyspace {
    fn key_exists(&self, key: &Bytes) -> bool {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .is_some_and(|entry| entry.value.is_some())
    }

    async fn read_lock(&self, cancel: &CancellationToken, key: &Bytes) -> Result<(), ZSetError> {
        let lock = self.lock_for(key);
        let guard = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ZSetError::Cancelled),
            guard = lock.read_owned() => guard,
        };
        self.remember(key, HeldLock::Read(guard));
        Ok(())
    }

    async fn write_lock(&self, cancel: &CancellationToken, key: &Bytes) -> Result<(), ZSetError> {
        let lock = self.lock_for(key);
        let guard = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ZSetError::Cancelled),
            guard = lock.write_owned() => guard,
        };
        self.remember(key, HeldLock::Write(guard));
        Ok(())
    }

    async fn create_and_write_lock(
        &self,
        cancel: &CancellationToken,
        key: &Bytes,
    ) -> Result<(), ZSetError> {
        // lock_for materializes the key entry; the value appears on the
        // first set_value.
        self.write_lock(cancel, key).await
    }

    fn release(&self, key: &Bytes) {
        if let Some(guards) = self.held.lock().unwrap().get_mut(key) {
            guards.pop();
        }
    }

    fn get_value(&self, key: &Bytes) -> Option<DataValue> {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .and_then(|entry| entry.value.clone())
    }

    fn set_value(&self, key: &Bytes, value: DataValue) -> Result<(), ZSetError> {
        self.entries.lock().unwrap().entry(key.clone()).or_default().value = Some(value);
        Ok(())
    }
}

/// Shared test context: a mock keyspace plus a dispatch wrapper.
#[derive(Clone, Default)]
pub struct TestContext {
    pub host: Arc<MockKeyspace>,
}

impl TestContext {
    pub fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("warn"))
            .with_test_writer()
            .try_init();
        TestContext {
            host: Arc::new(MockKeyspace::new()),
        }
    }

    pub fn args(parts: &[&str]) -> Vec<Bytes> {
        parts
            .iter()
            .map(|part| Bytes::copy_from_slice(part.as_bytes()))
            .collect()
    }

    pub async fn run(&self, parts: &[&str]) -> Result<Vec<u8>, ZSetError> {
        dispatch(&*self.host, &CancellationToken::new(), &Self::args(parts)).await
    }

    pub async fn run_ok(&self, parts: &[&str]) -> Vec<u8> {
        match self.run(parts).await {
            Ok(reply) => reply,
            Err(err) => panic!("command {parts:?} failed: {err}"),
        }
    }

    /// Runs a command and asserts the exact response bytes.
    pub async fn assert_reply(&self, parts: &[&str], expected: &[u8]) {
        let reply = self.run_ok(parts).await;
        assert_eq!(
            reply,
            expected,
            "unexpected reply for {:?}: got {:?}, want {:?}",
            parts,
            String::from_utf8_lossy(&reply),
            String::from_utf8_lossy(expected)
        );
    }
}
