use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("not found in store")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Minimal key-value surface the promo code needs from the persistence
/// layer. Implementations serialize individual get/set calls; no lock is
/// held across calls, so concurrent writers to one key race with
/// last-write-wins.
pub trait Client {
    fn get(&self, k: String) -> Result<String, StoreError>;
    fn set(&self, k: String, v: String) -> Result<(), StoreError>;
}

/// Process-local store backing the override cache in production.
#[derive(Default)]
pub struct MemoryClient {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryClient {
    pub fn new() -> MemoryClient {
        MemoryClient::default()
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Client for MemoryClient {
    fn get(&self, k: String) -> Result<String, StoreError> {
        self.lock_entries()
            .get(&k)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn set(&self, k: String, v: String) -> Result<(), StoreError> {
        self.lock_entries().insert(k, v);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockStoreCall {
    Get(String),
    Set(String, String),
}

/// Programmable client for tests: per-key returns plus a record of every
/// call, so a test can assert that a code path never touched the store.
#[derive(Clone, Default)]
pub struct MockClient {
    get_ret: HashMap<String, Result<String, StoreError>>,
    set_ret: HashMap<String, Result<(), StoreError>>,
    calls: Arc<Mutex<Vec<MockStoreCall>>>,
}

impl MockClient {
    pub fn new() -> MockClient {
        MockClient::default()
    }

    fn lock_calls(&self) -> MutexGuard<'_, Vec<MockStoreCall>> {
        match self.calls.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn get_ret(&mut self, key: &str, ret: Result<String, StoreError>) -> Self {
        self.get_ret.insert(key.to_owned(), ret);
        self.clone()
    }

    pub fn set_ret(&mut self, key: &str, ret: Result<(), StoreError>) -> Self {
        self.set_ret.insert(key.to_owned(), ret);
        self.clone()
    }

    pub fn calls(&self) -> Vec<MockStoreCall> {
        self.lock_calls().clone()
    }
}

impl Client for MockClient {
    fn get(&self, k: String) -> Result<String, StoreError> {
        self.lock_calls().push(MockStoreCall::Get(k.clone()));
        match self.get_ret.get(&k) {
            Some(ret) => ret.clone(),
            None => Err(StoreError::NotFound),
        }
    }

    fn set(&self, k: String, v: String) -> Result<(), StoreError> {
        self.lock_calls().push(MockStoreCall::Set(k.clone(), v));
        match self.set_ret.get(&k) {
            Some(ret) => ret.clone(),
            None => Ok(()),
        }
    }
}
