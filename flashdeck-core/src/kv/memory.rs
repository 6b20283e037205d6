use crate::{kv::KeyValueStore, CoreError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Process-local store. Reads and writes can be switched to fail, which
/// stands in for a full disk or a revoked data directory.
#[derive(Default)]
pub struct MemoryKv {
    slots: RwLock<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let kv = Self::default();
        kv.slots.write().insert(key.to_string(), value.to_string());
        kv
    }

    pub fn fail_reads(&self, on: bool) {
        self.fail_reads.store(on, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, on: bool) {
        self.fail_writes.store(on, Ordering::SeqCst);
    }

    /// Raw slot contents, bypassing failure injection.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.slots.read().get(key).cloned()
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CoreError::storage("read refused"));
        }
        Ok(self.slots.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CoreError::storage("quota exceeded"));
        }
        self.slots.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CoreError::storage("remove refused"));
        }
        self.slots.write().remove(key);
        Ok(())
    }
}
