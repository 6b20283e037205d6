use crate::CoreError;

pub mod memory;

pub use memory::MemoryKv;

pub const DEFAULT_CARDS_KEY: &str = "flashcards";

const PROBE_KEY: &str = "__storage_test__";

/// Synchronous local key-value slot storage the card store persists into.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;

    /// Whether the backend currently accepts writes.
    fn probe(&self) -> bool {
        self.set(PROBE_KEY, PROBE_KEY).is_ok() && self.remove(PROBE_KEY).is_ok()
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).get(key)
    }
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        (**self).set(key, value)
    }
    fn remove(&self, key: &str) -> Result<(), CoreError> {
        (**self).remove(key)
    }
    fn probe(&self) -> bool {
        (**self).probe()
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).get(key)
    }
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        (**self).set(key, value)
    }
    fn remove(&self, key: &str) -> Result<(), CoreError> {
        (**self).remove(key)
    }
    fn probe(&self) -> bool {
        (**self).probe()
    }
}
