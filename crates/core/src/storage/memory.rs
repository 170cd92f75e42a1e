use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::errors::CoreError;
use crate::models::document::Document;

use super::format;
use super::SnapshotStore;

#[derive(Debug, Default)]
struct Slots {
    current: Option<Vec<u8>>,
    quarantined: Vec<Vec<u8>>,
}

/// In-process snapshot slot.
///
/// Keeps the serialized bytes rather than a `Document`, so it behaves like a
/// real medium: round trips go through the codec and corrupt content can be
/// planted with [`MemoryStore::with_raw`]. Can be flipped to unavailable to
/// simulate a failing medium.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<Slots>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with arbitrary slot content.
    pub fn with_raw(bytes: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        store.lock().current = Some(bytes.into());
        store
    }

    /// Current slot bytes, `None` if nothing was ever stored.
    pub fn raw(&self) -> Option<Vec<u8>> {
        self.lock().current.clone()
    }

    /// Corrupt payloads set aside by `store` before overwriting, oldest first.
    pub fn quarantined(&self) -> Vec<Vec<u8>> {
        self.lock().quarantined.clone()
    }

    /// Make every subsequent `load`/`store` fail with `StorageUnavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), CoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CoreError::StorageUnavailable("memory slot is offline".into()));
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Document, CoreError> {
        self.check_available()?;
        let slots = self.lock();
        let Some(bytes) = slots.current.as_ref() else {
            return Ok(Document::new());
        };
        match format::decode(bytes) {
            Ok(document) => Ok(document),
            Err(CoreError::MalformedSnapshot(reason)) => {
                tracing::warn!("malformed snapshot treated as empty: {reason}");
                Ok(Document::new())
            }
            Err(e) => Err(e),
        }
    }

    fn store(&self, document: &Document) -> Result<(), CoreError> {
        self.check_available()?;
        let bytes = format::encode(document)?;
        let mut slots = self.lock();
        if let Some(previous) = slots.current.take() {
            if format::decode(&previous).is_err() {
                slots.quarantined.push(previous);
            }
        }
        slots.current = Some(bytes);
        Ok(())
    }
}
