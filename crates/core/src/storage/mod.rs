pub mod file;
pub mod format;
pub mod memory;

use crate::errors::CoreError;
use crate::models::document::Document;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Persistence of the single snapshot slot.
///
/// The unit of atomicity is the whole document: `store` either replaces the
/// slot with the complete new snapshot or leaves the previous one untouched.
/// Implementations do no locking; the ledger sequences its own calls.
pub trait SnapshotStore: Send + Sync {
    /// Read the slot. An absent slot is an empty document.
    fn load(&self) -> Result<Document, CoreError>;

    /// Overwrite the slot with `document`.
    fn store(&self, document: &Document) -> Result<(), CoreError>;
}
