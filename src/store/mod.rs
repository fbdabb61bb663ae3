//! Local profile persistence.
//!
//! Three independent records live under fixed keys: settings, the log timeline
//! and the per-day progress map. [`LocalStore`] owns the JSON encoding and the
//! "degrade to empty" read contract; a [`StorageBackend`] only moves strings.

pub mod backend;
pub mod local;
pub mod sqlite;

pub use backend::{MemoryBackend, StorageBackend, StoreError, UnavailableBackend};
pub use local::LocalStore;
pub use sqlite::SqliteBackend;
