//! Persistence layer — key-value preference storage.

pub mod libsql_backend;
pub mod memory;
pub mod preferences;
pub mod traits;

pub use libsql_backend::LibSqlPreferenceStore;
pub use memory::MemoryPreferenceStore;
pub use preferences::{Preferences, preference_keys};
pub use traits::PreferenceStore;
