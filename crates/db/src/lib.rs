//! Storage plumbing shared by the catalog modules.
//!
//! Entity stores live next to their modules; this crate provides what they
//! have in common: the SQLite pool factory, the migration runner, opaque
//! record identifiers, name collation and the store error type.

pub mod collation;
pub mod error;
pub mod id;
pub mod migrate;
pub mod pool;

pub use collation::Collation;
pub use error::{StoreError, StoreResult};
pub use id::RecordId;
pub use pool::{connect, connect_in_memory};
pub use sqlx::SqlitePool;
