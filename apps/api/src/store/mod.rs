//! Session repository. Handlers depend on the `SessionStore` trait only, so
//! the backing medium (single JSON file today) is swappable without touching
//! them.

pub mod file;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::session::Session;

pub use file::FileSessionStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Durable collection of `Session` records keyed by id.
///
/// Replace-or-append-by-id semantics; concurrent upserts to the same id are
/// last-write-wins (single logical writer per session is assumed).
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Assigns an id and `created_at` if absent, then replaces the record
    /// with a matching id or appends a new one. Returns the stored record.
    async fn upsert(&self, session: Session) -> Result<Session, StoreError>;

    /// All records, newest `created_at` first.
    async fn list(&self) -> Result<Vec<Session>, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Session>, StoreError>;

    /// Removes the record with the given id. Returns the number removed
    /// (0 when absent — not an error).
    async fn delete(&self, id: &str) -> Result<usize, StoreError>;
}
