//! Credential Store
//!
//! Durable, flat string key/value storage scoped to one installation.
//! The backend is the sole arbiter of token validity, so the store only
//! promises best-effort durability across restarts: no expiry, no encryption.

pub mod file;
pub mod memory;

use kernel::error::app_error::AppError;
use thiserror::Error;

/// Well-known keys
pub mod keys {
    /// Bearer token
    pub const TOKEN: &str = "token";
    /// Backend-assigned identifier of the logged-in account
    pub const LOGGED_ID: &str = "loggedId";
    /// Role code (`user` / `retailer` / `manufacturer`)
    pub const ROLE: &str = "role";

    /// Keys written together on login and removed together on logout
    pub const SESSION: [&str; 3] = [TOKEN, LOGGED_ID, ROLE];
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Credential store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing file could not be read or written
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing file holds something other than a flat string map
    #[error("Storage format error: {0}")]
    Format(#[from] serde_json::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::storage("Could not access saved login data").with_source(err)
    }
}

/// Key/value credential store
///
/// `get` never fails: unreadable data is logged and reported as absent.
#[trait_variant::make(KeyValueStore: Send)]
pub trait LocalKeyValueStore {
    /// Read a value; `None` if absent or unreadable
    async fn get(&self, key: &str) -> Option<String>;

    /// Write a value, overwriting any previous one
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove a value; no-op if absent
    async fn remove(&self, key: &str) -> StoreResult<()>;

    /// Remove every app-scoped key
    async fn clear(&self) -> StoreResult<()>;
}
