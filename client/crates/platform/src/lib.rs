//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations for the client:
//! - Backend configuration (base URL, timeouts)
//! - Credential store backends (in-memory, JSON file)
//! - Bearer-token HTTP client with per-request cancellation
//! - Pre-signed object uploads
//! - Hashing / encoding helpers

pub mod config;
pub mod crypto;
pub mod error;
pub mod http;
pub mod storage;
pub mod upload;

pub use config::BackendConfig;
pub use error::{ApiError, ApiResult};
pub use http::{ApiClient, Method, RawResponse};
pub use storage::{KeyValueStore, StoreError, StoreResult, file::FileStore, memory::MemoryStore};

/// Cancellation handle accepted by every request method
pub use tokio_util::sync::CancellationToken;
