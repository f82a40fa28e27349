//! Infrastructure Layer
//!
//! Credential-store-backed session repository and the HTTP auth gateway.

pub mod http;
pub mod store;

pub use http::HttpAuthGateway;
pub use store::StoreSessionRepository;
