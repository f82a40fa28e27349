//! Infrastructure Layer
//!
//! HTTP implementation of the loyalty gateway.

pub mod http;

pub use http::HttpLoyaltyGateway;
