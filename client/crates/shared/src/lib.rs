//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" shared by every client crate:
//! - Common error types and result aliases
//! - Error classification used to pick the message a screen shows
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
