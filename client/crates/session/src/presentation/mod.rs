//! Presentation Layer
//!
//! Screen routing driven by the session state.

pub mod guard;

pub use guard::{GuardDecision, Navigator, RouterGuard, ScreenGroup, decide};
