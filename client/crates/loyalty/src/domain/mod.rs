//! Domain Layer
//!
//! Contains entities, value objects, the capability catalog and the gateway
//! trait.

pub mod capability;
pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;

// Re-exports
pub use capability::{Capability, CapabilityCatalog, Endpoint, HttpMethod};
pub use entities::{KycReport, LinkedUser, PendingRedemption, PointsBalance, RedemptionRequest};
pub use repository::LoyaltyGateway;
pub use value_objects::{KycStatus, Payout, RedemptionOrigin, RewardOption};
