//! Loyalty (Role Capabilities) Client Module
//!
//! Clean Architecture structure:
//! - `domain/` - Records, value objects, form rules, the capability catalog
//! - `application/` - Use cases per capability
//! - `infra/` - HTTP gateway over the authenticated API client
//! - `presentation/` - Per-role screen facades settling into `ViewState`
//!
//! ## Features
//! - Points balance and KYC status for users and retailers
//! - Cash redemption (bank / UPI) for users, catalog rewards for retailers
//! - Retailer -> user point transfers tied to an invoice
//! - Linked plumbers for retailers
//! - Manufacturer review of pending redemption requests
//!
//! Redemption and transfer are refused locally while KYC is pending or
//! rejected. Routes a role does not have are refused before any request.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::LoyaltyConfig;
pub use domain::{
    Capability, CapabilityCatalog, Endpoint, HttpMethod, KycStatus, LoyaltyGateway, Payout,
    RedemptionOrigin, RewardOption,
};
pub use error::{LoyaltyError, LoyaltyResult};
pub use infra::http::HttpLoyaltyGateway;
pub use presentation::{RoleScreens, ViewState};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
}
