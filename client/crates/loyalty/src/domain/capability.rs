//! Role Capabilities
//!
//! The role screen groups differ only in which backend route backs each
//! screen. That mapping lives here as data: `(Role, Capability) -> Endpoint`.

use std::collections::HashMap;

use derive_more::Display;
use session::Role;

use crate::error::{LoyaltyError, LoyaltyResult};

/// Something a role screen can show or do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Capability {
    #[display("points balance")]
    PointsBalance,
    #[display("KYC status")]
    KycStatus,
    #[display("request redemption")]
    RequestRedemption,
    #[display("transfer points")]
    TransferPoints,
    #[display("linked users")]
    LinkedUsers,
    #[display("add linked user")]
    AddLinkedUser,
    #[display("retailer redemption queue")]
    RetailerRedemptionQueue,
    #[display("user redemption queue")]
    UserRedemptionQueue,
    #[display("approve retailer redemption")]
    ApproveRetailerRedemption,
    #[display("approve user redemption")]
    ApproveUserRedemption,
}

impl Capability {
    pub const ALL: [Capability; 10] = [
        Capability::PointsBalance,
        Capability::KycStatus,
        Capability::RequestRedemption,
        Capability::TransferPoints,
        Capability::LinkedUsers,
        Capability::AddLinkedUser,
        Capability::RetailerRedemptionQueue,
        Capability::UserRedemptionQueue,
        Capability::ApproveRetailerRedemption,
        Capability::ApproveUserRedemption,
    ];

    /// Text the screen shows when the backend refuses or garbles the call
    pub const fn failure_message(&self) -> &'static str {
        use Capability::*;
        match self {
            PointsBalance => "Error fetching points",
            KycStatus => "Failed to fetch KYC status",
            RequestRedemption => "Insufficient Points or Something Went Wrong",
            TransferPoints => "Insufficient points",
            LinkedUsers => "Error fetching users",
            AddLinkedUser => "Error Occurred: Please check the entered mail ID",
            RetailerRedemptionQueue | UserRedemptionQueue => "Error fetching redemption requests",
            ApproveRetailerRedemption | ApproveUserRedemption => "Redemption Failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum HttpMethod {
    #[display("GET")]
    Get,
    #[display("POST")]
    Post,
}

/// Backend route for one capability
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{method} {path}")]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path: String,
}

impl Endpoint {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
        }
    }
}

/// Route table for every supported `(Role, Capability)` pair
#[derive(Debug, Clone)]
pub struct CapabilityCatalog {
    routes: HashMap<(Role, Capability), Endpoint>,
}

impl Default for CapabilityCatalog {
    fn default() -> Self {
        Self::with_api_prefix("/api")
    }
}

impl CapabilityCatalog {
    /// The backend's route layout under `prefix`
    pub fn with_api_prefix(prefix: &str) -> Self {
        use Capability::*;

        let users = format!("{}/{}", prefix, Role::User.path_segment());
        let retailer = format!("{}/{}", prefix, Role::Retailer.path_segment());
        let manufacturer = format!("{}/{}", prefix, Role::Manufacturer.path_segment());

        let routes = HashMap::from([
            ((Role::User, PointsBalance), Endpoint::get(format!("{users}/points"))),
            ((Role::User, KycStatus), Endpoint::get(format!("{users}/kyc/status"))),
            (
                (Role::User, RequestRedemption),
                Endpoint::post(format!("{users}/request-redemption")),
            ),
            ((Role::Retailer, PointsBalance), Endpoint::get(format!("{retailer}/points"))),
            ((Role::Retailer, KycStatus), Endpoint::get(format!("{retailer}/kyc/status"))),
            (
                (Role::Retailer, RequestRedemption),
                Endpoint::post(format!("{retailer}/request-redemption")),
            ),
            (
                (Role::Retailer, TransferPoints),
                Endpoint::post(format!("{retailer}/transfer-points")),
            ),
            ((Role::Retailer, LinkedUsers), Endpoint::get(format!("{retailer}/users"))),
            ((Role::Retailer, AddLinkedUser), Endpoint::post(format!("{retailer}/addusers"))),
            (
                (Role::Manufacturer, RetailerRedemptionQueue),
                Endpoint::get(format!("{manufacturer}/retailer/all-requests")),
            ),
            (
                (Role::Manufacturer, UserRedemptionQueue),
                Endpoint::get(format!("{manufacturer}/users/all-requests")),
            ),
            (
                (Role::Manufacturer, ApproveRetailerRedemption),
                Endpoint::post(format!("{manufacturer}/approve-redemption")),
            ),
            (
                (Role::Manufacturer, ApproveUserRedemption),
                Endpoint::post(format!("{manufacturer}/user-approve-redemption")),
            ),
        ]);

        Self { routes }
    }

    /// Route for the pair, or `Unsupported` without touching the network
    pub fn endpoint(&self, role: Role, capability: Capability) -> LoyaltyResult<&Endpoint> {
        self.routes
            .get(&(role, capability))
            .ok_or(LoyaltyError::Unsupported { role, capability })
    }

    pub fn supports(&self, role: Role, capability: Capability) -> bool {
        self.routes.contains_key(&(role, capability))
    }

    /// Capabilities available to `role`, in declaration order
    pub fn capabilities(&self, role: Role) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|c| self.supports(role, *c))
            .collect()
    }

    /// Override or add a single route
    pub fn with_endpoint(mut self, role: Role, capability: Capability, endpoint: Endpoint) -> Self {
        self.routes.insert((role, capability), endpoint);
        self
    }
}
