//! Points Balance / KYC Status Use Case

use std::sync::Arc;

use platform::CancellationToken;
use session::Role;

use super::fetch;
use crate::domain::capability::{Capability, CapabilityCatalog};
use crate::domain::entities::{KycReport, PointsBalance};
use crate::domain::repository::LoyaltyGateway;
use crate::error::LoyaltyResult;

/// Balance use case
pub struct BalanceUseCase<G>
where
    G: LoyaltyGateway,
{
    gateway: Arc<G>,
    catalog: Arc<CapabilityCatalog>,
}

impl<G> BalanceUseCase<G>
where
    G: LoyaltyGateway,
{
    pub fn new(gateway: Arc<G>, catalog: Arc<CapabilityCatalog>) -> Self {
        Self { gateway, catalog }
    }

    pub async fn points(
        &self,
        role: Role,
        cancel: &CancellationToken,
    ) -> LoyaltyResult<PointsBalance> {
        fetch(&*self.gateway, &self.catalog, role, Capability::PointsBalance, cancel).await
    }

    pub async fn kyc_status(
        &self,
        role: Role,
        cancel: &CancellationToken,
    ) -> LoyaltyResult<KycReport> {
        fetch(&*self.gateway, &self.catalog, role, Capability::KycStatus, cancel).await
    }
}
