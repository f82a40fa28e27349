//! Role Screens
//!
//! One facade per signed-in role. Each method backs one screen and settles
//! into a [`ViewState`]; calls the role has no route for fail before any I/O.

use std::sync::Arc;

use platform::CancellationToken;
use session::Role;

use super::view_state::ViewState;
use crate::application::{
    AddedUser, BalanceUseCase, LinkedUsersUseCase, LoyaltyConfig, RedemptionOutput,
    RedemptionUseCase, TransferOutput, TransferUseCase,
};
use crate::domain::capability::{Capability, CapabilityCatalog};
use crate::domain::entities::{KycReport, LinkedUser, PendingRedemption, PointsBalance};
use crate::domain::repository::LoyaltyGateway;
use crate::domain::services::rupee_value;
use crate::domain::value_objects::{Payout, RedemptionOrigin};
use crate::error::{LoyaltyError, LoyaltyResult};

/// Screens available to one role
pub struct RoleScreens<G>
where
    G: LoyaltyGateway,
{
    role: Role,
    catalog: Arc<CapabilityCatalog>,
    config: Arc<LoyaltyConfig>,
    balance: BalanceUseCase<G>,
    redemption: RedemptionUseCase<G>,
    transfer: TransferUseCase<G>,
    linked_users: LinkedUsersUseCase<G>,
}

impl<G> RoleScreens<G>
where
    G: LoyaltyGateway,
{
    pub fn new(
        role: Role,
        gateway: Arc<G>,
        catalog: Arc<CapabilityCatalog>,
        config: Arc<LoyaltyConfig>,
    ) -> Self {
        Self {
            role,
            balance: BalanceUseCase::new(gateway.clone(), catalog.clone()),
            redemption: RedemptionUseCase::new(gateway.clone(), catalog.clone(), config.clone()),
            transfer: TransferUseCase::new(gateway.clone(), catalog.clone()),
            linked_users: LinkedUsersUseCase::new(gateway, catalog.clone()),
            catalog,
            config,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn config(&self) -> &LoyaltyConfig {
        &self.config
    }

    /// Screens to offer in this role's navigation
    pub fn capabilities(&self) -> Vec<Capability> {
        self.catalog.capabilities(self.role)
    }

    /// Rupee value of `points` for the redemption form
    pub fn rupee_value(&self, points: i64) -> f64 {
        rupee_value(points, self.config.rupees_per_point)
    }

    pub async fn points(&self, cancel: &CancellationToken) -> ViewState<PointsBalance> {
        ViewState::from_result(
            self.balance.points(self.role, cancel).await,
            Capability::PointsBalance,
        )
    }

    pub async fn kyc_status(&self, cancel: &CancellationToken) -> ViewState<KycReport> {
        ViewState::from_result(
            self.balance.kyc_status(self.role, cancel).await,
            Capability::KycStatus,
        )
    }

    /// User cash redemption to a bank account or UPI id
    pub async fn redeem_cash(
        &self,
        points: i64,
        payout: &Payout,
        cancel: &CancellationToken,
    ) -> ViewState<RedemptionOutput> {
        let result = match self.only(Role::User, Capability::RequestRedemption) {
            Ok(()) => self.redemption.request_for_user(points, payout, cancel).await,
            Err(e) => Err(e),
        };
        ViewState::from_result(result, Capability::RequestRedemption)
    }

    /// Retailer redemption for a configured reward
    pub async fn redeem_reward(
        &self,
        method: &str,
        cancel: &CancellationToken,
    ) -> ViewState<RedemptionOutput> {
        let result = match self.only(Role::Retailer, Capability::RequestRedemption) {
            Ok(()) => match self.config.reward(method) {
                Some(reward) => self.redemption.request_for_retailer(reward, cancel).await,
                None => Err(LoyaltyError::Validation(format!("Unknown reward: {}", method))),
            },
            Err(e) => Err(e),
        };
        ViewState::from_result(result, Capability::RequestRedemption)
    }

    pub async fn transfer(
        &self,
        user_id: &str,
        points: &str,
        invoice_number: &str,
        bill_amount: &str,
        cancel: &CancellationToken,
    ) -> ViewState<TransferOutput> {
        let result = match self.supported(Capability::TransferPoints) {
            Ok(()) => {
                self.transfer
                    .execute(user_id, points, invoice_number, bill_amount, cancel)
                    .await
            }
            Err(e) => Err(e),
        };
        ViewState::from_result(result, Capability::TransferPoints)
    }

    pub async fn linked_users(&self, cancel: &CancellationToken) -> ViewState<Vec<LinkedUser>> {
        let result = match self.supported(Capability::LinkedUsers) {
            Ok(()) => self.linked_users.list(cancel).await,
            Err(e) => Err(e),
        };
        ViewState::from_result(result, Capability::LinkedUsers)
    }

    pub async fn add_linked_user(
        &self,
        email: &str,
        cancel: &CancellationToken,
    ) -> ViewState<AddedUser> {
        let result = match self.supported(Capability::AddLinkedUser) {
            Ok(()) => self.linked_users.add(email, cancel).await,
            Err(e) => Err(e),
        };
        ViewState::from_result(result, Capability::AddLinkedUser)
    }

    pub async fn redemption_queue(
        &self,
        origin: RedemptionOrigin,
        cancel: &CancellationToken,
    ) -> ViewState<Vec<PendingRedemption>> {
        let capability = match origin {
            RedemptionOrigin::Retailer => Capability::RetailerRedemptionQueue,
            RedemptionOrigin::User => Capability::UserRedemptionQueue,
        };
        let result = match self.supported(capability) {
            Ok(()) => self.redemption.pending(origin, cancel).await,
            Err(e) => Err(e),
        };
        ViewState::from_result(result, capability)
    }

    pub async fn approve_redemption(
        &self,
        origin: RedemptionOrigin,
        request_id: &str,
        coupon_code: &str,
        cancel: &CancellationToken,
    ) -> ViewState<()> {
        let capability = match origin {
            RedemptionOrigin::Retailer => Capability::ApproveRetailerRedemption,
            RedemptionOrigin::User => Capability::ApproveUserRedemption,
        };
        let result = match self.supported(capability) {
            Ok(()) => {
                self.redemption
                    .approve(origin, request_id, coupon_code, cancel)
                    .await
            }
            Err(e) => Err(e),
        };
        ViewState::from_result(result, capability)
    }

    fn supported(&self, capability: Capability) -> LoyaltyResult<()> {
        self.catalog.endpoint(self.role, capability).map(|_| ())
    }

    /// Capability shared by several roles whose body differs per role
    fn only(&self, role: Role, capability: Capability) -> LoyaltyResult<()> {
        if self.role != role {
            return Err(LoyaltyError::Unsupported {
                role: self.role,
                capability,
            });
        }
        self.supported(capability)
    }
}
