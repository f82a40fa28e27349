//! Redemption Use Case
//!
//! Users cash out to a bank account or UPI id; retailers pick a catalog
//! reward. Manufacturers review both queues and approve with a coupon code.

use std::sync::Arc;

use platform::CancellationToken;
use serde::Deserialize;
use serde_json::{Value, json};
use session::Role;

use super::config::LoyaltyConfig;
use super::{ensure_kyc_allows, fetch, invoke, require_logged_id};
use crate::domain::capability::{Capability, CapabilityCatalog};
use crate::domain::entities::{PendingRedemption, RedemptionRequest};
use crate::domain::repository::LoyaltyGateway;
use crate::domain::services::validate_user_redemption;
use crate::domain::value_objects::{Payout, RedemptionOrigin, RewardOption};
use crate::error::{LoyaltyError, LoyaltyResult};

/// Accepted redemption request
#[derive(Debug, Clone, PartialEq)]
pub struct RedemptionOutput {
    pub points: i64,
    pub method: String,
    /// Backend reply, kept for screens that show it
    pub response: Value,
}

impl RedemptionOutput {
    pub fn message(&self) -> String {
        format!("{} points have been redeemed for {}", self.points, self.method)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QueueBody {
    requests: Vec<RedemptionRequest>,
}

/// Redemption use case
pub struct RedemptionUseCase<G>
where
    G: LoyaltyGateway,
{
    gateway: Arc<G>,
    catalog: Arc<CapabilityCatalog>,
    config: Arc<LoyaltyConfig>,
}

impl<G> RedemptionUseCase<G>
where
    G: LoyaltyGateway,
{
    pub fn new(
        gateway: Arc<G>,
        catalog: Arc<CapabilityCatalog>,
        config: Arc<LoyaltyConfig>,
    ) -> Self {
        Self {
            gateway,
            catalog,
            config,
        }
    }

    /// User cash redemption
    pub async fn request_for_user(
        &self,
        points: i64,
        payout: &Payout,
        cancel: &CancellationToken,
    ) -> LoyaltyResult<RedemptionOutput> {
        let role = Role::User;
        self.catalog.endpoint(role, Capability::RequestRedemption)?;
        validate_user_redemption(points, payout, self.config.user_min_redemption_points)?;
        ensure_kyc_allows(&*self.gateway, &self.catalog, role, cancel).await?;

        let user_id = require_logged_id(&*self.gateway).await?;
        let (holder_name, ifsc_code, account_number, upi_number) = match payout {
            Payout::Bank {
                holder_name,
                ifsc_code,
                account_number,
            } => (
                Some(holder_name.trim()),
                Some(ifsc_code.trim()),
                Some(account_number.trim()),
                None,
            ),
            Payout::Upi { upi_number } => (None, None, None, Some(upi_number.trim())),
        };
        let body = json!({
            "userId": user_id,
            "points": points,
            "method": payout.method(),
            "holderName": holder_name,
            "ifscCode": ifsc_code,
            "accountNumber": account_number,
            "upiNumber": upi_number,
        });

        let response = invoke(
            &*self.gateway,
            &self.catalog,
            role,
            Capability::RequestRedemption,
            Some(body),
            cancel,
        )
        .await?;

        tracing::info!(
            role = %role,
            points = points,
            method = payout.method(),
            "Redemption requested"
        );
        Ok(RedemptionOutput {
            points,
            method: payout.method().to_string(),
            response,
        })
    }

    /// Retailer catalog redemption
    pub async fn request_for_retailer(
        &self,
        reward: &RewardOption,
        cancel: &CancellationToken,
    ) -> LoyaltyResult<RedemptionOutput> {
        let role = Role::Retailer;
        self.catalog.endpoint(role, Capability::RequestRedemption)?;
        ensure_kyc_allows(&*self.gateway, &self.catalog, role, cancel).await?;

        let retailer_id = require_logged_id(&*self.gateway).await?;
        let body = json!({
            "retailerId": retailer_id,
            "points": reward.points,
            "method": reward.method,
        });

        let response = invoke(
            &*self.gateway,
            &self.catalog,
            role,
            Capability::RequestRedemption,
            Some(body),
            cancel,
        )
        .await?;

        tracing::info!(
            role = %role,
            points = reward.points,
            method = %reward.method,
            "Redemption requested"
        );
        Ok(RedemptionOutput {
            points: reward.points,
            method: reward.method.clone(),
            response,
        })
    }

    /// Pending requests in one manufacturer queue
    pub async fn pending(
        &self,
        origin: RedemptionOrigin,
        cancel: &CancellationToken,
    ) -> LoyaltyResult<Vec<PendingRedemption>> {
        let body: QueueBody = fetch(
            &*self.gateway,
            &self.catalog,
            Role::Manufacturer,
            queue_capability(origin),
            cancel,
        )
        .await?;

        Ok(body
            .requests
            .into_iter()
            .filter(RedemptionRequest::is_pending)
            .map(|request| PendingRedemption { origin, request })
            .collect())
    }

    /// Approve a pending request with the coupon code issued for it
    pub async fn approve(
        &self,
        origin: RedemptionOrigin,
        request_id: &str,
        coupon_code: &str,
        cancel: &CancellationToken,
    ) -> LoyaltyResult<()> {
        let coupon_code = coupon_code.trim();
        if coupon_code.is_empty() {
            return Err(LoyaltyError::Validation("Coupon code is required".into()));
        }

        // The two approval routes name the id field differently
        let body = match origin {
            RedemptionOrigin::Retailer => json!({
                "redemptionRequestId": request_id,
                "couponCode": coupon_code,
            }),
            RedemptionOrigin::User => json!({
                "userredemptionRequestId": request_id,
                "couponCode": coupon_code,
            }),
        };

        invoke(
            &*self.gateway,
            &self.catalog,
            Role::Manufacturer,
            approve_capability(origin),
            Some(body),
            cancel,
        )
        .await?;

        tracing::info!(origin = %origin, request_id = %request_id, "Redemption approved");
        Ok(())
    }
}

const fn queue_capability(origin: RedemptionOrigin) -> Capability {
    match origin {
        RedemptionOrigin::Retailer => Capability::RetailerRedemptionQueue,
        RedemptionOrigin::User => Capability::UserRedemptionQueue,
    }
}

const fn approve_capability(origin: RedemptionOrigin) -> Capability {
    match origin {
        RedemptionOrigin::Retailer => Capability::ApproveRetailerRedemption,
        RedemptionOrigin::User => Capability::ApproveUserRedemption,
    }
}
