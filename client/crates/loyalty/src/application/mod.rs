//! Application Layer
//!
//! Use cases for each role capability.

pub mod balance;
pub mod config;
pub mod linked_users;
pub mod redemption;
pub mod transfer;

use platform::CancellationToken;
use serde::de::DeserializeOwned;
use serde_json::Value;
use session::Role;

use crate::domain::capability::{Capability, CapabilityCatalog};
use crate::domain::entities::KycReport;
use crate::domain::repository::LoyaltyGateway;
use crate::error::{LoyaltyError, LoyaltyResult};

// Re-exports
pub use balance::BalanceUseCase;
pub use config::LoyaltyConfig;
pub use linked_users::{AddedUser, LinkedUsersUseCase};
pub use redemption::{RedemptionOutput, RedemptionUseCase};
pub use transfer::{TransferOutput, TransferUseCase};

/// Resolve the route and call it
async fn invoke<G>(
    gateway: &G,
    catalog: &CapabilityCatalog,
    role: Role,
    capability: Capability,
    body: Option<Value>,
    cancel: &CancellationToken,
) -> LoyaltyResult<Value>
where
    G: LoyaltyGateway,
{
    let endpoint = catalog.endpoint(role, capability)?;
    tracing::debug!(
        role = %role,
        capability = %capability,
        endpoint = %endpoint,
        "Calling capability"
    );
    gateway.call(endpoint, body, cancel).await
}

/// Like [`invoke`], decoding the reply
async fn fetch<G, T>(
    gateway: &G,
    catalog: &CapabilityCatalog,
    role: Role,
    capability: Capability,
    cancel: &CancellationToken,
) -> LoyaltyResult<T>
where
    G: LoyaltyGateway,
    T: DeserializeOwned,
{
    let value = invoke(gateway, catalog, role, capability, None, cancel).await?;
    Ok(serde_json::from_value(value)?)
}

/// Refuse to spend points while KYC is pending or rejected
///
/// A status lookup that fails for any reason other than cancellation lets the
/// action through; the backend still has the final word.
async fn ensure_kyc_allows<G>(
    gateway: &G,
    catalog: &CapabilityCatalog,
    role: Role,
    cancel: &CancellationToken,
) -> LoyaltyResult<()>
where
    G: LoyaltyGateway,
{
    match fetch::<G, KycReport>(gateway, catalog, role, Capability::KycStatus, cancel).await {
        Ok(report) if report.status.blocks_redemption() => {
            tracing::info!(role = %role, status = %report.status, "Action blocked by KYC status");
            Err(LoyaltyError::KycBlocked(report.status))
        }
        Ok(_) => Ok(()),
        Err(e) if e.is_cancelled() => Err(e),
        Err(e) => {
            tracing::warn!(role = %role, error = %e, "KYC status unavailable, continuing");
            Ok(())
        }
    }
}

async fn require_logged_id<G>(gateway: &G) -> LoyaltyResult<String>
where
    G: LoyaltyGateway,
{
    gateway
        .logged_id()
        .await
        .filter(|id| !id.is_empty())
        .ok_or(LoyaltyError::MissingUserId)
}
