//! Repository Traits
//!
//! The loyalty screens only need two things from the outside world: a way to
//! call a catalog endpoint and the logged-in account id.

use platform::CancellationToken;
use serde_json::Value;

use crate::domain::capability::Endpoint;
use crate::error::LoyaltyResult;

/// Authenticated backend access
#[trait_variant::make(LoyaltyGateway: Send)]
pub trait LocalLoyaltyGateway {
    /// Call `endpoint` with an optional JSON body
    ///
    /// An empty 2xx body comes back as `Value::Null`.
    async fn call(
        &self,
        endpoint: &Endpoint,
        body: Option<Value>,
        cancel: &CancellationToken,
    ) -> LoyaltyResult<Value>;

    /// `loggedId`, read fresh on every call
    async fn logged_id(&self) -> Option<String>;
}
