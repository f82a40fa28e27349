//! Linked Users Use Case
//!
//! Plumbers a retailer can send points to.

use std::sync::Arc;

use platform::CancellationToken;
use serde::Deserialize;
use serde_json::json;
use session::Role;
use session::models::email::Email;

use super::{fetch, invoke, require_logged_id};
use crate::domain::capability::{Capability, CapabilityCatalog};
use crate::domain::entities::LinkedUser;
use crate::domain::repository::LoyaltyGateway;
use crate::error::{LoyaltyError, LoyaltyResult};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UsersBody {
    users: Vec<LinkedUser>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AddBody {
    user: Option<AddedUser>,
}

/// User the backend linked
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AddedUser {
    pub email: String,
}

impl AddedUser {
    pub fn message(&self) -> String {
        format!("Plumber added successfully: {}", self.email)
    }
}

/// Linked users use case
pub struct LinkedUsersUseCase<G>
where
    G: LoyaltyGateway,
{
    gateway: Arc<G>,
    catalog: Arc<CapabilityCatalog>,
}

impl<G> LinkedUsersUseCase<G>
where
    G: LoyaltyGateway,
{
    pub fn new(gateway: Arc<G>, catalog: Arc<CapabilityCatalog>) -> Self {
        Self { gateway, catalog }
    }

    pub async fn list(&self, cancel: &CancellationToken) -> LoyaltyResult<Vec<LinkedUser>> {
        let body: UsersBody = fetch(
            &*self.gateway,
            &self.catalog,
            Role::Retailer,
            Capability::LinkedUsers,
            cancel,
        )
        .await?;
        Ok(body.users)
    }

    /// Link an existing plumber account by email
    pub async fn add(&self, email: &str, cancel: &CancellationToken) -> LoyaltyResult<AddedUser> {
        let role = Role::Retailer;
        self.catalog.endpoint(role, Capability::AddLinkedUser)?;

        let email = Email::new(email).map_err(|e| LoyaltyError::Validation(e.user_message()))?;
        let retailer_id = require_logged_id(&*self.gateway).await?;

        let reply = invoke(
            &*self.gateway,
            &self.catalog,
            role,
            Capability::AddLinkedUser,
            Some(json!({ "retailerId": retailer_id, "email": email.as_str() })),
            cancel,
        )
        .await?;

        let added = serde_json::from_value::<AddBody>(reply)?
            .user
            .unwrap_or_else(|| AddedUser {
                email: email.as_str().to_string(),
            });

        tracing::info!(email = %added.email, "Linked user added");
        Ok(added)
    }
}
