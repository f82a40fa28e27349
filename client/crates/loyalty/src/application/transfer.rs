//! Transfer Points Use Case
//!
//! Retailer -> linked user, tied to a purchase invoice.

use std::sync::Arc;

use platform::CancellationToken;
use serde_json::json;
use session::Role;

use super::{ensure_kyc_allows, invoke, require_logged_id};
use crate::domain::capability::{Capability, CapabilityCatalog};
use crate::domain::repository::LoyaltyGateway;
use crate::domain::services::{TransferForm, parse_transfer};
use crate::error::{LoyaltyError, LoyaltyResult};

pub const TRANSFER_SUCCESS_MESSAGE: &str = "Points transferred successfully!";

#[derive(Debug, Clone, PartialEq)]
pub struct TransferOutput {
    pub user_id: String,
    pub form: TransferForm,
}

impl TransferOutput {
    pub fn message(&self) -> &'static str {
        TRANSFER_SUCCESS_MESSAGE
    }
}

/// Transfer use case
pub struct TransferUseCase<G>
where
    G: LoyaltyGateway,
{
    gateway: Arc<G>,
    catalog: Arc<CapabilityCatalog>,
}

impl<G> TransferUseCase<G>
where
    G: LoyaltyGateway,
{
    pub fn new(gateway: Arc<G>, catalog: Arc<CapabilityCatalog>) -> Self {
        Self { gateway, catalog }
    }

    /// Validate the form, check KYC, then send the transfer
    pub async fn execute(
        &self,
        user_id: &str,
        points: &str,
        invoice_number: &str,
        bill_amount: &str,
        cancel: &CancellationToken,
    ) -> LoyaltyResult<TransferOutput> {
        let role = Role::Retailer;
        self.catalog.endpoint(role, Capability::TransferPoints)?;

        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(LoyaltyError::Validation("All fields are required".into()));
        }
        let form = parse_transfer(points, invoice_number, bill_amount)?;

        ensure_kyc_allows(&*self.gateway, &self.catalog, role, cancel).await?;
        let retailer_id = require_logged_id(&*self.gateway).await?;

        let body = json!({
            "retailerId": retailer_id,
            "userId": user_id,
            "points": form.points,
            "invoice_number": form.invoice_number,
            "bill_amount": form.bill_amount,
        });

        invoke(
            &*self.gateway,
            &self.catalog,
            role,
            Capability::TransferPoints,
            Some(body),
            cancel,
        )
        .await?;

        tracing::info!(user_id = %user_id, points = form.points, "Points transferred");
        Ok(TransferOutput {
            user_id: user_id.to_string(),
            form,
        })
    }
}
