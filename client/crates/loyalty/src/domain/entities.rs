//! Domain Entities
//!
//! Backend records as the loyalty screens consume them. Every field is
//! optional on the wire; missing counts read as zero.

use serde::Deserialize;
use session::Role;

use super::value_objects::{KycStatus, RedemptionOrigin, lenient_points};

/// `/points` reply
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PointsBalance {
    #[serde(alias = "username")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_points")]
    pub points_received: i64,
    #[serde(deserialize_with = "lenient_points")]
    pub points_redeemed: i64,
    #[serde(deserialize_with = "lenient_points")]
    pub points_sent: i64,
    #[serde(deserialize_with = "lenient_points")]
    pub expiring_points: i64,
    #[serde(rename = "points_to_be_Redeemed", deserialize_with = "lenient_points")]
    pub points_to_be_redeemed: i64,
    pub kyc_status: Option<KycStatus>,
}

impl PointsBalance {
    /// Points the holder can still spend
    ///
    /// Users spend by redeeming; retailers spend by sending to users.
    pub fn available_for(&self, role: Role) -> i64 {
        match role {
            Role::Retailer => self.points_received - self.points_sent,
            Role::User | Role::Manufacturer => self.points_received - self.points_redeemed,
        }
    }
}

/// `/kyc/status` reply
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KycReport {
    pub status: KycStatus,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Redemption request as listed in the manufacturer queues
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RedemptionRequest {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub method: String,
    #[serde(deserialize_with = "lenient_points")]
    pub points: i64,
    pub status: String,
    pub date_requested: Option<String>,
    pub holder_name: Option<String>,
    pub ifsc_code: Option<String>,
    pub account_number: Option<String>,
    pub upi_number: Option<String>,
}

impl RedemptionRequest {
    pub fn is_pending(&self) -> bool {
        self.status == "pending"
    }
}

/// Queue entry tagged with the queue it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRedemption {
    pub origin: RedemptionOrigin,
    pub request: RedemptionRequest,
}

/// Plumber linked to a retailer
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LinkedUser {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(deserialize_with = "lenient_points")]
    pub points: i64,
}
