//! Value Objects
//!
//! Small immutable types shared by the loyalty entities and use cases.

use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// KYC review state as reported by `/kyc/status`
///
/// Unknown strings are kept verbatim so they can still be shown.
#[derive(Debug, Clone, PartialEq, Eq, Display, Deserialize)]
#[serde(from = "String")]
pub enum KycStatus {
    #[display("pending")]
    Pending,
    #[display("approved")]
    Approved,
    #[display("rejected")]
    Rejected,
    #[display("{_0}")]
    Other(String),
}

impl From<String> for KycStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => KycStatus::Pending,
            "approved" => KycStatus::Approved,
            "rejected" => KycStatus::Rejected,
            _ => KycStatus::Other(s),
        }
    }
}

impl KycStatus {
    /// Redemption and transfer are locked while review is open or failed
    pub fn blocks_redemption(&self) -> bool {
        matches!(self, KycStatus::Pending | KycStatus::Rejected)
    }
}

/// Where a user's cash redemption is paid out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payout {
    Bank {
        holder_name: String,
        ifsc_code: String,
        account_number: String,
    },
    Upi { upi_number: String },
}

impl Payout {
    /// Value sent as `method`
    pub const fn method(&self) -> &'static str {
        match self {
            Payout::Bank { .. } => "bank",
            Payout::Upi { .. } => "upi",
        }
    }
}

/// Catalog reward a retailer can redeem points for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewardOption {
    pub method: String,
    pub points: i64,
}

impl RewardOption {
    pub fn new(method: impl Into<String>, points: i64) -> Self {
        Self {
            method: method.into(),
            points,
        }
    }
}

/// Which manufacturer queue a redemption request sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum RedemptionOrigin {
    #[display("retailer")]
    Retailer,
    #[display("user")]
    User,
}

/// Point counts arrive as integers, floats, numeric strings or null
pub(crate) fn lenient_points<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_or(0, |f| f as i64),
        _ => 0,
    })
}
