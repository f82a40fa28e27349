//! Domain Services
//!
//! Form validation that runs before any request is made.

use crate::domain::value_objects::Payout;
use crate::error::{LoyaltyError, LoyaltyResult};

/// Retailer-to-user transfer form after validation
#[derive(Debug, Clone, PartialEq)]
pub struct TransferForm {
    pub points: i64,
    pub invoice_number: String,
    pub bill_amount: f64,
}

/// Validate the raw transfer inputs
///
/// Checked in order: presence, points format, bill format, points not above
/// the bill amount.
pub fn parse_transfer(
    points: &str,
    invoice_number: &str,
    bill_amount: &str,
) -> LoyaltyResult<TransferForm> {
    let (points, invoice_number, bill_amount) =
        (points.trim(), invoice_number.trim(), bill_amount.trim());

    if points.is_empty() || invoice_number.is_empty() || bill_amount.is_empty() {
        return Err(invalid("All fields are required"));
    }

    let points = points
        .parse::<i64>()
        .ok()
        .filter(|p| *p > 0)
        .ok_or_else(|| invalid("Points must be a positive whole number"))?;

    let bill_amount = bill_amount
        .parse::<f64>()
        .ok()
        .filter(|b| b.is_finite() && *b >= 0.0)
        .ok_or_else(|| invalid("Bill amount must be a number"))?;

    if points as f64 > bill_amount {
        return Err(invalid("Points cannot be greater than bill amount"));
    }

    Ok(TransferForm {
        points,
        invoice_number: invoice_number.to_string(),
        bill_amount,
    })
}

/// Validate a user's cash redemption
pub fn validate_user_redemption(points: i64, payout: &Payout, minimum: i64) -> LoyaltyResult<()> {
    if points < minimum {
        return Err(invalid(format!(
            "Please enter points greater than {}",
            group_thousands(minimum)
        )));
    }

    match payout {
        Payout::Bank {
            holder_name,
            ifsc_code,
            account_number,
        } if blank(holder_name) || blank(ifsc_code) || blank(account_number) => {
            Err(invalid("Please fill out all bank details"))
        }
        Payout::Upi { upi_number } if blank(upi_number) => {
            Err(invalid("Please fill out the UPI number"))
        }
        _ => Ok(()),
    }
}

/// Rupee value shown next to a redemption amount
pub fn rupee_value(points: i64, rupees_per_point: f64) -> f64 {
    points as f64 * rupees_per_point
}

/// `10000` -> `10,000`
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn invalid(message: impl Into<String>) -> LoyaltyError {
    LoyaltyError::Validation(message.into())
}
