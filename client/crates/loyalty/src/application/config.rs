//! Application Configuration
//!
//! Business constants the loyalty screens apply before calling the backend.

use crate::domain::value_objects::RewardOption;

/// Loyalty application configuration
#[derive(Debug, Clone)]
pub struct LoyaltyConfig {
    /// Smallest cash redemption a user may request
    pub user_min_redemption_points: i64,
    /// Rupee value of one point, shown on the redemption form
    pub rupees_per_point: f64,
    /// Rewards a retailer can redeem for
    pub retailer_rewards: Vec<RewardOption>,
}

impl Default for LoyaltyConfig {
    fn default() -> Self {
        Self {
            user_min_redemption_points: 10_000,
            rupees_per_point: 0.02,
            retailer_rewards: vec![
                RewardOption::new("Amazon", 1000),
                RewardOption::new("Google", 500),
                RewardOption::new("Xbox", 300),
            ],
        }
    }
}

impl LoyaltyConfig {
    /// Low thresholds for exercising the flows against a local backend
    pub fn development() -> Self {
        Self {
            user_min_redemption_points: 1,
            ..Self::default()
        }
    }

    pub fn reward(&self, method: &str) -> Option<&RewardOption> {
        self.retailer_rewards
            .iter()
            .find(|r| r.method.eq_ignore_ascii_case(method))
    }
}
