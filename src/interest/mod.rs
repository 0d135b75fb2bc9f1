pub mod day_count;
pub mod tiers;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::requests::FeeRequest;

pub use day_count::{yearly_to_daily_rate, DayCountBasis};
pub use tiers::calculate_accruals;

/// one tier's contribution to an accrual run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierAccrual {
    /// tier or fee name; empty for un-tiered interest
    pub name: String,
    /// signed accrual amount; the posting scenario derives from its sign
    pub amount: Money,
    pub description: String,
}

/// convert flat fees into accruals, one per fee entry
///
/// fees are not rate-based and never prorated; zero amounts are dropped
pub fn fee_accruals(request: &FeeRequest) -> Vec<TierAccrual> {
    request
        .fees
        .iter()
        .filter(|(_, amount)| !amount.is_zero())
        .map(|(name, amount)| TierAccrual {
            name: name.clone(),
            amount: *amount,
            description: format!("Accrued fee {}.", name),
        })
        .collect()
}
