use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate, RoundingMode};
use crate::interest::DayCountBasis;

/// balance addresses and internal accounts one charge posts through
///
/// blank entries are allowed for sides a product never uses; touching a
/// blank entry at posting time is a `MissingAddress` error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AddressMapping {
    pub payable_address: String,
    pub receivable_address: String,
    pub payable_internal_account: String,
    pub paid_internal_account: String,
    pub receivable_internal_account: String,
    pub received_internal_account: String,
}

impl AddressMapping {
    /// standard address set for accrued interest
    pub fn accrued_interest() -> Self {
        Self {
            payable_address: "ACCRUED_INTEREST_PAYABLE".to_string(),
            receivable_address: "ACCRUED_INTEREST_RECEIVABLE".to_string(),
            payable_internal_account: "ACCRUED_INTEREST_PAYABLE_ACCOUNT".to_string(),
            paid_internal_account: "INTEREST_PAID_ACCOUNT".to_string(),
            receivable_internal_account: "ACCRUED_INTEREST_RECEIVABLE_ACCOUNT".to_string(),
            received_internal_account: "INTEREST_RECEIVED_ACCOUNT".to_string(),
        }
    }

    /// standard address set for accrued fees
    pub fn accrued_fees() -> Self {
        Self {
            payable_address: "ACCRUED_FEES_PAYABLE".to_string(),
            receivable_address: "ACCRUED_FEES_RECEIVABLE".to_string(),
            payable_internal_account: "ACCRUED_FEES_PAYABLE_ACCOUNT".to_string(),
            paid_internal_account: "FEES_PAID_ACCOUNT".to_string(),
            receivable_internal_account: "ACCRUED_FEES_RECEIVABLE_ACCOUNT".to_string(),
            received_internal_account: "FEES_RECEIVED_ACCOUNT".to_string(),
        }
    }
}

/// one rate tier over a balance band
///
/// absent bounds are resolved at accrual time, not treated as zero:
/// `min` defaults to 0 and `max` to the full balance (swapped for
/// negative tiers)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierRange {
    pub min: Option<Money>,
    pub max: Option<Money>,
    pub rate: Rate,
}

impl TierRange {
    /// single rate over the whole balance
    pub fn flat(rate: Rate) -> Self {
        Self {
            min: None,
            max: None,
            rate,
        }
    }

    /// rate over an explicit balance band
    pub fn bounded(min: Money, max: Money, rate: Rate) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            rate,
        }
    }

    /// rate on everything above a threshold
    pub fn above(min: Money, rate: Rate) -> Self {
        Self {
            min: Some(min),
            max: None,
            rate,
        }
    }
}

/// everything needed to accrue one charge against one denomination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualRequest {
    pub denomination: String,
    /// balance the accrual is calculated on, signed per the account tside
    pub balance: Money,
    /// tiers post in insertion order, never re-sorted by rate or bound
    pub tiers: Vec<(String, TierRange)>,
    pub day_count_basis: DayCountBasis,
    pub precision: u32,
    pub rounding_mode: RoundingMode,
    /// Some = capitalise into this principal-tracking address
    pub capitalise_into: Option<String>,
    /// collapse all tiers into a single posting pair
    pub net_postings: bool,
    pub mapping: AddressMapping,
    /// replaces the generated description on every constructed instruction
    pub description: Option<String>,
}

impl AccrualRequest {
    pub fn new(
        denomination: impl Into<String>,
        balance: Money,
        mapping: AddressMapping,
    ) -> Self {
        Self {
            denomination: denomination.into(),
            balance,
            tiers: Vec::new(),
            day_count_basis: DayCountBasis::Actual,
            precision: 5,
            rounding_mode: RoundingMode::HalfUp,
            capitalise_into: None,
            net_postings: false,
            mapping,
            description: None,
        }
    }

    /// single flat-rate accrual, the common non-tiered case
    pub fn flat_rate(
        denomination: impl Into<String>,
        balance: Money,
        rate: Rate,
        mapping: AddressMapping,
    ) -> Self {
        let mut request = Self::new(denomination, balance, mapping);
        request.tiers.push(("".to_string(), TierRange::flat(rate)));
        request
    }
}

/// flat fees to accrue, one entry per fee name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeRequest {
    pub denomination: String,
    /// signed amounts, posted in insertion order
    pub fees: Vec<(String, Money)>,
    pub mapping: AddressMapping,
}

impl FeeRequest {
    pub fn new(
        denomination: impl Into<String>,
        fees: Vec<(String, Money)>,
        mapping: AddressMapping,
    ) -> Self {
        Self {
            denomination: denomination.into(),
            fees,
            mapping,
        }
    }
}

/// moves accrued balances into their applied form at period end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeApplicationRequest {
    pub denomination: String,
    pub precision: u32,
    pub rounding_mode: RoundingMode,
    /// post the sub-precision residue away so the accrued address lands on zero
    pub zero_out_remainder: bool,
    /// address the applied charge settles into, e.g. INTEREST_DUE
    pub apply_address: String,
    pub mapping: AddressMapping,
}

impl ChargeApplicationRequest {
    pub fn new(
        denomination: impl Into<String>,
        apply_address: impl Into<String>,
        mapping: AddressMapping,
    ) -> Self {
        Self {
            denomination: denomination.into(),
            precision: 2,
            rounding_mode: RoundingMode::HalfUp,
            zero_out_remainder: false,
            apply_address: apply_address.into(),
            mapping,
        }
    }
}
