use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// balance address postings settle into unless told otherwise
pub const DEFAULT_ADDRESS: &str = "DEFAULT";

/// asset class used for all cash movements
pub const DEFAULT_ASSET: &str = "COMMERCIAL_BANK_MONEY";

/// ledger side of the account holding the accrued balances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tside {
    /// customer owes the bank (loans, overdrafts)
    Asset,
    /// bank owes the customer (deposits, savings)
    Liability,
}

/// kind of charge being accrued or applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargeType {
    Interest,
    Fees,
}

impl ChargeType {
    /// lowercase noun for event payloads and descriptions
    pub fn noun(&self) -> &'static str {
        match self {
            ChargeType::Interest => "interest",
            ChargeType::Fees => "fees",
        }
    }
}

impl fmt::Display for ChargeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChargeType::Interest => write!(f, "INTEREST"),
            ChargeType::Fees => write!(f, "FEES"),
        }
    }
}

impl FromStr for ChargeType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INTEREST" => Ok(ChargeType::Interest),
            "FEES" => Ok(ChargeType::Fees),
            other => Err(EngineError::UnknownChargeType {
                value: other.to_string(),
            }),
        }
    }
}

/// free-form metadata attached to every posting instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionDetails {
    pub description: String,
    pub event: String,
    pub gl_impacted: bool,
    pub account_type: String,
}

impl InstructionDetails {
    pub fn new(
        description: impl Into<String>,
        event: impl Into<String>,
        gl_impacted: bool,
        account_type: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            event: event.into(),
            gl_impacted,
            account_type: account_type.into(),
        }
    }
}
