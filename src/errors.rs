use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("unsupported day count basis: {basis}")]
    UnsupportedDayCountBasis {
        basis: String,
    },

    #[error("unknown rounding mode: {mode}")]
    UnknownRoundingMode {
        mode: String,
    },

    #[error("unknown charge type: {value}")]
    UnknownChargeType {
        value: String,
    },

    #[error("tier {tier} bounds straddle zero: min {min}, max {max}")]
    MixedSignTierBounds {
        tier: String,
        min: Decimal,
        max: Decimal,
    },

    #[error("address mapping is missing the {role} entry")]
    MissingAddress {
        role: String,
    },

    #[error("duplicate client transaction id: {id}")]
    DuplicateClientTransactionId {
        id: String,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
