use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::EngineError;

/// signed monetary amount, carried at full precision until explicitly rounded
pub type Money = Decimal;

/// yearly or daily interest rate
pub type Rate = Decimal;

/// rounding mode applied when quantizing accrual and application amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoundingMode {
    /// round towards positive infinity
    Ceiling,
    /// round towards negative infinity
    Floor,
    /// round to nearest, ties away from zero
    #[default]
    HalfUp,
    /// round to nearest, ties towards zero
    HalfDown,
    /// round to nearest, ties to even (banker's rounding)
    HalfEven,
    /// round away from zero
    Up,
    /// round towards zero unless the truncated last digit is 0 or 5
    ZeroFiveUp,
}

impl RoundingMode {
    /// underlying strategy for the modes rust_decimal supports natively
    fn strategy(&self) -> RoundingStrategy {
        match self {
            RoundingMode::Ceiling => RoundingStrategy::ToPositiveInfinity,
            RoundingMode::Floor => RoundingStrategy::ToNegativeInfinity,
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfDown => RoundingStrategy::MidpointTowardZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::Up => RoundingStrategy::AwayFromZero,
            // handled separately in round_decimal
            RoundingMode::ZeroFiveUp => RoundingStrategy::ToZero,
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundingMode::Ceiling => "CEILING",
            RoundingMode::Floor => "FLOOR",
            RoundingMode::HalfUp => "HALF_UP",
            RoundingMode::HalfDown => "HALF_DOWN",
            RoundingMode::HalfEven => "HALF_EVEN",
            RoundingMode::Up => "UP",
            RoundingMode::ZeroFiveUp => "05UP",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for RoundingMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_uppercase();
        let token = token.strip_prefix("ROUND_").unwrap_or(&token);
        match token {
            "CEILING" => Ok(RoundingMode::Ceiling),
            "FLOOR" => Ok(RoundingMode::Floor),
            "HALF_UP" => Ok(RoundingMode::HalfUp),
            "HALF_DOWN" => Ok(RoundingMode::HalfDown),
            "HALF_EVEN" => Ok(RoundingMode::HalfEven),
            "UP" => Ok(RoundingMode::Up),
            "05UP" => Ok(RoundingMode::ZeroFiveUp),
            _ => Err(EngineError::UnknownRoundingMode {
                mode: s.to_string(),
            }),
        }
    }
}

/// quantize a decimal to the given number of decimal places
pub fn round_decimal(value: Decimal, dp: u32, mode: RoundingMode) -> Decimal {
    match mode {
        RoundingMode::ZeroFiveUp => round_zero_five_up(value, dp),
        _ => value.round_dp_with_strategy(dp, mode.strategy()),
    }
}

/// 05UP: truncate towards zero; if the truncated last digit is 0 or 5
/// and digits were actually discarded, round away from zero instead
fn round_zero_five_up(value: Decimal, dp: u32) -> Decimal {
    let truncated = value.round_dp_with_strategy(dp, RoundingStrategy::ToZero);
    if truncated == value {
        return truncated;
    }

    let mut scaled = truncated;
    scaled.rescale(dp);
    let last_digit = (scaled.mantissa() % 10).abs();
    if last_digit == 0 || last_digit == 5 {
        value.round_dp_with_strategy(dp, RoundingStrategy::AwayFromZero)
    } else {
        truncated
    }
}

/// render a decimal with exactly `dp` decimal places, rounding half-up
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    let mut fixed = round_decimal(value, dp, RoundingMode::HalfUp);
    fixed.rescale(dp);
    fixed.to_string()
}
