use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{round_decimal, Rate, RoundingMode};
use crate::errors::EngineError;

/// daily rates carry ten decimal places regardless of accrual precision
const DAILY_RATE_PRECISION: u32 = 10;

/// days-in-year convention for converting yearly rates to daily rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayCountBasis {
    /// 366 days in a leap year, 365 otherwise
    Actual,
    /// fixed 360-day year
    Fixed360,
    /// fixed 365-day year
    Fixed365,
    /// fixed 366-day year
    Fixed366,
}

impl DayCountBasis {
    /// days in the given calendar year under this basis
    pub fn days_in_year(&self, year: i32) -> u32 {
        match self {
            DayCountBasis::Actual => {
                if is_leap_year(year) {
                    366
                } else {
                    365
                }
            }
            DayCountBasis::Fixed360 => 360,
            DayCountBasis::Fixed365 => 365,
            DayCountBasis::Fixed366 => 366,
        }
    }
}

impl fmt::Display for DayCountBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayCountBasis::Actual => write!(f, "actual"),
            DayCountBasis::Fixed360 => write!(f, "360"),
            DayCountBasis::Fixed365 => write!(f, "365"),
            DayCountBasis::Fixed366 => write!(f, "366"),
        }
    }
}

impl FromStr for DayCountBasis {
    type Err = EngineError;

    /// accepts only the literal configuration values
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "actual" => Ok(DayCountBasis::Actual),
            "360" => Ok(DayCountBasis::Fixed360),
            "365" => Ok(DayCountBasis::Fixed365),
            "366" => Ok(DayCountBasis::Fixed366),
            other => Err(EngineError::UnsupportedDayCountBasis {
                basis: other.to_string(),
            }),
        }
    }
}

/// equivalent daily rate for the year, quantized to ten decimal places
pub fn yearly_to_daily_rate(
    yearly_rate: Rate,
    basis: DayCountBasis,
    year: i32,
    rounding_mode: RoundingMode,
) -> Rate {
    let days = Decimal::from(basis.days_in_year(year));
    round_decimal(yearly_rate / days, DAILY_RATE_PRECISION, rounding_mode)
}

/// check if year is a leap year
fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
