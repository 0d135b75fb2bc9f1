use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::decimal::{format_fixed, round_decimal};
use crate::errors::{EngineError, Result};
use crate::requests::AccrualRequest;

use super::day_count::yearly_to_daily_rate;
use super::TierAccrual;

/// calculate per-tier accrual amounts for one request
///
/// tiers are processed in insertion order; tiers contributing nothing are
/// omitted from the result. `number_of_days` scales the rounded daily
/// amount for catch-up accrual
pub fn calculate_accruals(
    request: &AccrualRequest,
    effective_date: NaiveDate,
    number_of_days: u32,
) -> Result<Vec<TierAccrual>> {
    let mut accruals = Vec::new();
    if request.balance.is_zero() {
        return Ok(accruals);
    }

    let year = effective_date.year();
    let days = Decimal::from(number_of_days);

    for (name, tier) in &request.tiers {
        let mut balance = request.balance;
        let mut min = tier.min.unwrap_or(Decimal::ZERO);
        let mut max = tier.max.unwrap_or(balance);
        let mut flipped = false;

        if min.is_sign_negative() || max.is_sign_negative() {
            // negative tier: bounds are quoted from zero downwards, so
            // mirror bounds and balance into positive space and restore
            // the sign afterwards
            min = tier.min.unwrap_or(balance);
            max = tier.max.unwrap_or(Decimal::ZERO);
            if (min < Decimal::ZERO && max > Decimal::ZERO)
                || (min > Decimal::ZERO && max < Decimal::ZERO)
            {
                return Err(EngineError::MixedSignTierBounds {
                    tier: name.clone(),
                    min,
                    max,
                });
            }
            min = -min;
            max = -max;
            if min > max {
                std::mem::swap(&mut min, &mut max);
            }
            balance = -balance;
            flipped = true;
        }

        let base = if max < min {
            Decimal::ZERO
        } else {
            balance.min(max) - balance.min(min)
        };

        let daily_rate = yearly_to_daily_rate(
            tier.rate,
            request.day_count_basis,
            year,
            request.rounding_mode,
        );

        let mut amount =
            round_decimal(base * daily_rate, request.precision, request.rounding_mode);
        if flipped {
            amount = -amount;
        }
        amount *= days;
        if amount.is_zero() {
            continue;
        }

        let accrued_on = if flipped { -base } else { base };
        accruals.push(TierAccrual {
            name: name.clone(),
            amount,
            description: format!(
                "Daily interest accrued at {}% on balance of {}.",
                format_fixed(daily_rate * dec!(100), 5),
                format_fixed(accrued_on, 2),
            ),
        });
    }

    Ok(accruals)
}
