//! Fixed-point supply-delta computation.
//!
//! Rates, index values and the deviation threshold carry `DECIMALS`
//! fractional digits. Every intermediate product is checked so that an
//! overflow surfaces as `Error::ArithmeticOverflow` instead of wrapping.

use crate::Error;

pub const DECIMALS: u32 = 7;
pub const SCALE: u128 = 10_000_000;

/// Market rates above this are treated as this value.
pub const MAX_RATE: u128 = 1_000_000 * SCALE;

/// Largest supply for which `supply * MAX_RATE` fits in an `i128`.
pub const MAX_SUPPLY: i128 = i128::MAX / MAX_RATE as i128;

pub const DEFAULT_DEVIATION_THRESHOLD: u128 = 5 * SCALE / 100;
pub const DEFAULT_REBASE_LAG: u32 = 30;
pub const DEFAULT_MAX_RATE_CHANGE_PCT: u32 = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SupplyDeltaInput {
    pub supply: i128,
    pub rate: u128,
    pub target_rate: u128,
    pub deviation_threshold: u128,
    pub rebase_lag: u32,
    pub max_positive_rate_change_pct: u32,
    pub max_negative_rate_change_pct: u32,
}

/// `index_value * SCALE / base_index_value`.
pub fn target_rate(index_value: u128, base_index_value: u128) -> Result<u128, Error> {
    if base_index_value == 0 {
        return Err(Error::ConfigurationError);
    }
    index_value
        .checked_mul(SCALE)
        .map(|scaled| scaled / base_index_value)
        .ok_or(Error::ArithmeticOverflow)
}

/// True when `rate` lies within `threshold` (relative) of `target`,
/// boundary included.
pub fn within_deviation_threshold(
    rate: u128,
    target: u128,
    threshold: u128,
) -> Result<bool, Error> {
    let absolute = target
        .checked_mul(threshold)
        .ok_or(Error::ArithmeticOverflow)?
        / SCALE;
    Ok(rate.abs_diff(target) <= absolute)
}

pub fn compute_supply_delta(input: &SupplyDeltaInput) -> Result<i128, Error> {
    let supply = input.supply;
    if !(0..=MAX_SUPPLY).contains(&supply) {
        return Err(Error::InvalidSupply);
    }
    if input.rebase_lag == 0 || input.target_rate == 0 {
        return Err(Error::ConfigurationError);
    }

    let rate = input.rate.min(MAX_RATE);
    if within_deviation_threshold(rate, input.target_rate, input.deviation_threshold)? {
        return Ok(0);
    }

    // rate <= MAX_RATE, so only the target can fail the conversion
    let rate = rate as i128;
    let target = i128::try_from(input.target_rate).map_err(|_| Error::ArithmeticOverflow)?;

    let raw = supply
        .checked_mul(rate - target)
        .ok_or(Error::ArithmeticOverflow)?
        / target;
    let damped = raw / i128::from(input.rebase_lag);

    let max_increase = supply
        .checked_mul(i128::from(input.max_positive_rate_change_pct))
        .ok_or(Error::ArithmeticOverflow)?
        / 100;
    let max_decrease = supply
        .checked_mul(i128::from(input.max_negative_rate_change_pct))
        .ok_or(Error::ArithmeticOverflow)?
        / 100;
    let bounded = damped.min(max_increase).max(-max_decrease);

    // supply is within [0, MAX_SUPPLY] so these cannot overflow
    Ok(bounded.min(MAX_SUPPLY - supply).max(-supply))
}
