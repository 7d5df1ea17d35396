use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode, Zero};

use super::errors::DomainError;

/// Digits before the point in a `NUMERIC(10, 2)` money column.
pub const AMOUNT_INTEGER_DIGITS: i64 = 8;

/// Longest digit string looked at before normalizing.
const MAX_RAW_DIGITS: u64 = 32;

/// True when `amount` is storable in a `NUMERIC(p, 2)` column with
/// `integer_digits` digits before the point, i.e. at most two decimal places
/// once trailing zeros are dropped.
///
/// Only digit counts and exponents are inspected, so values such as `1e2000000`
/// are rejected without being expanded.
pub fn fits_numeric(amount: &BigDecimal, integer_digits: i64) -> bool {
    if amount.digits() > MAX_RAW_DIGITS {
        return false;
    }
    let normalized = amount.normalized();
    let (_, scale) = normalized.as_bigint_and_exponent();
    scale <= 2 && normalized.digits() as i64 - scale <= integer_digits
}

/// Parse a required, non-negative money amount below 10^8 with at most two
/// decimal places. Any failure is reported against `field`.
pub fn parse_amount(field: &str, raw: Option<&str>) -> Result<BigDecimal, DomainError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DomainError::validation(field))?;
    let amount = BigDecimal::from_str(raw).map_err(|_| DomainError::validation(field))?;
    if !fits_numeric(&amount, AMOUNT_INTEGER_DIGITS) || amount < BigDecimal::zero() {
        return Err(DomainError::validation(field));
    }
    Ok(amount)
}

/// Round to the minor currency unit. Only for rendering; never feed the
/// result back into a calculation.
pub fn to_cents(amount: &BigDecimal) -> BigDecimal {
    amount.with_scale_round(2, RoundingMode::HalfUp)
}
