//! Fixed-point monetary amounts: non-negative, two fractional digits, at most ten integer digits.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Digits allowed before the decimal point (NUMERIC(12,2)).
pub const MAX_INTEGER_DIGITS: u32 = 10;
pub const DECIMAL_PLACES: u32 = 2;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoneyError {
    #[error("A valid number is required.")]
    Invalid,
    #[error("Ensure that there are no more than 2 decimal places.")]
    TooManyDecimalPlaces,
    #[error("Ensure that there are no more than 10 digits before the decimal point.")]
    TooManyIntegerDigits,
    #[error("value cannot be negative")]
    Negative,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Precision is checked before sign so an over-precise negative reports the precision problem.
    pub fn new(value: Decimal) -> Result<Self, MoneyError> {
        let normalized = value.normalize();
        if normalized.scale() > DECIMAL_PLACES {
            return Err(MoneyError::TooManyDecimalPlaces);
        }
        if normalized.abs().trunc() >= integer_limit() {
            return Err(MoneyError::TooManyIntegerDigits);
        }
        if normalized.is_zero() {
            return Ok(Self::ZERO.rescaled());
        }
        if normalized.is_sign_negative() {
            return Err(MoneyError::Negative);
        }
        Ok(Money(normalized).rescaled())
    }

    /// Parses plain (`"12.50"`) or scientific (`"1.25e1"`) notation without rounding.
    pub fn parse(input: &str) -> Result<Self, MoneyError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(MoneyError::Invalid);
        }
        let value = match trimmed.split_once(['e', 'E']) {
            None => exact(trimmed)?,
            Some((mantissa, exponent)) => {
                let exponent: i32 = exponent.parse().map_err(|_| MoneyError::Invalid)?;
                shift(exact(mantissa)?, exponent)?
            }
        };
        Self::new(value)
    }

    pub fn from_cents(cents: i64) -> Result<Self, MoneyError> {
        Self::new(Decimal::new(cents, DECIMAL_PLACES))
    }

    pub const fn get(self) -> Decimal {
        self.0
    }

    fn rescaled(mut self) -> Self {
        self.0.rescale(DECIMAL_PLACES);
        self
    }
}

/// Digits past what `Decimal` can hold are an error, never rounded away.
fn exact(plain: &str) -> Result<Decimal, MoneyError> {
    // Trailing fractional zeros carry no value but still count against Decimal's precision.
    let plain = match plain.split_once('.') {
        Some((whole, fraction)) => match fraction.trim_end_matches('0') {
            "" if whole.is_empty() || whole == "-" || whole == "+" => format!("{}0", whole),
            "" => whole.to_string(),
            fraction => format!("{}.{}", whole, fraction),
        },
        None => plain.to_string(),
    };
    Decimal::from_str_exact(&plain).map_err(|e| match e {
        rust_decimal::Error::Underflow => MoneyError::TooManyDecimalPlaces,
        rust_decimal::Error::ExceedsMaximumPossibleValue
        | rust_decimal::Error::LessThanMinimumPossibleValue => MoneyError::TooManyIntegerDigits,
        _ => MoneyError::Invalid,
    })
}

/// `mantissa * 10^exponent`, exactly.
fn shift(mantissa: Decimal, exponent: i32) -> Result<Decimal, MoneyError> {
    if mantissa.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let mantissa = mantissa.normalize();
    let scale = i64::from(mantissa.scale()) - i64::from(exponent);
    if scale > i64::from(Decimal::MAX_SCALE) {
        return Err(MoneyError::TooManyDecimalPlaces);
    }
    let mut shifted = mantissa;
    if scale >= 0 {
        shifted
            .set_scale(scale as u32)
            .map_err(|_| MoneyError::TooManyDecimalPlaces)?;
        return Ok(shifted);
    }
    let zeros = scale.unsigned_abs();
    if zeros > u64::from(Decimal::MAX_SCALE) {
        return Err(MoneyError::TooManyIntegerDigits);
    }
    shifted
        .set_scale(0)
        .map_err(|_| MoneyError::TooManyIntegerDigits)?;
    let factor = Decimal::from_i128_with_scale(10i128.pow(zeros as u32), 0);
    shifted
        .checked_mul(factor)
        .ok_or(MoneyError::TooManyIntegerDigits)
}

fn integer_limit() -> Decimal {
    Decimal::from(10u64.pow(MAX_INTEGER_DIGITS))
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO.rescaled()
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

/// Serialized as a decimal string to keep exact cents.
impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}
