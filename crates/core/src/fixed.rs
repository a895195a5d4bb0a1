//! Fixed-point arithmetic
//!
//! Exact decimal type for limit prices, cash balances and fill averages.
//! The server sends most money values as strings; `Fixed` parses them
//! without going through floating point.

use rust_decimal::{Decimal, prelude::*};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::iter::Sum;
use std::ops::{Add, Sub, Mul, Div, AddAssign, SubAssign};
use std::str::FromStr;

/// Fixed-point decimal type for money and quantities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Fixed {
    value: Decimal,
}

impl Fixed {
    pub const ZERO: Fixed = Fixed {
        value: Decimal::ZERO,
    };

    pub const ONE: Fixed = Fixed {
        value: Decimal::ONE,
    };

    pub fn from_i64(value: i64) -> Self {
        Fixed {
            value: Decimal::from(value),
        }
    }

    /// Create a Fixed from a float (use with caution)
    pub fn from_f64(value: f64) -> Result<Self, FixedError> {
        let value = Decimal::try_from(value).map_err(|_| FixedError::InvalidValue(value.to_string()))?;
        Ok(Fixed { value })
    }

    /// Parse decimal text, surrounding whitespace allowed.
    pub fn from_str_exact(s: &str) -> Result<Self, FixedError> {
        let value = Decimal::from_str(s.trim()).map_err(|_| FixedError::InvalidValue(s.to_string()))?;
        Ok(Fixed { value })
    }

    /// Parse decimal text, falling back to zero on anything unparsable.
    pub fn parse_or_zero(s: &str) -> Self {
        Self::from_str_exact(s).unwrap_or(Self::ZERO)
    }

    pub fn to_decimal(&self) -> Decimal {
        self.value
    }

    /// Convert to f64 (may lose precision)
    pub fn to_f64(&self) -> f64 {
        self.value.to_f64().unwrap_or(0.0)
    }

    /// Convert to string with specified decimal places
    pub fn to_string_with_scale(&self, scale: u32) -> String {
        format!("{:.1$}", self.value, scale as usize)
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.value.is_sign_negative() && !self.value.is_zero()
    }

    pub fn abs(&self) -> Self {
        Fixed {
            value: self.value.abs(),
        }
    }

    pub fn round_dp(&self, dp: u32) -> Self {
        Fixed {
            value: self.value.round_dp(dp),
        }
    }

    pub fn checked_add(&self, rhs: Fixed) -> Result<Fixed, FixedError> {
        self.value
            .checked_add(rhs.value)
            .map(|value| Fixed { value })
            .ok_or(FixedError::Overflow)
    }

    pub fn checked_mul(&self, rhs: Fixed) -> Result<Fixed, FixedError> {
        self.value
            .checked_mul(rhs.value)
            .map(|value| Fixed { value })
            .ok_or(FixedError::Overflow)
    }

    pub fn checked_div(&self, rhs: Fixed) -> Result<Fixed, FixedError> {
        if rhs.is_zero() {
            return Err(FixedError::DivisionByZero);
        }
        self.value
            .checked_div(rhs.value)
            .map(|value| Fixed { value })
            .ok_or(FixedError::Overflow)
    }
}

/// Fixed-point arithmetic errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FixedError {
    #[error("Invalid decimal value: {0:?}")]
    InvalidValue(String),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Decimal overflow")]
    Overflow,
}

impl Add for Fixed {
    type Output = Fixed;

    fn add(self, rhs: Self) -> Self::Output {
        Fixed {
            value: self.value + rhs.value,
        }
    }
}

impl Sub for Fixed {
    type Output = Fixed;

    fn sub(self, rhs: Self) -> Self::Output {
        Fixed {
            value: self.value - rhs.value,
        }
    }
}

impl Mul for Fixed {
    type Output = Fixed;

    fn mul(self, rhs: Self) -> Self::Output {
        Fixed {
            value: self.value * rhs.value,
        }
    }
}

impl Div for Fixed {
    type Output = Fixed;

    fn div(self, rhs: Self) -> Self::Output {
        Fixed {
            value: self.value / rhs.value,
        }
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Self) {
        self.value += rhs.value;
    }
}

impl SubAssign for Fixed {
    fn sub_assign(&mut self, rhs: Self) {
        self.value -= rhs.value;
    }
}

impl Sum for Fixed {
    fn sum<I: Iterator<Item = Fixed>>(iter: I) -> Self {
        iter.fold(Fixed::ZERO, |acc, x| acc + x)
    }
}

impl Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for Fixed {
    type Err = FixedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_exact(s)
    }
}

impl From<Decimal> for Fixed {
    fn from(value: Decimal) -> Self {
        Fixed { value }
    }
}

impl From<Fixed> for Decimal {
    fn from(fixed: Fixed) -> Self {
        fixed.value
    }
}

impl From<i64> for Fixed {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

/// Convenience macro for creating Fixed values from literals
#[macro_export]
macro_rules! fixed {
    ($value:expr) => {
        $crate::fixed::Fixed::from_str_exact(stringify!($value)).unwrap()
    };
}
