//! Arbitrary-precision economic amounts and their canonical encodings.
//!
//! Token quantities on chain routinely exceed 64 bits, so amounts are backed
//! by a big integer and cross every boundary as base-10 strings: a nullable
//! text column in storage, a JSON string (never a bare number), and a GraphQL
//! string scalar. An absent amount is `Option::None` at each boundary; the
//! `Amount` type itself always holds a value.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use num_bigint::BigInt;
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error as ThisError;

/// Upper bound on the power-of-ten shift accepted when normalizing
/// scientific notation (Postgres numeric tops out at 131072 integer digits).
const MAX_DECIMAL_SHIFT: i64 = 131_072;

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum AmountError {
    #[error("invalid amount encoding: {text:?}")]
    InvalidEncoding { text: String },
}

/// An exact, arbitrarily large signed token amount.
///
/// The canonical encoding is the unique base-10 string of the value: no
/// leading zeros, no plus sign, a minus sign only when negative, no exponent.
/// `Display` produces it and [`FromStr`] accepts it (redundant sign or zero
/// padding is tolerated on input and re-encodes canonically).
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(BigInt);

impl Amount {
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Decodes a nullable storage column.
    ///
    /// A missing or empty value is absent, not an error. Some drivers render
    /// large numeric columns in scientific notation, so text containing a
    /// decimal point, exponent marker, or explicit plus sign takes an exact
    /// decimal parse that truncates any fraction toward zero. Everything else
    /// must be a plain base-10 integer.
    pub fn from_sql_text(text: Option<&str>) -> Result<Option<Self>, AmountError> {
        let Some(text) = text else {
            return Ok(None);
        };
        if text.is_empty() {
            return Ok(None);
        }
        let magnitude = if text.contains(&['.', '+', 'e', 'E'][..]) {
            parse_scaled_decimal(text)?
        } else {
            BigInt::from_str(text).map_err(|_| AmountError::InvalidEncoding {
                text: text.to_string(),
            })?
        };
        Ok(Some(Self(magnitude)))
    }

    /// Encodes for a nullable storage column; absent writes an empty string,
    /// which the storage layer persists as NULL.
    pub fn to_sql_text(amount: Option<&Self>) -> String {
        match amount {
            Some(amount) => amount.to_string(),
            None => String::new(),
        }
    }
}

/// Exact decimal/scientific-notation parse, truncating toward zero.
///
/// The mantissa digits and the exponent are combined by shifting the digit
/// string, never by going through a binary float, so integer parts beyond
/// 2^53 keep every digit.
fn parse_scaled_decimal(text: &str) -> Result<BigInt, AmountError> {
    let invalid = || AmountError::InvalidEncoding {
        text: text.to_string(),
    };

    let mut rest = text;
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    let (mantissa, exponent) = match rest.find(&['e', 'E'][..]) {
        Some(split) => {
            let exponent: i64 = rest[split + 1..].parse().map_err(|_| invalid())?;
            (&rest[..split], exponent)
        }
        None => (rest, 0),
    };
    let (int_part, frac_part) = match mantissa.find('.') {
        Some(split) => (&mantissa[..split], &mantissa[split + 1..]),
        None => (mantissa, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let mut digits = String::with_capacity(int_part.len() + frac_part.len());
    digits.push_str(int_part);
    digits.push_str(frac_part);

    // Each fractional digit already shifts the digit string one place left.
    // An exponent so negative the subtraction overflows truncates every digit
    // away, same as any other shift past the end of the digit string.
    let magnitude = match exponent.checked_sub(frac_part.len() as i64) {
        None => BigInt::zero(),
        Some(shift) if shift >= 0 => {
            if shift > MAX_DECIMAL_SHIFT {
                return Err(invalid());
            }
            for _ in 0..shift {
                digits.push('0');
            }
            BigInt::from_str(&digits).map_err(|_| invalid())?
        }
        Some(shift) => {
            // Dropping low-order digits of the magnitude truncates toward
            // zero; the sign is applied afterwards.
            let drop = shift.unsigned_abs() as usize;
            if drop >= digits.len() {
                BigInt::zero()
            } else {
                BigInt::from_str(&digits[..digits.len() - drop]).map_err(|_| invalid())?
            }
        }
    };

    Ok(if negative { -magnitude } else { magnitude })
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        BigInt::from_str(text)
            .map(Self)
            .map_err(|_| AmountError::InvalidEncoding {
                text: text.to_string(),
            })
    }
}

impl From<BigInt> for Amount {
    fn from(value: BigInt) -> Self {
        Self(value)
    }
}

impl From<Amount> for BigInt {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Self(BigInt::from(value))
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(BigInt::from(value))
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Self(BigInt::from(value))
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(BigInt::from(value))
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Add<&Amount> for Amount {
    type Output = Self;

    fn add(self, rhs: &Amount) -> Self {
        Self(self.0 + &rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl AddAssign<&Amount> for Amount {
    fn add_assign(&mut self, rhs: &Amount) {
        self.0 += &rhs.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

// JSON carries amounts as strings so generic numeric handling can never
// round them; `Option<Amount>` maps absent onto an explicit `null`.

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// GraphQL transports amounts as string scalars; a non-string literal is
/// always rejected rather than ignored.
#[Scalar(name = "BigInt")]
impl ScalarType for Amount {
    fn parse(value: Value) -> InputValueResult<Self> {
        if let Value::String(text) = &value {
            Ok(text.parse()?)
        } else {
            Err(InputValueError::expected_type(value))
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.to_string())
    }
}
