//! Money type for representing monetary values.
//!
//! Amounts are INR stored as integer paise to keep cart arithmetic exact.
//! The backend serializes prices as decimal JSON, sometimes as a number
//! (`199.5`) and sometimes as a decimal string (`"199.50"`), so the wire
//! representation here accepts both and always emits a number.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CommerceError;

/// A monetary value in integer paise (1/100 INR).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "MoneyWire", into = "f64")]
pub struct Money {
    paise: i64,
}

/// What the backend actually puts on the wire for a money field.
#[derive(Deserialize)]
#[serde(untagged)]
enum MoneyWire {
    Number(f64),
    Text(String),
}

impl TryFrom<MoneyWire> for Money {
    type Error = CommerceError;

    fn try_from(wire: MoneyWire) -> Result<Self, Self::Error> {
        match wire {
            MoneyWire::Number(n) => Ok(Money::from_decimal(n)),
            MoneyWire::Text(s) => Money::parse(&s),
        }
    }
}

impl From<Money> for f64 {
    fn from(m: Money) -> f64 {
        m.to_decimal()
    }
}

impl Money {
    /// Create a Money value from paise.
    pub fn from_paise(paise: i64) -> Self {
        Self { paise }
    }

    /// Create a Money value from a decimal amount, rounding to the nearest paisa.
    pub fn from_decimal(amount: f64) -> Self {
        Self {
            paise: (amount * 100.0).round() as i64,
        }
    }

    /// Parse a decimal string (e.g., "199.50") without going through floats.
    ///
    /// A third fractional digit rounds half-up; anything past it is ignored.
    pub fn parse(s: &str) -> Result<Self, CommerceError> {
        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(r) => (true, r),
            None => (false, trimmed),
        };

        let (int_part, frac_part) = match rest.split_once('.') {
            Some((i, f)) => (i, f),
            None => (rest, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(CommerceError::InvalidAmount(s.to_string()));
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(CommerceError::InvalidAmount(s.to_string()));
        }

        let whole: i64 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| CommerceError::InvalidAmount(s.to_string()))?
        };

        let digit = |i: usize| {
            frac_part
                .as_bytes()
                .get(i)
                .map(|b| (b - b'0') as i64)
                .unwrap_or(0)
        };
        let mut frac = digit(0) * 10 + digit(1);
        if digit(2) >= 5 {
            frac += 1;
        }

        let mut paise = whole
            .checked_mul(100)
            .and_then(|v| v.checked_add(frac))
            .ok_or(CommerceError::Overflow)?;
        if negative {
            paise = -paise;
        }
        Ok(Self { paise })
    }

    /// Create a zero amount.
    pub fn zero() -> Self {
        Self { paise: 0 }
    }

    /// Get the amount in paise.
    pub fn paise(&self) -> i64 {
        self.paise
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.paise == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.paise as f64 / 100.0
    }

    /// Try to add another Money value, returning None on overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        self.paise.checked_add(other.paise).map(Money::from_paise)
    }

    /// Try to subtract another Money value, returning None on overflow.
    pub fn try_sub(&self, other: &Money) -> Option<Money> {
        self.paise.checked_sub(other.paise).map(Money::from_paise)
    }

    /// Try to multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, quantity: u32) -> Option<Money> {
        self.paise
            .checked_mul(i64::from(quantity))
            .map(Money::from_paise)
    }

    /// Calculate a percentage of this amount, rounded to the nearest paisa.
    pub fn percentage(&self, percent: f64) -> Money {
        Money::from_paise((self.paise as f64 * percent / 100.0).round() as i64)
    }

    /// Sum an iterator of Money values, returning None on overflow.
    pub fn try_sum<'a>(iter: impl Iterator<Item = &'a Money>) -> Option<Money> {
        iter.fold(Some(Money::zero()), |acc, m| acc?.try_add(m))
    }

    /// Format as a display string with the rupee symbol and en-IN digit
    /// grouping (e.g., "₹12,34,567.89").
    pub fn display(&self) -> String {
        let sign = if self.paise < 0 { "-" } else { "" };
        let abs = self.paise.unsigned_abs();
        format!(
            "{}\u{20b9}{}.{:02}",
            sign,
            group_indian(abs / 100),
            abs % 100
        )
    }

    /// Format as a plain decimal string without the symbol (e.g., "1234.50").
    pub fn display_amount(&self) -> String {
        let sign = if self.paise < 0 { "-" } else { "" };
        let abs = self.paise.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Group digits the en-IN way: last three, then pairs.
fn group_indian(value: u64) -> String {
    let s = value.to_string();
    if s.len() <= 3 {
        return s;
    }

    let (head, tail) = s.split_at(s.len() - 3);
    let mut pairs = Vec::new();
    let mut end = head.len();
    while end > 2 {
        pairs.push(&head[end - 2..end]);
        end -= 2;
    }
    pairs.push(&head[..end]);
    pairs.reverse();
    format!("{},{}", pairs.join(","), tail)
}
