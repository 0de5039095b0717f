//! Fixed-point monetary amounts.
//!
//! Amounts are stored in integer minor units (cents). Balance checks across
//! the workspace rely on exact integer equality; floating point is never used
//! for money.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// A monetary amount in minor units (e.g. cents).
///
/// Arithmetic is checked: totals that would overflow `i64` are reported to the
/// caller instead of wrapping.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Build from whole currency units. `None` on overflow.
    pub const fn from_major(major: i64) -> Option<Self> {
        match major.checked_mul(100) {
            Some(minor) => Some(Self(minor)),
            None => None,
        }
    }

    pub const fn minor(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub const fn checked_add(self, rhs: Money) -> Option<Money> {
        match self.0.checked_add(rhs.0) {
            Some(minor) => Some(Money(minor)),
            None => None,
        }
    }

    pub const fn checked_sub(self, rhs: Money) -> Option<Money> {
        match self.0.checked_sub(rhs.0) {
            Some(minor) => Some(Money(minor)),
            None => None,
        }
    }

    /// Saturating sum, for advisory totals (form feedback). Authoritative
    /// balance checks use the checked variants.
    pub const fn saturating_add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }

    /// Multiply by a unitless quantity (e.g. stock count).
    pub const fn checked_mul(self, qty: i64) -> Option<Money> {
        match self.0.checked_mul(qty) {
            Some(minor) => Some(Money(minor)),
            None => None,
        }
    }
}

impl ValueObject for Money {}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Widen before abs so i64::MIN cannot panic.
        let minor = self.0 as i128;
        let sign = if minor < 0 { "-" } else { "" };
        let abs = minor.abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    /// Parse a decimal amount with at most two fractional digits
    /// (`"1250"`, `"99.99"`, `"-0.5"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (major_part, minor_part) = match unsigned.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (unsigned, ""),
        };

        if major_part.is_empty() && minor_part.is_empty() {
            return Err(DomainError::validation(format!("not a money amount: {s:?}")));
        }
        let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
        if !all_digits(major_part) || !all_digits(minor_part) {
            return Err(DomainError::validation(format!("not a money amount: {s:?}")));
        }
        if minor_part.len() > 2 {
            return Err(DomainError::validation(format!(
                "at most two decimal places: {s:?}"
            )));
        }

        let major: i64 = if major_part.is_empty() {
            0
        } else {
            major_part
                .parse()
                .map_err(|_| DomainError::validation(format!("amount out of range: {s:?}")))?
        };
        let scale = if minor_part.len() == 1 { 10 } else { 1 };
        let minor: i64 = if minor_part.is_empty() {
            0
        } else {
            minor_part
                .parse::<i64>()
                .map_err(|_| DomainError::validation(format!("not a money amount: {s:?}")))?
                * scale
        };

        let magnitude = major
            .checked_mul(100)
            .and_then(|m| m.checked_add(minor))
            .ok_or_else(|| DomainError::validation(format!("amount out of range: {s:?}")))?;

        Ok(Money(if negative { -magnitude } else { magnitude }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_major_and_minor_units() {
        assert_eq!(Money::from_minor(5_000_000).to_string(), "50000.00");
        assert_eq!(Money::from_minor(1).to_string(), "0.01");
        assert_eq!(Money::from_minor(-1250).to_string(), "-12.50");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn parses_decimal_amounts() {
        assert_eq!("50000".parse::<Money>().unwrap(), Money::from_minor(5_000_000));
        assert_eq!("99.99".parse::<Money>().unwrap(), Money::from_minor(9999));
        assert_eq!("0.5".parse::<Money>().unwrap(), Money::from_minor(50));
        assert_eq!("-12.50".parse::<Money>().unwrap(), Money::from_minor(-1250));
        assert_eq!(".25".parse::<Money>().unwrap(), Money::from_minor(25));
    }

    #[test]
    fn rejects_malformed_amounts() {
        for bad in ["", "abc", "1.234", "1,5", "--4", "1.2.3"] {
            assert!(bad.parse::<Money>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn checked_arithmetic_rejects_overflow() {
        let max = Money::from_minor(i64::MAX);
        assert_eq!(max.checked_add(Money::from_minor(1)), None);
        assert_eq!(max.checked_mul(2), None);
        assert_eq!(Money::from_major(i64::MAX), None);
    }

    #[test]
    fn many_small_amounts_sum_exactly() {
        // 10_000 one-cent postings must total exactly 100.00, the classic
        // floating-point drift case this representation exists to avoid.
        let cent = Money::from_minor(1);
        let total = (0..10_000).try_fold(Money::ZERO, |acc, _| acc.checked_add(cent));
        assert_eq!(total, Some(Money::from_minor(10_000)));
        assert_eq!(total.unwrap(), Money::from_major(100).unwrap());
    }
}
