//! # Money Module
//!
//! Provides the `Money` type for computed earnings.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Wash amounts arrive as JSON numbers (floats). Summing per-wash         │
//! │  earnings as floats drifts:                                             │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  OUR SOLUTION: convert each share ONCE, truncating to whole cents,     │
//! │  then add cents. A salary total is exactly the sum of its rows.        │
//! │                                                                         │
//! │    share 33.339  ──truncate──►  3333 cents                              │
//! │    share -12.00  ──floor 0──►      0 cents                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use washdesk_core::money::Money;
//!
//! let a = Money::from_cents(22500);
//! let b = Money::truncate_from_major(80.009);
//! assert_eq!((a + b).cents(), 30500);
//! assert_eq!((a + b).to_string(), "305.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents (the smallest currency unit).
///
/// Serializes as a bare integer number of cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use washdesk_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a major-unit float to cents, truncating toward zero.
    ///
    /// This is "×100, drop the fraction" and never rounds half-up:
    /// `225.999` becomes `225.99`.
    ///
    /// ## Example
    /// ```rust
    /// use washdesk_core::money::Money;
    ///
    /// assert_eq!(Money::truncate_from_major(225.999).cents(), 22599);
    /// assert_eq!(Money::truncate_from_major(-1.555).cents(), -155);
    /// ```
    pub fn truncate_from_major(major: f64) -> Self {
        if !major.is_finite() {
            return Money::zero();
        }
        Money((major * 100.0).trunc() as i64)
    }

    /// Converts a major-unit float to the nearest cent.
    ///
    /// For stored amounts (balances, payments) whose binary form is only
    /// close to the decimal the user typed: `0.1 + 0.2` lands on `0.30`.
    ///
    /// ## Example
    /// ```rust
    /// use washdesk_core::money::Money;
    ///
    /// assert_eq!(Money::round_from_major(0.1 + 0.2).cents(), 30);
    /// assert_eq!(Money::round_from_major(-942.8).cents(), -94280);
    /// ```
    pub fn round_from_major(major: f64) -> Self {
        if !major.is_finite() {
            return Money::zero();
        }
        Money((major * 100.0).round() as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value in major units (for display and float arithmetic).
    #[inline]
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering, no currency symbol: `1234.56`, `-5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Serde Helper
// =============================================================================

/// Serializes `Money` as a major-unit JSON number (`225.5`) instead of cents.
///
/// Used on report fields the frontend already reads as plain amounts:
/// `#[serde(with = "washdesk_core::money::as_major")]`.
pub mod as_major {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.to_major())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let major = f64::deserialize(deserializer)?;
        Ok(Money::round_from_major(major))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
