//! # Validated Inputs
//!
//! Range-checked wrappers for the values the formulas take. The formulas
//! themselves stay total; these types are for callers that want invalid
//! input rejected at the boundary instead of silently extrapolated.

use std::fmt;

use crate::error::{EconomyError, EconomyResult};
use crate::item_power::Quality;

pub(crate) fn reject(parameter: &'static str, reason: String) -> EconomyError {
    tracing::debug!(parameter, %reason, "rejected input");
    EconomyError::invalid_input(parameter, reason)
}

/// Item or resource tier (1-8).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tier(u8);

impl Tier {
    /// Lowest tier.
    pub const MIN: u8 = 1;
    /// Highest tier.
    pub const MAX: u8 = 8;
    /// Lowest tier with an item-power estimate.
    pub const ITEM_POWER_MIN: u8 = 4;

    /// Validates a raw tier.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::InvalidInput`] outside 1-8.
    pub fn new(value: i32) -> EconomyResult<Self> {
        match u8::try_from(value) {
            Ok(tier) if (Self::MIN..=Self::MAX).contains(&tier) => Ok(Self(tier)),
            _ => Err(reject(
                "tier",
                format!("must be between {} and {}, got {value}", Self::MIN, Self::MAX),
            )),
        }
    }

    /// Raw tier.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i32> for Tier {
    type Error = EconomyError;

    fn try_from(value: i32) -> EconomyResult<Self> {
        Self::new(value)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Enchantment level (0-4).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Enchantment(u8);

impl Enchantment {
    /// Highest enchantment.
    pub const MAX: u8 = 4;

    /// Validates a raw enchantment level.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::InvalidInput`] outside 0-4.
    pub fn new(value: i32) -> EconomyResult<Self> {
        match u8::try_from(value) {
            Ok(level) if level <= Self::MAX => Ok(Self(level)),
            _ => Err(reject(
                "enchantment",
                format!("must be between 0 and {}, got {value}", Self::MAX),
            )),
        }
    }

    /// Raw enchantment level.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i32> for Enchantment {
    type Error = EconomyError;

    fn try_from(value: i32) -> EconomyResult<Self> {
        Self::new(value)
    }
}

impl TryFrom<i32> for Quality {
    type Error = EconomyError;

    fn try_from(code: i32) -> EconomyResult<Self> {
        Self::from_code(code)
            .ok_or_else(|| reject("quality", format!("must be between 1 and 5, got {code}")))
    }
}

/// A finite percentage in `[0, 100]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Percentage {
    /// Validates a raw percentage.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::InvalidInput`] for NaN, infinities and values
    /// outside `[0, 100]`.
    pub fn new(value: f64) -> EconomyResult<Self> {
        if value.is_finite() && (0.0..=100.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(reject(
                "percentage",
                format!("must be within 0-100, got {value}"),
            ))
        }
    }

    /// Raw percentage.
    #[inline]
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// As a fraction in `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }
}

/// Rejects negative silver amounts and quantities.
pub(crate) fn non_negative(parameter: &'static str, value: i64) -> EconomyResult<i64> {
    if value >= 0 {
        Ok(value)
    } else {
        Err(reject(parameter, format!("must not be negative, got {value}")))
    }
}
