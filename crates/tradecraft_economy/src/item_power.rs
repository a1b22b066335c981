//! # Item Power
//!
//! Linear item-power estimate:
//!
//! ```text
//! IP = base_ip + (tier - 4) * 100 + enchantment * 100 + quality_bonus + mastery_bonus
//! ```
//!
//! No clamping: tiers or enchantments outside the game's range extrapolate.

use crate::constants::{BASE_IP_TIER, IP_PER_ENCHANTMENT, IP_PER_TIER};

/// Item quality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Quality {
    /// Quality 1.
    #[default]
    Normal = 1,
    /// Quality 2.
    Good = 2,
    /// Quality 3.
    Outstanding = 3,
    /// Quality 4.
    Excellent = 4,
    /// Quality 5.
    Masterpiece = 5,
}

impl Quality {
    /// Every quality, lowest first.
    pub const ALL: [Self; 5] = [
        Self::Normal,
        Self::Good,
        Self::Outstanding,
        Self::Excellent,
        Self::Masterpiece,
    ];

    /// Item power added by this quality.
    #[inline]
    #[must_use]
    pub const fn bonus(self) -> f64 {
        match self {
            Self::Normal => 0.0,
            Self::Good => 10.0,
            Self::Outstanding => 20.0,
            Self::Excellent => 50.0,
            Self::Masterpiece => 100.0,
        }
    }

    /// Converts a raw quality code. Codes outside 1-5 have no quality.
    #[inline]
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Normal),
            2 => Some(Self::Good),
            3 => Some(Self::Outstanding),
            4 => Some(Self::Excellent),
            5 => Some(Self::Masterpiece),
            _ => None,
        }
    }

    /// Raw quality code (1-5).
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Quality bonus for a raw code; unknown codes give no bonus.
#[inline]
#[must_use]
pub const fn quality_bonus(code: i32) -> f64 {
    match Quality::from_code(code) {
        Some(quality) => quality.bonus(),
        None => 0.0,
    }
}

/// Estimated item power.
///
/// `base_ip` is quoted at tier 4; `mastery_bonus` is usually 0.
///
/// # Example
///
/// ```rust
/// use tradecraft_economy::calculate_item_power;
///
/// let ip = calculate_item_power(700, 8, 4, 5, 50.0);
/// assert!((ip - 1650.0).abs() < 1e-9);
/// ```
#[inline]
#[must_use]
pub fn calculate_item_power(base_ip: i64, tier: i32, enchantment: i32, quality: i32, mastery_bonus: f64) -> f64 {
    let tier_bonus = (f64::from(tier) - f64::from(BASE_IP_TIER)) * IP_PER_TIER;
    let enchant_bonus = f64::from(enchantment) * IP_PER_ENCHANTMENT;
    base_ip as f64 + tier_bonus + enchant_bonus + quality_bonus(quality) + mastery_bonus
}
