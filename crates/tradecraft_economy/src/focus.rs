//! # Focus
//!
//! Focus is the resource spent to boost a craft's return rate. Its cost
//! decays exponentially with specialization efficiency:
//!
//! ```text
//! cost = base * 0.5 ^ (efficiency / 10000)
//! ```
//!
//! ## Rounding
//!
//! Costs round to the nearest integer with ties going to the even neighbour
//! (`2.5 → 2`, `3.5 → 4`). Every focus figure in this crate uses that rule.

use serde::{Deserialize, Serialize};

use crate::constants::{FOCUS_HALVING_POINTS, MAX_FOCUS_EFFICIENCY};

/// Exponential focus-cost model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FocusModel {
    /// Efficiency points that halve the cost.
    pub halving_points: f64,
}

impl FocusModel {
    /// The model baked into [`crate::constants`].
    pub const STANDARD: Self = Self {
        halving_points: FOCUS_HALVING_POINTS,
    };

    /// Fraction of the base cost still paid at `efficiency`.
    #[inline]
    #[must_use]
    pub fn multiplier(&self, efficiency: u32) -> f64 {
        0.5_f64.powf(f64::from(efficiency) / self.halving_points)
    }

    /// Unrounded focus cost of a (possibly fractional) base cost.
    #[inline]
    #[must_use]
    pub fn reduce(&self, base: f64, efficiency: u32) -> f64 {
        base * self.multiplier(efficiency)
    }

    /// Focus cost rounded half-to-even, never above `base_focus_cost`.
    #[inline]
    #[must_use]
    pub fn cost(&self, base_focus_cost: u64, efficiency: u32) -> u64 {
        round_focus(self.reduce(base_focus_cost as f64, efficiency)).min(base_focus_cost)
    }

    /// Focus cost rounded down, as the planners charge it.
    #[inline]
    #[must_use]
    pub fn floor_cost(&self, base_focus_cost: u64, efficiency: u32) -> u64 {
        floor_focus(self.reduce(base_focus_cost as f64, efficiency)).min(base_focus_cost)
    }

    /// Percentage of the base cost saved at `efficiency`.
    #[inline]
    #[must_use]
    pub fn saving_percent(&self, efficiency: u32) -> f64 {
        (1.0 - self.multiplier(efficiency)) * 100.0
    }
}

impl Default for FocusModel {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[inline]
pub(crate) fn round_focus(cost: f64) -> u64 {
    // Negative and NaN saturate to 0.
    cost.round_ties_even() as u64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[inline]
pub(crate) fn floor_focus(cost: f64) -> u64 {
    cost.floor() as u64
}

/// Actual focus cost after specialization, at the standard halving rate.
///
/// Every 10 000 efficiency points halve the cost; the result is rounded
/// half-to-even.
///
/// # Example
///
/// ```rust
/// use tradecraft_economy::calculate_focus_cost;
///
/// assert_eq!(calculate_focus_cost(1000, 10_000), 500);
/// assert_eq!(calculate_focus_cost(1000, 0), 1000);
/// ```
#[inline]
#[must_use]
pub fn calculate_focus_cost(base_focus_cost: u64, efficiency_rating: u32) -> u64 {
    FocusModel::STANDARD.cost(base_focus_cost, efficiency_rating)
}

/// Item family a specialization tree belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SpecializationKind {
    /// Weapons and armor pieces.
    #[default]
    ArmorWeapon,
    /// Shields, torches, tomes.
    Offhand,
    /// Gathering tools.
    Tool,
    /// Capes.
    Cape,
    /// Bags.
    Bag,
    /// Refining trees.
    Refining,
}

/// Efficiency points granted per level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpecializationCoefficients {
    /// Per mastery level.
    pub mastery: u32,
    /// Per level of the item's own specialization.
    pub unique: u32,
    /// Per level of every other specialization in the same tree.
    pub mutual: u32,
}

impl SpecializationKind {
    /// Efficiency coefficients for this tree.
    #[must_use]
    pub const fn coefficients(self) -> SpecializationCoefficients {
        let (mastery, unique, mutual) = match self {
            Self::ArmorWeapon | Self::Offhand => (30, 250, 15),
            Self::Tool => (30, 250, 60),
            Self::Cape => (30, 370, 30),
            Self::Bag => (30, 310, 30),
            Self::Refining => (30, 250, 0),
        };
        SpecializationCoefficients {
            mastery,
            unique,
            mutual,
        }
    }

    /// Guesses the tree from a free-form item type label.
    #[must_use]
    pub fn from_item_type(item_type: &str) -> Self {
        let label = item_type.to_ascii_lowercase();
        if ["off-hand", "shield", "torch", "tome"]
            .iter()
            .any(|needle| label.contains(needle))
        {
            Self::Offhand
        } else if label.contains("cape") {
            Self::Cape
        } else if label.contains("bag") {
            Self::Bag
        } else if label.contains("tool") {
            Self::Tool
        } else {
            Self::ArmorWeapon
        }
    }
}

/// Destiny-board levels feeding focus efficiency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpecializationLevels {
    /// Mastery level (0-100).
    pub mastery: u32,
    /// Specialization level of the crafted item (0-100).
    pub specialization: u32,
    /// Average level of the other specializations in the tree (0-100).
    pub other_specs_average: u32,
    /// How many other specializations the tree has.
    pub other_items: u32,
}

impl SpecializationLevels {
    /// Focus efficiency points, capped at [`MAX_FOCUS_EFFICIENCY`].
    #[must_use]
    pub fn focus_efficiency(&self, kind: SpecializationKind) -> u32 {
        let coeff = kind.coefficients();
        let mastery = self.mastery.saturating_mul(coeff.mastery);
        let unique = self.specialization.saturating_mul(coeff.unique);
        let mutual = self
            .other_specs_average
            .saturating_mul(self.other_items)
            .saturating_mul(coeff.mutual);
        mastery
            .saturating_add(unique)
            .saturating_add(mutual)
            .min(MAX_FOCUS_EFFICIENCY)
    }
}

/// Base focus cost of one refining operation at `tier`.
///
/// Tiers below 4 cannot be refined with focus.
#[must_use]
pub const fn refining_base_focus(tier: u8) -> u64 {
    match tier {
        4 => 54,
        5 => 94,
        6 => 164,
        7 => 287,
        8 => 503,
        _ => 0,
    }
}

/// Focus cost multiplier of an enchantment level.
#[must_use]
pub const fn enchantment_focus_multiplier(enchantment: u8) -> f64 {
    match enchantment {
        1 => 1.75,
        2 => 2.5,
        3 => 3.25,
        4 => 4.0,
        _ => 1.0,
    }
}

/// Focus cost of refining one item of `tier`.`enchantment`, rounded down.
#[must_use]
pub fn refining_focus_cost(model: &FocusModel, tier: u8, enchantment: u8, efficiency: u32) -> u64 {
    let base = refining_base_focus(tier) as f64 * enchantment_focus_multiplier(enchantment);
    floor_focus(model.reduce(base, efficiency))
}
