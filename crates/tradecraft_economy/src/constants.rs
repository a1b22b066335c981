//! # Economy Constants
//!
//! Fixed game-economy rates. All rates are fractions in `[0, 1]` unless the
//! name says otherwise.
//!
//! **CRITICAL:** These are the values the free formula functions use. A
//! deployment that needs different rates loads an
//! [`EconomyConfig`](crate::config::EconomyConfig) instead of editing these.

// =============================================================================
// MARKETPLACE
// =============================================================================

/// Listing (setup) fee charged on the gross value of a sell order.
pub const SETUP_FEE: f64 = 0.025;

/// Sales tax when the seller has premium status.
pub const PREMIUM_TAX: f64 = 0.04;

/// Sales tax when the seller does not have premium status.
pub const NON_PREMIUM_TAX: f64 = 0.08;

// =============================================================================
// RESOURCE RETURN RATES
// =============================================================================

/// Return rate for island production.
pub const RRR_ISLAND: f64 = 0.0;

/// Return rate in a royal city without a local production bonus.
pub const RRR_ROYAL_NO_BONUS: f64 = 0.152;

/// Return rate in a royal city with a local production bonus.
pub const RRR_ROYAL_WITH_BONUS: f64 = 0.248;

/// Approximate base return rate of a black-zone hideout.
///
/// The real value depends on zone quality and hideout level.
pub const RRR_BZ_HO_BASE: f64 = 0.28;

// =============================================================================
// PRODUCTION BONUS (percentage points)
// =============================================================================

/// Base production bonus of every royal city.
pub const ROYAL_CITY_BONUS: f64 = 18.0;

/// Extra refining bonus in the city that specializes in a resource.
pub const REFINING_SPECIALTY_BONUS: f64 = 40.0;

/// Extra crafting bonus in the city that specializes in an item family.
pub const CRAFTING_SPECIALTY_BONUS: f64 = 15.0;

/// Production bonus granted by spending focus.
pub const FOCUS_PRODUCTION_BONUS: f64 = 59.0;

// =============================================================================
// FOCUS
// =============================================================================

/// Efficiency points that halve a focus cost.
pub const FOCUS_HALVING_POINTS: f64 = 10_000.0;

/// Upper bound of focus efficiency reachable from specialization trees.
pub const MAX_FOCUS_EFFICIENCY: u32 = 40_000;

// =============================================================================
// USAGE TAX
// =============================================================================

/// Silver per nutrition unit used by the station usage-tax formulas.
pub const USAGE_TAX_BASE: f64 = 18.0;

/// Flat nutrition added to every Avalonian artifact craft, per unit of energy.
pub const AVALONIAN_ENERGY_NUTRITION: f64 = 72.0;

/// Flat nutrition added to every shark-artifact craft.
pub const SHARK_ARTIFACT_NUTRITION: f64 = 225.0;

// =============================================================================
// ITEM POWER
// =============================================================================

/// Tier at which an item's base item power is quoted.
pub const BASE_IP_TIER: i32 = 4;

/// Item power gained per tier above [`BASE_IP_TIER`].
pub const IP_PER_TIER: f64 = 100.0;

/// Item power gained per enchantment level.
pub const IP_PER_ENCHANTMENT: f64 = 100.0;
