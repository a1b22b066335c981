//! # Production Sites and Local Bonuses
//!
//! Where an item is made decides how many materials come back.
//!
//! ## Production Bonus → Return Rate
//!
//! ```text
//! bonus  = 18 (royal city) + specialty + 59 (focus)
//! RRR    = 1 - 100 / (100 + bonus)
//! ```
//!
//! A 58% bonus returns `1 - 100/158 ≈ 36.7%` of the materials.

use std::fmt;
use std::str::FromStr;

use crate::constants::{
    CRAFTING_SPECIALTY_BONUS, FOCUS_PRODUCTION_BONUS, REFINING_SPECIALTY_BONUS, ROYAL_CITY_BONUS,
    RRR_BZ_HO_BASE, RRR_ISLAND, RRR_ROYAL_NO_BONUS, RRR_ROYAL_WITH_BONUS,
};
use crate::error::{EconomyError, EconomyResult};

/// Kind of place a craft or refine happens at, with its fixed return rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProductionSite {
    /// Personal island.
    Island,
    /// Royal city without a local production bonus.
    RoyalCity,
    /// Royal city with a local production bonus.
    RoyalCityWithBonus,
    /// Black-zone hideout (approximate base rate).
    BlackZoneHideout,
}

impl ProductionSite {
    /// Resource return rate as a fraction.
    #[inline]
    #[must_use]
    pub const fn return_rate(self) -> f64 {
        match self {
            Self::Island => RRR_ISLAND,
            Self::RoyalCity => RRR_ROYAL_NO_BONUS,
            Self::RoyalCityWithBonus => RRR_ROYAL_WITH_BONUS,
            Self::BlackZoneHideout => RRR_BZ_HO_BASE,
        }
    }

    /// Resource return rate as a percentage, the unit
    /// [`effective_material_cost`](crate::crafting::effective_material_cost) takes.
    #[inline]
    #[must_use]
    pub fn return_rate_percent(self) -> f64 {
        self.return_rate() * 100.0
    }
}

/// Converts a production bonus in percentage points to a return rate fraction.
#[inline]
#[must_use]
pub fn return_rate_from_production_bonus(bonus_percent: f64) -> f64 {
    1.0 - 100.0 / (100.0 + bonus_percent)
}

/// Royal cities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum City {
    /// Central city, no specialization.
    Caerleon,
    /// Stone and crossbows, shields, daggers.
    Bridgewatch,
    /// Fiber and bows, cloth armor, nature staffs.
    Lymhurst,
    /// Hide and leather armor, spears, boots.
    Martlock,
    /// Wood and plate armor, hammers, maces.
    FortSterling,
    /// Ore and swords, axes, quarterstaffs.
    Thetford,
}

impl City {
    /// Every royal city.
    pub const ALL: [Self; 6] = [
        Self::Caerleon,
        Self::Bridgewatch,
        Self::Lymhurst,
        Self::Martlock,
        Self::FortSterling,
        Self::Thetford,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Caerleon => "Caerleon",
            Self::Bridgewatch => "Bridgewatch",
            Self::Lymhurst => "Lymhurst",
            Self::Martlock => "Martlock",
            Self::FortSterling => "Fort Sterling",
            Self::Thetford => "Thetford",
        }
    }

    /// Raw resource this city refines with a bonus.
    #[must_use]
    pub const fn refining_specialty(self) -> Option<Resource> {
        match self {
            Self::Caerleon => None,
            Self::Bridgewatch => Some(Resource::Rock),
            Self::Lymhurst => Some(Resource::Fiber),
            Self::Martlock => Some(Resource::Hide),
            Self::FortSterling => Some(Resource::Wood),
            Self::Thetford => Some(Resource::Ore),
        }
    }

    /// Item base-type fragments this city crafts with a bonus.
    ///
    /// An item qualifies when its base type contains one of the fragments.
    #[must_use]
    pub const fn crafting_specialties(self) -> &'static [&'static str] {
        match self {
            Self::Caerleon => &[],
            Self::Bridgewatch => &[
                "2H_CROSSBOW", "2H_CROSSBOWLARGE", "MAIN_CROSSBOW",
                "OFF_SHIELD", "OFF_TOWERSHIELD", "OFF_SPIKEDSHIELD",
                "MAIN_DAGGER", "2H_DAGGERPAIR", "2H_CLAWPAIR",
            ],
            Self::Lymhurst => &[
                "2H_BOW", "2H_WARBOW", "2H_LONGBOW",
                "HEAD_CLOTH", "ARMOR_CLOTH", "SHOES_CLOTH",
                "2H_NATURESTAFF", "2H_WILDSTAFF", "2H_DRUIDSTAFF",
            ],
            Self::Martlock => &[
                "HEAD_LEATHER", "ARMOR_LEATHER", "SHOES_LEATHER",
                "2H_SPEAR", "2H_HARPOON", "2H_GLAIVE",
                "SHOES_PLATE", "SHOES_CLOTH",
            ],
            Self::FortSterling => &[
                "HEAD_PLATE", "ARMOR_PLATE", "SHOES_PLATE",
                "2H_HAMMER", "2H_POLEHAMMER", "MAIN_HAMMER",
                "2H_MACE", "MAIN_MACE", "2H_FLAIL",
            ],
            Self::Thetford => &[
                "2H_SWORD", "2H_CLAYMORE", "MAIN_SWORD", "2H_DUALSWORD",
                "2H_AXE", "2H_HALBERD", "MAIN_AXE", "2H_HALBERD_MORGANA",
                "2H_QUARTERSTAFF", "2H_IRONCLADEDSTAFF", "2H_DOUBLEBLADEDSTAFF",
            ],
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = EconomyError;

    fn from_str(s: &str) -> EconomyResult<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|city| {
                city.name().eq_ignore_ascii_case(wanted)
                    || city.name().replace(' ', "").eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| EconomyError::invalid_input("city", format!("unknown city {s:?}")))
    }
}

/// Refinable resource families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Ore, refined into metal bars.
    Ore,
    /// Fiber, refined into cloth.
    Fiber,
    /// Hide, refined into leather.
    Hide,
    /// Wood, refined into planks.
    Wood,
    /// Rock, refined into stone blocks.
    Rock,
}

impl Resource {
    /// Every resource family.
    pub const ALL: [Self; 5] = [Self::Ore, Self::Fiber, Self::Hide, Self::Wood, Self::Rock];

    /// Item-id name of the raw resource.
    #[must_use]
    pub const fn raw_name(self) -> &'static str {
        match self {
            Self::Ore => "ORE",
            Self::Fiber => "FIBER",
            Self::Hide => "HIDE",
            Self::Wood => "WOOD",
            Self::Rock => "ROCK",
        }
    }

    /// Item-id name of the refined product.
    #[must_use]
    pub const fn refined_name(self) -> &'static str {
        match self {
            Self::Ore => "METALBAR",
            Self::Fiber => "CLOTH",
            Self::Hide => "LEATHER",
            Self::Wood => "PLANKS",
            Self::Rock => "STONEBLOCK",
        }
    }

    /// City that refines this resource with a bonus.
    #[must_use]
    pub const fn refining_city(self) -> City {
        match self {
            Self::Ore => City::Thetford,
            Self::Fiber => City::Lymhurst,
            Self::Hide => City::Martlock,
            Self::Wood => City::FortSterling,
            Self::Rock => City::Bridgewatch,
        }
    }

    /// Looks up a resource by raw or refined name (`"ORE"`, `"METALBAR"`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|resource| {
            resource.raw_name().eq_ignore_ascii_case(name)
                || resource.refined_name().eq_ignore_ascii_case(name)
        })
    }

    /// Extracts the resource from an item id such as `T4_ORE@1` or `T5_PLANKS`.
    #[must_use]
    pub fn from_item_id(item_id: &str) -> Option<Self> {
        Self::from_name(base_item_type(item_id))
    }
}

/// Strips the tier prefix and enchantment suffix from an item id.
///
/// `T4_2H_SWORD@2` becomes `2H_SWORD`, `T6_ORE_LEVEL1@1` becomes `ORE`.
#[must_use]
pub fn base_item_type(item_id: &str) -> &str {
    let rest = match item_id.split_once('_') {
        Some((prefix, rest)) if is_tier_prefix(prefix) => rest,
        _ => item_id,
    };
    let rest = rest.split_once('@').map_or(rest, |(base, _)| base);
    match rest.rfind("_LEVEL") {
        Some(idx) if is_digits(&rest[idx + "_LEVEL".len()..]) => &rest[..idx],
        _ => rest,
    }
}

fn is_tier_prefix(prefix: &str) -> bool {
    prefix.strip_prefix('T').is_some_and(is_digits)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Refining production bonus breakdown, in percentage points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RefiningBonus {
    /// Royal city base bonus.
    pub base: f64,
    /// City specialization bonus.
    pub specialty: f64,
    /// Focus bonus.
    pub focus: f64,
}

impl RefiningBonus {
    /// Sum of all components.
    #[inline]
    #[must_use]
    pub fn total(&self) -> f64 {
        self.base + self.specialty + self.focus
    }

    /// Return rate fraction implied by [`Self::total`].
    #[inline]
    #[must_use]
    pub fn return_rate(&self) -> f64 {
        return_rate_from_production_bonus(self.total())
    }
}

/// Production bonus for refining `resource` in `city`.
#[must_use]
pub fn refining_bonus(resource: Resource, city: City, use_focus: bool) -> RefiningBonus {
    RefiningBonus {
        base: ROYAL_CITY_BONUS,
        specialty: if resource.refining_city() == city {
            REFINING_SPECIALTY_BONUS
        } else {
            0.0
        },
        focus: if use_focus { FOCUS_PRODUCTION_BONUS } else { 0.0 },
    }
}

/// True when `city` crafts `item_id` with a specialization bonus.
#[must_use]
pub fn has_crafting_specialty(item_id: &str, city: City) -> bool {
    let base = base_item_type(item_id);
    city.crafting_specialties()
        .iter()
        .any(|fragment| base.contains(fragment))
}

/// Crafting production bonus (percentage points, without focus).
#[must_use]
pub fn crafting_bonus(item_id: &str, city: City) -> f64 {
    if has_crafting_specialty(item_id, city) {
        ROYAL_CITY_BONUS + CRAFTING_SPECIALTY_BONUS
    } else {
        ROYAL_CITY_BONUS
    }
}

/// City with the highest crafting bonus for `item_id`, Caerleon when none.
#[must_use]
pub fn optimal_crafting_city(item_id: &str) -> City {
    City::ALL
        .into_iter()
        .find(|&city| has_crafting_specialty(item_id, city))
        .unwrap_or(City::Caerleon)
}
