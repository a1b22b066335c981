//! # Crafting Formulas
//!
//! Material cost after resource return, station usage taxes and the full
//! crafting planner.
//!
//! ## Planner Pipeline
//!
//! ```text
//! CraftingRequest -> plan_crafting() ->
//!   1. Production bonus (city specialty + focus)
//!   2. Return rate
//!   3. Materials: gross, returned (never artifacts), net
//!   4. Focus cost
//!   5. Revenue after setup fee and sales tax (market or black market)
//!   6. Profit, ROI
//! ```

use std::collections::HashMap;

use crate::constants::{
    AVALONIAN_ENERGY_NUTRITION, FOCUS_PRODUCTION_BONUS, ROYAL_CITY_BONUS, SHARK_ARTIFACT_NUTRITION,
    USAGE_TAX_BASE,
};
use crate::focus::FocusModel;
use crate::market::{MarketRates, Silver};
use crate::production::{crafting_bonus, return_rate_from_production_bonus, City};

/// Material cost after a resource return rate given in percent.
///
/// `0` returns `raw_cost`, `100` returns `0`. Percentages outside `[0, 100]`
/// are not rejected.
///
/// # Example
///
/// ```rust
/// use tradecraft_economy::effective_material_cost;
///
/// assert!((effective_material_cost(1000, 24.8) - 752.0).abs() < 1e-9);
/// ```
#[inline]
#[must_use]
pub fn effective_material_cost(raw_cost: Silver, rrr_percentage: f64) -> f64 {
    raw_cost as f64 * (1.0 - rrr_percentage / 100.0)
}

/// `2^(tier - 4) * 2^enchantment`, the nutrition scale of an item.
#[inline]
fn tier_scale(tier: i32, enchantment: i32) -> f64 {
    2_f64.powi(tier.saturating_sub(4)) * 2_f64.powi(enchantment)
}

/// Station usage tax for refining one item.
///
/// `usage_fee` is the station's fee per 100 nutrition, as shown in game.
#[inline]
#[must_use]
pub fn calculate_refining_tax(usage_fee: f64, tier: i32, enchantment: i32) -> f64 {
    (usage_fee / 1000.0) * USAGE_TAX_BASE * tier_scale(tier, enchantment)
}

/// Artifact family used in a recipe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// No artifact, or a regular artifact.
    #[default]
    Regular,
    /// Royal sigils.
    Royal,
    /// Avalonian shards (taxed by energy).
    Avalonian,
    /// Shark teeth (flat surcharge).
    Shark,
}

/// Inputs of [`calculate_crafting_tax`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CraftingTaxParams {
    /// Station fee per 100 nutrition.
    pub usage_fee: f64,
    /// Total resource units in the recipe.
    pub material_amount: f64,
    /// Item tier.
    pub item_tier: i32,
    /// Enchantment level.
    pub enchantment: i32,
    /// Artifact tier (0 for none).
    pub artifact_tier: i32,
    /// Artifact family.
    pub artifact: ArtifactKind,
    /// Avalonian energy spent (Avalonian artifacts only).
    pub avalonian_energy: f64,
}

impl Default for CraftingTaxParams {
    fn default() -> Self {
        Self {
            usage_fee: 0.0,
            material_amount: 0.0,
            item_tier: 4,
            enchantment: 0,
            artifact_tier: 0,
            artifact: ArtifactKind::Regular,
            avalonian_energy: 0.0,
        }
    }
}

/// Station usage tax for crafting one item.
#[must_use]
pub fn calculate_crafting_tax(params: &CraftingTaxParams) -> f64 {
    let fee = params.usage_fee / 1000.0;
    let tier = 2_f64.powi(params.item_tier.saturating_sub(4));

    match params.artifact {
        ArtifactKind::Avalonian => {
            fee * (USAGE_TAX_BASE * params.material_amount * tier
                + AVALONIAN_ENERGY_NUTRITION * params.avalonian_energy)
        }
        ArtifactKind::Shark => {
            fee * (USAGE_TAX_BASE * params.material_amount * tier + SHARK_ARTIFACT_NUTRITION)
        }
        ArtifactKind::Regular | ArtifactKind::Royal => {
            let mut multiplier = 1.0
                + 0.25 * (2_f64.powi(params.artifact_tier) - 1.0) / 2_f64.powi(params.enchantment);
            if params.artifact == ArtifactKind::Royal {
                multiplier += 1.0;
            }
            fee * USAGE_TAX_BASE
                * params.material_amount
                * multiplier
                * tier_scale(params.item_tier, params.enchantment)
        }
    }
}

/// One material line of a recipe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipeMaterial {
    /// Material item id.
    pub item_id: String,
    /// Units per crafted item.
    pub amount: u32,
    /// Artifacts are never returned.
    pub is_artifact: bool,
}

impl RecipeMaterial {
    /// Creates a regular (returnable) material.
    #[must_use]
    pub fn new(item_id: impl Into<String>, amount: u32) -> Self {
        Self {
            item_id: item_id.into(),
            amount,
            is_artifact: false,
        }
    }

    /// Creates an artifact material.
    #[must_use]
    pub fn artifact(item_id: impl Into<String>, amount: u32) -> Self {
        Self {
            is_artifact: true,
            ..Self::new(item_id, amount)
        }
    }
}

/// Everything the crafting planner needs.
#[derive(Clone, Debug, PartialEq)]
pub struct CraftingRequest {
    /// Crafted item id.
    pub item_id: String,
    /// Recipe materials per crafted item.
    pub materials: Vec<RecipeMaterial>,
    /// Base focus cost per crafted item.
    pub base_focus_cost: u64,
    /// Items to craft.
    pub amount: u32,
    /// Where the craft happens.
    pub craft_city: City,
    /// Spend focus for the extra production bonus.
    pub use_focus: bool,
    /// Focus efficiency points.
    pub focus_efficiency: u32,
    /// Seller premium status.
    pub is_premium: bool,
    /// Total station usage fee in silver.
    pub usage_fee: f64,
    /// Unit price per material item id. Missing prices count as 0.
    pub material_prices: HashMap<String, Silver>,
    /// Market sell price of the crafted item.
    pub output_price: Silver,
    /// Black market buy price, when selling there is an option.
    pub black_market_price: Option<Silver>,
}

/// Where to sell the crafted items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SellVenue {
    /// Regular marketplace.
    #[default]
    Market,
    /// Black market.
    BlackMarket,
}

/// Per-material breakdown of a craft.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialUsage {
    /// Material item id.
    pub item_id: String,
    /// Units consumed before returns.
    pub gross_amount: f64,
    /// Units returned.
    pub returned_amount: f64,
    /// Units actually used up.
    pub net_amount: f64,
    /// Silver value of the gross amount.
    pub gross_cost: f64,
    /// Silver value of the returned units.
    pub returned_value: f64,
    /// Silver value of the net amount.
    pub net_cost: f64,
}

/// Result of [`plan_crafting`].
#[derive(Clone, Debug, PartialEq)]
pub struct CraftingPlan {
    /// Production bonus in percentage points.
    pub production_bonus: f64,
    /// Return rate in percent.
    pub return_rate_percent: f64,
    /// City crafting bonus (without focus).
    pub city_bonus: f64,
    /// Whether the city specializes in this item.
    pub has_specialization: bool,
    /// Material lines.
    pub materials: Vec<MaterialUsage>,
    /// Net material cost.
    pub total_material_cost: f64,
    /// Base focus cost of the whole batch.
    pub base_focus_cost: u64,
    /// Focus actually spent (0 without focus).
    pub actual_focus_cost: u64,
    /// Percentage of focus saved through efficiency.
    pub focus_saving_percent: f64,
    /// Station usage fee.
    pub usage_fee: f64,
    /// Net material cost plus usage fee.
    pub total_cost: f64,
    /// Chosen venue.
    pub sell_to: SellVenue,
    /// Unit price at the chosen venue.
    pub sell_price: Silver,
    /// Sales tax on the whole batch.
    pub sales_tax: f64,
    /// Setup fee on the whole batch.
    pub setup_fee: f64,
    /// Sales tax plus setup fee.
    pub total_tax: f64,
    /// Silver received after taxes.
    pub revenue: f64,
    /// Revenue minus total cost.
    pub profit: f64,
    /// Profit per crafted item.
    pub profit_per_unit: f64,
    /// Profit per focus point (0 without focus).
    pub profit_per_focus: f64,
    /// Profit over total cost, in percent.
    pub roi: f64,
}

/// Plans a craft: materials, focus, taxes and profit.
#[must_use]
pub fn plan_crafting(request: &CraftingRequest, rates: &MarketRates, focus: &FocusModel) -> CraftingPlan {
    let amount = f64::from(request.amount);
    let quantity = i64::from(request.amount);

    let city_bonus = crafting_bonus(&request.item_id, request.craft_city);
    let focus_bonus = if request.use_focus { FOCUS_PRODUCTION_BONUS } else { 0.0 };
    let production_bonus = city_bonus + focus_bonus;
    let return_rate = return_rate_from_production_bonus(production_bonus);

    let materials: Vec<MaterialUsage> = request
        .materials
        .iter()
        .map(|material| {
            let price = request
                .material_prices
                .get(&material.item_id)
                .copied()
                .unwrap_or(0) as f64;
            let gross_amount = f64::from(material.amount) * amount;
            let returned_amount = if material.is_artifact {
                0.0
            } else {
                gross_amount * return_rate
            };
            let net_amount = gross_amount - returned_amount;
            MaterialUsage {
                item_id: material.item_id.clone(),
                gross_amount,
                returned_amount,
                net_amount,
                gross_cost: gross_amount * price,
                returned_value: returned_amount * price,
                net_cost: net_amount * price,
            }
        })
        .collect();
    let total_material_cost: f64 = materials.iter().map(|m| m.net_cost).sum();

    let base_focus_cost = request.base_focus_cost.saturating_mul(u64::from(request.amount));
    let actual_focus_cost = if request.use_focus {
        focus.floor_cost(base_focus_cost, request.focus_efficiency)
    } else {
        0
    };
    let focus_saving_percent = if base_focus_cost > 0 && request.use_focus {
        base_focus_cost.saturating_sub(actual_focus_cost) as f64 / base_focus_cost as f64 * 100.0
    } else {
        0.0
    };

    let total_cost = total_material_cost + request.usage_fee;

    let (sell_to, sell_price) = match request.black_market_price {
        Some(bm_price)
            if rates.net_revenue(bm_price, quantity, request.is_premium)
                > rates.net_revenue(request.output_price, quantity, request.is_premium) =>
        {
            (SellVenue::BlackMarket, bm_price)
        }
        _ => (SellVenue::Market, request.output_price),
    };

    let gross_revenue = sell_price as f64 * amount;
    let sales_tax = gross_revenue * rates.sales_tax_rate(request.is_premium);
    let setup_fee = gross_revenue * rates.setup_fee;
    let total_tax = sales_tax + setup_fee;
    let revenue = gross_revenue - total_tax;

    let profit = revenue - total_cost;
    let profit_per_unit = if request.amount > 0 { profit / amount } else { 0.0 };
    let profit_per_focus = if actual_focus_cost > 0 {
        profit / actual_focus_cost as f64
    } else {
        0.0
    };
    let roi = if total_cost > 0.0 { profit / total_cost * 100.0 } else { 0.0 };

    tracing::trace!(
        item = %request.item_id,
        city = %request.craft_city,
        production_bonus,
        profit,
        "planned craft"
    );

    CraftingPlan {
        production_bonus,
        return_rate_percent: return_rate * 100.0,
        city_bonus,
        has_specialization: city_bonus > ROYAL_CITY_BONUS,
        materials,
        total_material_cost,
        base_focus_cost,
        actual_focus_cost,
        focus_saving_percent,
        usage_fee: request.usage_fee,
        total_cost,
        sell_to,
        sell_price,
        sales_tax,
        setup_fee,
        total_tax,
        revenue,
        profit,
        profit_per_unit,
        profit_per_focus,
        roi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn sword_request() -> CraftingRequest {
        CraftingRequest {
            item_id: "T4_2H_SWORD".to_string(),
            materials: vec![
                RecipeMaterial::new("T4_METALBAR", 20),
                RecipeMaterial::new("T4_LEATHER", 12),
            ],
            base_focus_cost: 400,
            amount: 10,
            craft_city: City::Caerleon,
            use_focus: false,
            focus_efficiency: 0,
            is_premium: true,
            usage_fee: 500.0,
            material_prices: HashMap::from([
                ("T4_METALBAR".to_string(), 100),
                ("T4_LEATHER".to_string(), 50),
            ]),
            output_price: 5000,
            black_market_price: None,
        }
    }

    #[test]
    fn test_material_cost_bounds() {
        for raw in [0, 1, 999, 1_000_000] {
            assert!((effective_material_cost(raw, 0.0) - raw as f64).abs() < EPS);
            assert!(effective_material_cost(raw, 100.0).abs() < EPS);
        }
    }

    #[test]
    fn test_material_cost_royal_bonus() {
        assert!((effective_material_cost(1000, 24.8) - 752.0).abs() < EPS);
    }

    #[test]
    fn test_material_cost_decreasing() {
        let mut last = f64::INFINITY;
        for pct in [0.0, 15.2, 24.8, 28.0, 50.0, 100.0] {
            let cost = effective_material_cost(1000, pct);
            assert!(cost < last);
            last = cost;
        }
    }

    #[test]
    fn test_refining_tax() {
        assert!((calculate_refining_tax(1000.0, 4, 0) - 18.0).abs() < EPS);
        assert!((calculate_refining_tax(1000.0, 6, 1) - 144.0).abs() < EPS);
        assert!((calculate_refining_tax(500.0, 5, 0) - 18.0).abs() < EPS);
    }

    #[test]
    fn test_taxes_with_extreme_tier() {
        assert!(calculate_refining_tax(1000.0, i32::MIN, 0).abs() < EPS);
        let params = CraftingTaxParams {
            usage_fee: 1000.0,
            material_amount: 32.0,
            item_tier: i32::MIN,
            ..CraftingTaxParams::default()
        };
        assert!(calculate_crafting_tax(&params).is_finite());
    }

    #[test]
    fn test_crafting_tax_regular() {
        let params = CraftingTaxParams {
            usage_fee: 1000.0,
            material_amount: 32.0,
            ..CraftingTaxParams::default()
        };
        assert!((calculate_crafting_tax(&params) - 576.0).abs() < EPS);
    }

    #[test]
    fn test_crafting_tax_artifacts() {
        let base = CraftingTaxParams {
            usage_fee: 1000.0,
            material_amount: 10.0,
            artifact_tier: 1,
            ..CraftingTaxParams::default()
        };
        // multiplier 1.25
        assert!((calculate_crafting_tax(&base) - 225.0).abs() < EPS);

        let royal = CraftingTaxParams { artifact: ArtifactKind::Royal, ..base };
        assert!((calculate_crafting_tax(&royal) - 405.0).abs() < EPS);

        let shark = CraftingTaxParams { artifact: ArtifactKind::Shark, ..base };
        assert!((calculate_crafting_tax(&shark) - 405.0).abs() < EPS);

        let avalonian = CraftingTaxParams {
            artifact: ArtifactKind::Avalonian,
            avalonian_energy: 2.0,
            ..base
        };
        assert!((calculate_crafting_tax(&avalonian) - 324.0).abs() < EPS);
    }

    #[test]
    fn test_plan_without_focus() {
        let plan = plan_crafting(&sword_request(), &MarketRates::STANDARD, &FocusModel::STANDARD);

        assert!((plan.production_bonus - 18.0).abs() < EPS);
        assert!(!plan.has_specialization);
        let rrr = 1.0 - 100.0 / 118.0;
        let expected_materials = (200.0 * 100.0 + 120.0 * 50.0) * (1.0 - rrr);
        assert!((plan.total_material_cost - expected_materials).abs() < 1e-6);
        assert_eq!(plan.actual_focus_cost, 0);
        assert!((plan.total_tax - 50_000.0 * 0.065).abs() < 1e-6);
        assert!((plan.revenue - 46_750.0).abs() < 1e-6);
        assert!((plan.profit - (46_750.0 - expected_materials - 500.0)).abs() < 1e-6);
        assert_eq!(plan.sell_to, SellVenue::Market);
    }

    #[test]
    fn test_plan_specialized_city_with_focus() {
        let request = CraftingRequest {
            craft_city: City::Thetford,
            use_focus: true,
            focus_efficiency: 10_000,
            ..sword_request()
        };
        let plan = plan_crafting(&request, &MarketRates::STANDARD, &FocusModel::STANDARD);

        assert!((plan.production_bonus - 92.0).abs() < EPS);
        assert!(plan.has_specialization);
        assert_eq!(plan.base_focus_cost, 4000);
        assert_eq!(plan.actual_focus_cost, 2000);
        assert!((plan.focus_saving_percent - 50.0).abs() < EPS);
        assert!((plan.profit_per_focus - plan.profit / 2000.0).abs() < EPS);
    }

    #[test]
    fn test_plan_focus_rounds_down() {
        let request = CraftingRequest {
            base_focus_cost: 3,
            amount: 1,
            use_focus: true,
            focus_efficiency: 10_000,
            ..sword_request()
        };
        let plan = plan_crafting(&request, &MarketRates::STANDARD, &FocusModel::STANDARD);
        // 1.5 -> 1
        assert_eq!(plan.actual_focus_cost, 1);
    }

    #[test]
    fn test_plan_focus_beyond_f64_precision() {
        let request = CraftingRequest {
            base_focus_cost: (1_u64 << 54) - 1,
            amount: 1,
            use_focus: true,
            ..sword_request()
        };
        let plan = plan_crafting(&request, &MarketRates::STANDARD, &FocusModel::STANDARD);
        assert!(plan.actual_focus_cost <= plan.base_focus_cost);
        assert!(plan.focus_saving_percent.abs() < EPS);
    }

    #[test]
    fn test_artifacts_are_not_returned() {
        let request = CraftingRequest {
            materials: vec![RecipeMaterial::artifact("T4_ARTEFACT_2H_CLAYMORE_AVALON", 1)],
            material_prices: HashMap::from([("T4_ARTEFACT_2H_CLAYMORE_AVALON".to_string(), 1000)]),
            ..sword_request()
        };
        let plan = plan_crafting(&request, &MarketRates::STANDARD, &FocusModel::STANDARD);
        assert!(plan.materials[0].returned_amount.abs() < EPS);
        assert!((plan.total_material_cost - 10_000.0).abs() < EPS);
    }

    #[test]
    fn test_black_market_chosen_when_better() {
        let request = CraftingRequest {
            black_market_price: Some(6000),
            ..sword_request()
        };
        let plan = plan_crafting(&request, &MarketRates::STANDARD, &FocusModel::STANDARD);
        assert_eq!(plan.sell_to, SellVenue::BlackMarket);
        assert_eq!(plan.sell_price, 6000);

        let request = CraftingRequest {
            black_market_price: Some(4000),
            ..sword_request()
        };
        let plan = plan_crafting(&request, &MarketRates::STANDARD, &FocusModel::STANDARD);
        assert_eq!(plan.sell_to, SellVenue::Market);
    }

    #[test]
    fn test_missing_price_counts_as_free() {
        let request = CraftingRequest {
            material_prices: HashMap::new(),
            ..sword_request()
        };
        let plan = plan_crafting(&request, &MarketRates::STANDARD, &FocusModel::STANDARD);
        assert!(plan.total_material_cost.abs() < EPS);
    }
}
