//! # Refining
//!
//! Raw resources plus one lower-tier refined resource become one refined
//! resource. A share of both inputs comes back according to the return rate.
//!
//! ## Recipe Ratios
//!
//! | Tier | Raw | Lower-tier refined |
//! |------|-----|--------------------|
//! | T2   | 1   | 0                  |
//! | T3   | 2   | 1                  |
//! | T4   | 2   | 1                  |
//! | T5   | 3   | 1                  |
//! | T6   | 4   | 1                  |
//! | T7   | 5   | 1                  |
//! | T8   | 5   | 1                  |

use crate::constants::{FOCUS_PRODUCTION_BONUS, ROYAL_CITY_BONUS};
use crate::crafting::calculate_refining_tax;
use crate::focus::{refining_focus_cost, FocusModel};
use crate::market::{MarketRates, Silver};
use crate::production::{refining_bonus, City, RefiningBonus, Resource};

/// Estimated refining operations per hour (about 30 seconds each).
pub const REFINES_PER_HOUR: f64 = 120.0;

/// Inputs consumed by one refine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefiningRecipe {
    /// Raw resource units.
    pub raw: u32,
    /// Lower-tier refined units.
    pub refined: u32,
}

/// Recipe for refining a resource of `tier`.
#[must_use]
pub const fn refining_recipe(tier: u8) -> RefiningRecipe {
    let (raw, refined) = match tier {
        3 | 4 => (2, 1),
        5 => (3, 1),
        6 => (4, 1),
        7 | 8 => (5, 1),
        _ => (1, 0),
    };
    RefiningRecipe { raw, refined }
}

/// Market prices for a refining run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefiningPrices {
    /// Unit price of the raw resource.
    pub raw_item: Silver,
    /// Unit price of the lower-tier refined resource.
    pub refined_item: Silver,
    /// Unit sell price of the output.
    pub output_item: Silver,
}

/// Everything the refining planner needs.
#[derive(Clone, Debug, PartialEq)]
pub struct RefiningRequest {
    /// Raw resource item id, e.g. `T5_HIDE@1`.
    pub resource_item_id: String,
    /// Output tier.
    pub tier: u8,
    /// Enchantment level.
    pub enchantment: u8,
    /// Refined items to produce.
    pub amount: u32,
    /// Station fee per 100 nutrition.
    pub usage_fee: f64,
    /// Return rate in percent, used when no city is given and as the
    /// baseline for the specialty comparison.
    pub return_rate_percent: f64,
    /// City the refine happens in.
    pub refine_city: Option<City>,
    /// Seller premium status.
    pub is_premium: bool,
    /// Spend focus.
    pub use_focus: bool,
    /// Focus efficiency points.
    pub focus_efficiency: u32,
    /// Market prices; without them only quantities are planned.
    pub prices: Option<RefiningPrices>,
}

/// Profit figures of a priced refining run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RefiningEconomics {
    /// Output value before market tax.
    pub revenue: f64,
    /// Setup fee plus sales tax on the output.
    pub market_tax: f64,
    /// Revenue minus total cost.
    pub gross_profit: f64,
    /// Gross profit minus market tax.
    pub net_profit: f64,
    /// Net profit over total cost, in percent.
    pub profit_margin: f64,
    /// Net profit per focus point (0 without focus).
    pub profit_per_focus: f64,
    /// Net profit per refined item.
    pub profit_per_unit: f64,
    /// Net profit extrapolated to 10, 100 and 1000 items.
    pub profit_per_batch: [f64; 3],
    /// Net profit per hour at [`REFINES_PER_HOUR`].
    pub silver_per_hour: f64,
    /// Net profit at the baseline return rate, when a city specialty applied.
    pub profit_without_specialty: Option<f64>,
}

/// Result of [`plan_refining`].
#[derive(Clone, Debug, PartialEq)]
pub struct RefiningPlan {
    /// Resource family, when the item id names one.
    pub resource: Option<Resource>,
    /// Raw units needed before returns.
    pub raw_materials_needed: u64,
    /// Lower-tier refined units needed before returns.
    pub refined_material_needed: u64,
    /// Station usage tax for the run.
    pub tax: f64,
    /// Refined items produced.
    pub estimated_output: u32,
    /// City production bonus, when a city was given.
    pub production_bonus: Option<RefiningBonus>,
    /// Return rate applied, in percent.
    pub return_rate_percent: f64,
    /// Raw units used after returns.
    pub net_raw_used: f64,
    /// Lower-tier refined units used after returns.
    pub net_refined_used: f64,
    /// Focus spent.
    pub focus_cost: u64,
    /// Total cost: materials plus tax when priced, tax alone otherwise.
    pub total_cost: f64,
    /// Cost per refined item; material units per item when unpriced.
    pub cost_per_refined: f64,
    /// Profit figures, when prices were given.
    pub economics: Option<RefiningEconomics>,
}

/// Plans a refining run.
#[must_use]
pub fn plan_refining(request: &RefiningRequest, rates: &MarketRates, focus: &FocusModel) -> RefiningPlan {
    let recipe = refining_recipe(request.tier);
    let amount = u64::from(request.amount);
    let raw_materials_needed = amount * u64::from(recipe.raw);
    let refined_material_needed = amount * u64::from(recipe.refined);

    let tax = calculate_refining_tax(
        request.usage_fee,
        i32::from(request.tier),
        i32::from(request.enchantment),
    ) * f64::from(request.amount);

    let resource = Resource::from_item_id(&request.resource_item_id);
    let production_bonus = match (request.refine_city, resource) {
        (Some(city), Some(resource)) => Some(refining_bonus(resource, city, request.use_focus)),
        // Unknown resource: royal base only, no specialty.
        (Some(_), None) => Some(RefiningBonus {
            base: ROYAL_CITY_BONUS,
            specialty: 0.0,
            focus: if request.use_focus { FOCUS_PRODUCTION_BONUS } else { 0.0 },
        }),
        (None, _) => None,
    };
    let return_rate = production_bonus
        .map_or(request.return_rate_percent / 100.0, |bonus| bonus.return_rate());

    let net_raw_used = raw_materials_needed as f64 * (1.0 - return_rate);
    let net_refined_used = refined_material_needed as f64 * (1.0 - return_rate);

    let focus_cost = if request.use_focus {
        refining_focus_cost(focus, request.tier, request.enchantment, request.focus_efficiency)
            .saturating_mul(amount)
    } else {
        0
    };

    let output = f64::from(request.amount);
    let per_output = |value: f64| if request.amount > 0 { value / output } else { 0.0 };

    let (total_cost, cost_per_refined, economics) = match request.prices {
        Some(prices) => {
            let material_cost = |rate: f64| {
                raw_materials_needed as f64 * (1.0 - rate) * prices.raw_item as f64
                    + refined_material_needed as f64 * (1.0 - rate) * prices.refined_item as f64
            };
            let total_cost = material_cost(return_rate) + tax;

            let revenue = output * prices.output_item as f64;
            let market_tax = revenue * (rates.sales_tax_rate(request.is_premium) + rates.setup_fee);
            let gross_profit = revenue - total_cost;
            let net_profit = gross_profit - market_tax;

            let specialty_applied = production_bonus.is_some_and(|bonus| bonus.specialty > 0.0);
            let profit_without_specialty = specialty_applied.then(|| {
                let baseline_cost = material_cost(request.return_rate_percent / 100.0) + tax;
                revenue - baseline_cost - market_tax
            });

            let profit_per_unit = per_output(net_profit);
            let economics = RefiningEconomics {
                revenue,
                market_tax,
                gross_profit,
                net_profit,
                profit_margin: if total_cost > 0.0 { net_profit / total_cost * 100.0 } else { 0.0 },
                profit_per_focus: if focus_cost > 0 { net_profit / focus_cost as f64 } else { 0.0 },
                profit_per_unit,
                profit_per_batch: [profit_per_unit * 10.0, profit_per_unit * 100.0, profit_per_unit * 1000.0],
                silver_per_hour: profit_per_unit * REFINES_PER_HOUR,
                profit_without_specialty,
            };
            (total_cost, per_output(total_cost), Some(economics))
        }
        None => (tax, per_output(net_raw_used + net_refined_used), None),
    };

    tracing::trace!(
        item = %request.resource_item_id,
        tier = request.tier,
        return_rate,
        total_cost,
        "planned refine"
    );

    RefiningPlan {
        resource,
        raw_materials_needed,
        refined_material_needed,
        tax,
        estimated_output: request.amount,
        production_bonus,
        return_rate_percent: return_rate * 100.0,
        net_raw_used,
        net_refined_used,
        focus_cost,
        total_cost,
        cost_per_refined,
        economics,
    }
}
