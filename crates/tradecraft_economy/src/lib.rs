//! # TRADECRAFT Economy
//!
//! Economic and crafting formulas for the TRADECRAFT trade calculator.
//!
//! ## Design Principles
//!
//! 1. **Pure formulas** - Every function is a deterministic function of its arguments
//! 2. **Named rates** - Fees, taxes and return rates live in [`constants`]
//! 3. **Lenient core, strict edge** - Formulas never fail; [`checked`] and [`input`]
//!    reject out-of-domain values for callers that want it
//! 4. **External configuration** - Rate overrides come from TOML, loaded once
//!
//! ## Thread Safety
//!
//! There is no shared state. Everything can be called from any thread.
//!
//! ## Example
//!
//! ```rust
//! use tradecraft_economy::{calculate_item_power, calculate_profit, calculate_sell_cost};
//!
//! // Listing 10 units at 100 silver as a premium seller.
//! let fees = calculate_sell_cost(100, 10, true);
//! assert!((fees - 65.0).abs() < 1e-9);
//!
//! // Buying at 100 and selling at 200.
//! let profit = calculate_profit(200, 100, 1, true);
//! assert!((profit - 87.0).abs() < 1e-9);
//!
//! let ip = calculate_item_power(700, 8, 4, 5, 50.0);
//! assert!((ip - 1650.0).abs() < 1e-9);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
// Silver amounts and quantities stay far below 2^53.
#![allow(clippy::cast_precision_loss)]

pub mod checked;
pub mod config;
pub mod constants;
pub mod crafting;
pub mod error;
pub mod focus;
pub mod input;
pub mod item_power;
pub mod market;
pub mod production;
pub mod refining;

pub use config::{EconomyConfig, ReturnRates};
pub use crafting::{
    calculate_crafting_tax, calculate_refining_tax, effective_material_cost, plan_crafting,
    ArtifactKind, CraftingPlan, CraftingRequest, CraftingTaxParams, RecipeMaterial, SellVenue,
};
pub use error::{EconomyError, EconomyResult};
pub use focus::{calculate_focus_cost, FocusModel, SpecializationKind, SpecializationLevels};
pub use input::{Enchantment, Percentage, Tier};
pub use item_power::{calculate_item_power, quality_bonus, Quality};
pub use market::{
    calculate_flipping_profit, calculate_profit, calculate_sell_cost, calculate_unit_profit,
    FlipBreakdown, MarketRates, Silver,
};
pub use production::{City, ProductionSite, RefiningBonus, Resource};
pub use refining::{plan_refining, RefiningPlan, RefiningPrices, RefiningRequest};
