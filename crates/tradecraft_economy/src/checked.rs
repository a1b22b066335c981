//! # Checked Formulas
//!
//! The five core formulas with their documented domains enforced.
//!
//! For in-domain input each function returns exactly what its unchecked
//! counterpart returns; out-of-domain input fails with
//! [`EconomyError::InvalidInput`](crate::EconomyError::InvalidInput).

use crate::constants::MAX_FOCUS_EFFICIENCY;
use crate::crafting::effective_material_cost;
use crate::error::EconomyResult;
use crate::focus::calculate_focus_cost;
use crate::input::{non_negative, reject, Enchantment, Percentage, Tier};
use crate::item_power::{calculate_item_power, Quality};
use crate::market::{calculate_profit, calculate_sell_cost, Silver};

/// Checked [`calculate_sell_cost`].
///
/// # Errors
///
/// Negative price or quantity.
pub fn sell_cost(price: Silver, quantity: i64, is_premium: bool) -> EconomyResult<f64> {
    let price = non_negative("price", price)?;
    let quantity = non_negative("quantity", quantity)?;
    Ok(calculate_sell_cost(price, quantity, is_premium))
}

/// Checked [`calculate_profit`].
///
/// # Errors
///
/// Negative price or quantity.
pub fn profit(sell_price: Silver, buy_price: Silver, quantity: i64, is_premium: bool) -> EconomyResult<f64> {
    let sell_price = non_negative("sell_price", sell_price)?;
    let buy_price = non_negative("buy_price", buy_price)?;
    let quantity = non_negative("quantity", quantity)?;
    Ok(calculate_profit(sell_price, buy_price, quantity, is_premium))
}

/// Checked [`effective_material_cost`].
///
/// # Errors
///
/// Negative cost, or a return rate outside `[0, 100]`.
pub fn material_cost(raw_cost: Silver, rrr_percentage: f64) -> EconomyResult<f64> {
    let raw_cost = non_negative("raw_cost", raw_cost)?;
    let rrr = Percentage::new(rrr_percentage)?;
    Ok(effective_material_cost(raw_cost, rrr.get()))
}

/// Checked [`calculate_focus_cost`].
///
/// # Errors
///
/// Efficiency above [`MAX_FOCUS_EFFICIENCY`].
pub fn focus_cost(base_focus_cost: u64, efficiency_rating: u32) -> EconomyResult<u64> {
    if efficiency_rating > MAX_FOCUS_EFFICIENCY {
        return Err(reject(
            "efficiency_rating",
            format!("must not exceed {MAX_FOCUS_EFFICIENCY}, got {efficiency_rating}"),
        ));
    }
    Ok(calculate_focus_cost(base_focus_cost, efficiency_rating))
}

/// Checked [`calculate_item_power`].
///
/// # Errors
///
/// Negative base IP, tier outside 4-8, enchantment outside 0-4, quality
/// outside 1-5, or a negative or non-finite mastery bonus.
pub fn item_power(
    base_ip: i64,
    tier: i32,
    enchantment: i32,
    quality: i32,
    mastery_bonus: f64,
) -> EconomyResult<f64> {
    let base_ip = non_negative("base_ip", base_ip)?;
    let tier = Tier::new(tier)?;
    if tier.get() < Tier::ITEM_POWER_MIN {
        return Err(reject(
            "tier",
            format!("item power starts at T{}, got {tier}", Tier::ITEM_POWER_MIN),
        ));
    }
    let enchantment = Enchantment::new(enchantment)?;
    let quality = Quality::try_from(quality)?;
    if !(mastery_bonus.is_finite() && mastery_bonus >= 0.0) {
        return Err(reject(
            "mastery_bonus",
            format!("must be a non-negative number, got {mastery_bonus}"),
        ));
    }
    Ok(calculate_item_power(
        base_ip,
        i32::from(tier.get()),
        i32::from(enchantment.get()),
        i32::from(quality.code()),
        mastery_bonus,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EconomyError;

    #[test]
    fn test_checked_matches_unchecked() {
        assert_eq!(sell_cost(100, 10, true), Ok(calculate_sell_cost(100, 10, true)));
        assert_eq!(profit(200, 100, 1, true), Ok(calculate_profit(200, 100, 1, true)));
        assert_eq!(material_cost(1000, 24.8), Ok(effective_material_cost(1000, 24.8)));
        assert_eq!(focus_cost(1000, 10_000), Ok(500));
        assert_eq!(item_power(700, 8, 4, 5, 50.0), Ok(calculate_item_power(700, 8, 4, 5, 50.0)));
    }

    #[test]
    fn test_negative_price_rejected() {
        assert!(matches!(
            sell_cost(-1, 10, true),
            Err(EconomyError::InvalidInput { parameter: "price", .. })
        ));
        assert!(matches!(
            profit(100, -5, 1, false),
            Err(EconomyError::InvalidInput { parameter: "buy_price", .. })
        ));
    }

    #[test]
    fn test_percentage_rejected() {
        assert!(material_cost(1000, 120.0).is_err());
        assert!(material_cost(1000, -5.0).is_err());
    }

    #[test]
    fn test_focus_efficiency_cap() {
        assert_eq!(focus_cost(100, MAX_FOCUS_EFFICIENCY), Ok(6));
        assert!(focus_cost(100, MAX_FOCUS_EFFICIENCY + 1).is_err());
    }

    #[test]
    fn test_item_power_domain() {
        assert!(item_power(700, 3, 0, 1, 0.0).is_err());
        assert!(item_power(700, 9, 0, 1, 0.0).is_err());
        assert!(item_power(700, 4, 5, 1, 0.0).is_err());
        assert!(item_power(700, 4, 0, 0, 0.0).is_err());
        assert!(item_power(700, 4, 0, 1, f64::NAN).is_err());
        assert!(item_power(-1, 4, 0, 1, 0.0).is_err());
    }
}
