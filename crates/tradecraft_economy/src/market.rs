//! # Marketplace Formulas
//!
//! Listing fees, sales tax, net profit and order-book flipping.
//!
//! ## Fee Model
//!
//! ```text
//! gross      = price * quantity
//! setup_fee  = gross * SETUP_FEE
//! sales_tax  = gross * (PREMIUM_TAX | NON_PREMIUM_TAX)
//! sell_cost  = setup_fee + sales_tax
//! ```
//!
//! Inputs are trusted. Negative prices or quantities produce negative (but
//! finite) results; see [`crate::checked`] for the validating variants.

use serde::{Deserialize, Serialize};

use crate::constants::{NON_PREMIUM_TAX, PREMIUM_TAX, SETUP_FEE};

/// Whole silver, the game currency.
pub type Silver = i64;

/// Marketplace fee and tax rates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketRates {
    /// Listing fee as a fraction of gross value.
    pub setup_fee: f64,
    /// Sales tax with premium status.
    pub premium_tax: f64,
    /// Sales tax without premium status.
    pub non_premium_tax: f64,
}

impl MarketRates {
    /// The rates baked into [`crate::constants`].
    pub const STANDARD: Self = Self {
        setup_fee: SETUP_FEE,
        premium_tax: PREMIUM_TAX,
        non_premium_tax: NON_PREMIUM_TAX,
    };

    /// Sales tax rate for the given premium status.
    #[inline]
    #[must_use]
    pub const fn sales_tax_rate(&self, is_premium: bool) -> f64 {
        if is_premium {
            self.premium_tax
        } else {
            self.non_premium_tax
        }
    }

    /// Total silver deducted from a listed sale (setup fee + sales tax).
    ///
    /// Premium sellers are the common case; pass `is_premium = true` unless
    /// the caller knows otherwise.
    #[inline]
    #[must_use]
    pub fn sell_cost(&self, price: Silver, quantity: i64, is_premium: bool) -> f64 {
        let gross = gross_value(price, quantity);
        let setup_fee = gross * self.setup_fee;
        let sales_tax = gross * self.sales_tax_rate(is_premium);
        setup_fee + sales_tax
    }

    /// Net profit of buying at `buy_price` and listing at `sell_price`.
    ///
    /// A negative result is a loss, not an error.
    #[inline]
    #[must_use]
    pub fn profit(&self, sell_price: Silver, buy_price: Silver, quantity: i64, is_premium: bool) -> f64 {
        let gross_revenue = gross_value(sell_price, quantity);
        let total_tax = self.sell_cost(sell_price, quantity, is_premium);
        let total_cost = gross_value(buy_price, quantity);
        gross_revenue - total_tax - total_cost
    }

    /// Silver actually received from a listed sale.
    #[inline]
    #[must_use]
    pub fn net_revenue(&self, price: Silver, quantity: i64, is_premium: bool) -> f64 {
        gross_value(price, quantity) - self.sell_cost(price, quantity, is_premium)
    }

    /// Full breakdown of a buy-low/sell-high flip.
    ///
    /// With `use_orders` both legs pay the setup fee (a buy order and a sell
    /// order). Without it the trade is instant and only the sales tax applies.
    #[must_use]
    pub fn flipping_profit(
        &self,
        buy_price: Silver,
        sell_price: Silver,
        quantity: i64,
        use_orders: bool,
        is_premium: bool,
    ) -> FlipBreakdown {
        let bought = gross_value(buy_price, quantity);
        let sold = gross_value(sell_price, quantity);

        let gross = sold - bought;
        let sales_tax = sold * self.sales_tax_rate(is_premium);

        let (buy_order_fee, sell_order_fee) = if use_orders {
            (bought * self.setup_fee, sold * self.setup_fee)
        } else {
            (0.0, 0.0)
        };

        let order_fees = buy_order_fee + sell_order_fee;
        let tax = sales_tax + order_fees;
        let net = gross - tax;
        let margin = if buy_price > 0 { net / bought * 100.0 } else { 0.0 };

        FlipBreakdown {
            gross,
            net,
            margin,
            tax,
            sales_tax,
            order_fees,
            buy_order_fee,
            sell_order_fee,
        }
    }
}

impl Default for MarketRates {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Result of [`calculate_flipping_profit`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlipBreakdown {
    /// Spread times quantity, before any fee.
    pub gross: f64,
    /// Profit after every fee and tax.
    pub net: f64,
    /// Net profit as a percentage of the silver spent buying.
    pub margin: f64,
    /// Sales tax plus order fees.
    pub tax: f64,
    /// Sales tax on the sell leg.
    pub sales_tax: f64,
    /// Buy order fee plus sell order fee.
    pub order_fees: f64,
    /// Setup fee of the buy order.
    pub buy_order_fee: f64,
    /// Setup fee of the sell order.
    pub sell_order_fee: f64,
}

#[inline]
fn gross_value(price: Silver, quantity: i64) -> f64 {
    price as f64 * quantity as f64
}

/// Total cost (setup fee + sales tax) of selling `quantity` units at `price`.
///
/// Uses the standard rates. `is_premium` is usually `true`.
///
/// # Example
///
/// ```rust
/// use tradecraft_economy::calculate_sell_cost;
///
/// assert!((calculate_sell_cost(100, 10, true) - 65.0).abs() < 1e-9);
/// ```
#[inline]
#[must_use]
pub fn calculate_sell_cost(price: Silver, quantity: i64, is_premium: bool) -> f64 {
    MarketRates::STANDARD.sell_cost(price, quantity, is_premium)
}

/// Net profit of a flip or craft: revenue minus selling costs minus purchase cost.
///
/// Uses the standard rates. A negative result is a loss.
#[inline]
#[must_use]
pub fn calculate_profit(sell_price: Silver, buy_price: Silver, quantity: i64, is_premium: bool) -> f64 {
    MarketRates::STANDARD.profit(sell_price, buy_price, quantity, is_premium)
}

/// [`calculate_profit`] for a single unit sold by a premium seller.
#[inline]
#[must_use]
pub fn calculate_unit_profit(sell_price: Silver, buy_price: Silver) -> f64 {
    calculate_profit(sell_price, buy_price, 1, true)
}

/// Breakdown of a flip at the standard rates.
#[inline]
#[must_use]
pub fn calculate_flipping_profit(
    buy_price: Silver,
    sell_price: Silver,
    quantity: i64,
    use_orders: bool,
    is_premium: bool,
) -> FlipBreakdown {
    MarketRates::STANDARD.flipping_profit(buy_price, sell_price, quantity, use_orders, is_premium)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_sell_cost_premium() {
        assert!((calculate_sell_cost(100, 10, true) - 65.0).abs() < EPS);
    }

    #[test]
    fn test_sell_cost_non_premium() {
        assert!((calculate_sell_cost(100, 10, false) - 105.0).abs() < EPS);
    }

    #[test]
    fn test_sell_cost_combined_rate() {
        for (price, quantity) in [(1, 1), (37, 3), (12_345, 17), (999_999, 250)] {
            let gross = (price * quantity) as f64;
            assert!((calculate_sell_cost(price, quantity, true) - gross * 0.065).abs() < 1e-6);
            assert!((calculate_sell_cost(price, quantity, false) - gross * 0.105).abs() < 1e-6);
        }
    }

    #[test]
    fn test_sell_cost_zero() {
        assert!(calculate_sell_cost(0, 50, true).abs() < EPS);
        assert!(calculate_sell_cost(50, 0, false).abs() < EPS);
    }

    #[test]
    fn test_profit_example() {
        // 200 - 13 - 100
        assert!((calculate_profit(200, 100, 1, true) - 87.0).abs() < EPS);
        assert!((calculate_unit_profit(200, 100) - 87.0).abs() < EPS);
    }

    #[test]
    fn test_profit_identity() {
        for (sell, buy, qty, premium) in [(200, 100, 1, true), (850, 900, 4, false), (1, 0, 1000, true)] {
            let expected = (sell * qty) as f64 - calculate_sell_cost(sell, qty, premium) - (buy * qty) as f64;
            assert!((calculate_profit(sell, buy, qty, premium) - expected).abs() < EPS);
        }
    }

    #[test]
    fn test_profit_can_be_a_loss() {
        assert!(calculate_profit(100, 100, 1, true) < 0.0);
    }

    #[test]
    fn test_net_revenue() {
        let rates = MarketRates::STANDARD;
        assert!((rates.net_revenue(1000, 1, false) - 895.0).abs() < EPS);
    }

    #[test]
    fn test_flip_with_orders_non_premium() {
        let flip = calculate_flipping_profit(1500, 2500, 1, true, false);
        assert!((flip.gross - 1000.0).abs() < EPS);
        assert!((flip.sales_tax - 200.0).abs() < EPS);
        assert!((flip.buy_order_fee - 37.5).abs() < EPS);
        assert!((flip.sell_order_fee - 62.5).abs() < EPS);
        assert!((flip.net - 700.0).abs() < EPS);
    }

    #[test]
    fn test_flip_variants() {
        assert!((calculate_flipping_profit(1500, 2500, 1, true, true).net - 800.0).abs() < EPS);
        assert!((calculate_flipping_profit(1500, 2500, 1, false, false).net - 800.0).abs() < EPS);

        let best = calculate_flipping_profit(1500, 2500, 1, false, true);
        assert!((best.net - 900.0).abs() < EPS);
        assert!(best.order_fees.abs() < EPS);
        assert!((best.margin - 60.0).abs() < EPS);
    }

    #[test]
    fn test_flip_free_item_has_no_margin() {
        let flip = calculate_flipping_profit(0, 100, 1, true, true);
        assert!(flip.margin.abs() < EPS);
        assert!(flip.net > 0.0);
    }

    #[test]
    fn test_custom_rates() {
        let rates = MarketRates {
            setup_fee: 0.0,
            premium_tax: 0.1,
            non_premium_tax: 0.2,
        };
        assert!((rates.sell_cost(100, 1, true) - 10.0).abs() < EPS);
        assert!((rates.sell_cost(100, 1, false) - 20.0).abs() < EPS);
    }
}
