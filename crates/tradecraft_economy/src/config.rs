//! # Rate Configuration
//!
//! Optional TOML overrides for the constants in [`crate::constants`],
//! loaded once at startup. Every field defaults to its constant, so an empty
//! file is the standard configuration.
//!
//! ```toml
//! [market]
//! setup_fee = 0.025
//! premium_tax = 0.04
//! non_premium_tax = 0.08
//!
//! [return_rates]
//! royal_city_with_bonus = 0.248
//!
//! [focus]
//! halving_points = 10000.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{RRR_BZ_HO_BASE, RRR_ISLAND, RRR_ROYAL_NO_BONUS, RRR_ROYAL_WITH_BONUS};
use crate::error::{EconomyError, EconomyResult};
use crate::focus::FocusModel;
use crate::market::MarketRates;
use crate::production::ProductionSite;

/// Resource return rate per production site.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReturnRates {
    /// Island production.
    pub island: f64,
    /// Royal city without bonus.
    pub royal_city: f64,
    /// Royal city with bonus.
    pub royal_city_with_bonus: f64,
    /// Black-zone hideout.
    pub black_zone_hideout: f64,
}

impl ReturnRates {
    /// The rates baked into [`crate::constants`].
    pub const STANDARD: Self = Self {
        island: RRR_ISLAND,
        royal_city: RRR_ROYAL_NO_BONUS,
        royal_city_with_bonus: RRR_ROYAL_WITH_BONUS,
        black_zone_hideout: RRR_BZ_HO_BASE,
    };

    /// Configured return rate of `site`, as a fraction.
    #[must_use]
    pub const fn for_site(&self, site: ProductionSite) -> f64 {
        match site {
            ProductionSite::Island => self.island,
            ProductionSite::RoyalCity => self.royal_city,
            ProductionSite::RoyalCityWithBonus => self.royal_city_with_bonus,
            ProductionSite::BlackZoneHideout => self.black_zone_hideout,
        }
    }
}

impl Default for ReturnRates {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Complete rate configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EconomyConfig {
    /// Marketplace rates.
    pub market: MarketRates,
    /// Return rates per production site.
    pub return_rates: ReturnRates,
    /// Focus cost model.
    pub focus: FocusModel,
}

impl EconomyConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`EconomyError::InvalidConfig`] on malformed TOML, unknown keys or
    /// out-of-range rates.
    pub fn from_toml_str(source: &str) -> EconomyResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| EconomyError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// [`EconomyError::ConfigRead`] when the file cannot be read, otherwise
    /// as [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> EconomyResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| EconomyError::ConfigRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!(path = %path.display(), "loaded economy config");
        tracing::debug!(?config, "economy rates");
        Ok(config)
    }

    /// Serializes back to TOML.
    ///
    /// # Errors
    ///
    /// [`EconomyError::InvalidConfig`] if serialization fails.
    pub fn to_toml_string(&self) -> EconomyResult<String> {
        toml::to_string(self).map_err(|e| EconomyError::InvalidConfig(e.to_string()))
    }

    /// Checks every rate is a finite fraction in `[0, 1]` and the focus
    /// halving rate is positive.
    ///
    /// # Errors
    ///
    /// [`EconomyError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> EconomyResult<()> {
        let fractions = [
            ("market.setup_fee", self.market.setup_fee),
            ("market.premium_tax", self.market.premium_tax),
            ("market.non_premium_tax", self.market.non_premium_tax),
            ("return_rates.island", self.return_rates.island),
            ("return_rates.royal_city", self.return_rates.royal_city),
            ("return_rates.royal_city_with_bonus", self.return_rates.royal_city_with_bonus),
            ("return_rates.black_zone_hideout", self.return_rates.black_zone_hideout),
        ];
        for (name, value) in fractions {
            if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
                return Err(EconomyError::InvalidConfig(format!(
                    "{name} must be a fraction in [0, 1], got {value}"
                )));
            }
        }

        let halving = self.focus.halving_points;
        if !(halving.is_finite() && halving > 0.0) {
            return Err(EconomyError::InvalidConfig(format!(
                "focus.halving_points must be positive, got {halving}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_standard() {
        let config = EconomyConfig::from_toml_str("").expect("empty config");
        assert_eq!(config, EconomyConfig::default());
        assert_eq!(config.market, MarketRates::STANDARD);
        assert_eq!(config.return_rates, ReturnRates::STANDARD);
        assert_eq!(config.focus, FocusModel::STANDARD);
    }

    #[test]
    fn test_partial_override() {
        let config = EconomyConfig::from_toml_str(
            r"
            [market]
            premium_tax = 0.03

            [return_rates]
            black_zone_hideout = 0.35
            ",
        )
        .expect("valid config");

        assert!((config.market.premium_tax - 0.03).abs() < 1e-12);
        assert!((config.market.setup_fee - 0.025).abs() < 1e-12);
        assert!((config.return_rates.for_site(ProductionSite::BlackZoneHideout) - 0.35).abs() < 1e-12);
        assert!((config.return_rates.for_site(ProductionSite::RoyalCity) - 0.152).abs() < 1e-12);
    }

    #[test]
    fn test_rate_out_of_range() {
        let err = EconomyConfig::from_toml_str("[market]\nsetup_fee = 1.5\n").unwrap_err();
        assert!(matches!(err, EconomyError::InvalidConfig(msg) if msg.contains("market.setup_fee")));
    }

    #[test]
    fn test_non_positive_halving() {
        let err = EconomyConfig::from_toml_str("[focus]\nhalving_points = 0.0\n").unwrap_err();
        assert!(matches!(err, EconomyError::InvalidConfig(msg) if msg.contains("halving_points")));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(EconomyConfig::from_toml_str("[market]\nlisting_fee = 0.1\n").is_err());
        assert!(EconomyConfig::from_toml_str("[weather]\n").is_err());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            EconomyConfig::from_toml_str("[market"),
            Err(EconomyError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EconomyConfig::default();
        let text = config.to_toml_string().expect("serializable");
        assert_eq!(EconomyConfig::from_toml_str(&text), Ok(config));
    }

    #[test]
    fn test_missing_file() {
        let err = EconomyConfig::load("/definitely/not/here/economy.toml").unwrap_err();
        assert!(matches!(err, EconomyError::ConfigRead { .. }));
    }
}
