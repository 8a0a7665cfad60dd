//! Settlement configuration.
//!
//! Everything has a sensible default, so most callers use
//! [`SettlementConfig::default`]. The CLI can load overrides from a JSON
//! file where any missing field falls back to its default:
//!
//! ```json
//! { "tolerance": "0.000001", "display_scale": 2, "currency_symbol": "₹" }
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Largest scale a `Decimal` can carry.
const MAX_SCALE: u32 = 28;

/// Errors arising from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tolerance must not be negative, got {0}")]
    NegativeTolerance(Decimal),
    #[error("display scale {0} exceeds the maximum of 28")]
    ScaleTooLarge(u32),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunables for balance computation and presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    /// Remaining amounts at or below this magnitude count as zero.
    pub tolerance: Decimal,
    /// Decimal places shown when presenting amounts.
    pub display_scale: u32,
    /// Printed in front of presented amounts (e.g. "$" or "₹").
    pub currency_symbol: String,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            tolerance: Decimal::new(1, 9),
            display_scale: 2,
            currency_symbol: String::new(),
        }
    }
}

impl SettlementConfig {
    pub fn with_tolerance(mut self, tolerance: Decimal) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_display_scale(mut self, scale: u32) -> Self {
        self.display_scale = scale;
        self
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Tolerance as the engine applies it. A negative value, which
    /// `validate` would reject, is treated as zero.
    pub fn effective_tolerance(&self) -> Decimal {
        self.tolerance.max(Decimal::ZERO)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tolerance < Decimal::ZERO {
            return Err(ConfigError::NegativeTolerance(self.tolerance));
        }
        if self.display_scale > MAX_SCALE {
            return Err(ConfigError::ScaleTooLarge(self.display_scale));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Round `amount` to the display scale and prefix the currency symbol.
    ///
    /// Rounding happens here only; computation keeps full precision.
    pub fn format_amount(&self, amount: Decimal) -> String {
        let scale = self.display_scale.min(MAX_SCALE);
        let mut shown = amount.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
        shown.rescale(scale);
        format!("{}{}", self.currency_symbol, shown)
    }
}
