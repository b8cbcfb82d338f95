//! Configuration types for the wage engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::ValidationPolicy;

/// One step of the ATP contribution table.
///
/// A tier applies from `min_hours` (inclusive) up to the next tier's
/// `min_hours` (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionTier {
    /// Lower bound of raw hours worked, inclusive.
    pub min_hours: Decimal,
    /// Contribution in DKK for this tier.
    pub amount: Decimal,
}

impl PensionTier {
    const fn new(min_hours: u32, amount: u32) -> Self {
        Self {
            min_hours: Decimal::from_parts(min_hours, 0, 0, false, 0),
            amount: Decimal::from_parts(amount, 0, 0, false, 0),
        }
    }
}

/// The statutory ATP table: 0 / 33 / 66 / 99 DKK at 0 / 39 / 78 / 117 hours.
pub const STATUTORY_PENSION_TIERS: [PensionTier; 4] = [
    PensionTier::new(0, 0),
    PensionTier::new(39, 33),
    PensionTier::new(78, 66),
    PensionTier::new(117, 99),
];

/// Rates and tables the deduction pipeline runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRates {
    /// AM-bidrag rate (0.08).
    pub labor_market_rate: Decimal,
    /// A-skat rate (0.38).
    pub income_tax_rate: Decimal,
    /// Feriepenge rate (0.125).
    pub holiday_pay_rate: Decimal,
    /// ATP table, ascending by `min_hours`, first tier at 0.
    pub pension_tiers: Vec<PensionTier>,
}

impl Default for DeductionRates {
    fn default() -> Self {
        Self {
            labor_market_rate: Decimal::new(8, 2),
            income_tax_rate: Decimal::new(38, 2),
            holiday_pay_rate: Decimal::new(125, 3),
            pension_tiers: STATUTORY_PENSION_TIERS.to_vec(),
        }
    }
}

impl DeductionRates {
    /// Checks rate ranges and tier ordering.
    pub fn validate(&self) -> EngineResult<()> {
        let rates = [
            ("labor_market_rate", self.labor_market_rate),
            ("income_tax_rate", self.income_tax_rate),
            ("holiday_pay_rate", self.holiday_pay_rate),
        ];
        for (name, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(EngineError::InvalidConfig {
                    message: format!("{} must be within [0, 1], got {}", name, rate),
                });
            }
        }

        let first = self.pension_tiers.first().ok_or_else(|| EngineError::InvalidConfig {
            message: "pension_tiers must not be empty".to_string(),
        })?;
        if !first.min_hours.is_zero() {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "first pension tier must start at 0 hours, got {}",
                    first.min_hours
                ),
            });
        }
        for pair in self.pension_tiers.windows(2) {
            if pair[1].min_hours <= pair[0].min_hours {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "pension tiers must be strictly ascending: {} follows {}",
                        pair[1].min_hours, pair[0].min_hours
                    ),
                });
            }
        }
        if self.pension_tiers.iter().any(|t| t.amount < Decimal::ZERO) {
            return Err(EngineError::InvalidConfig {
                message: "pension tier amounts must not be negative".to_string(),
            });
        }

        Ok(())
    }
}

/// Contents of `deductions.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeductionsConfig {
    /// Pipeline rates and the pension table.
    #[serde(flatten)]
    pub rates: DeductionRates,
    /// Policy applied to text input when the caller does not pick one.
    #[serde(default)]
    pub validation_policy: ValidationPolicy,
}

/// Which exchange-rate provider backs conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Live quotes over HTTP.
    Http,
    /// No provider; conversions need a manual rate.
    Offline,
}

/// Contents of `exchange.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
    /// Provider selection.
    pub provider: ProviderKind,
    /// Quote endpoint returning `{"rates": {...}}` against USD.
    pub base_url: String,
    /// Environment variable holding the provider API key.
    pub api_key_env: String,
    /// Currency codes requested from the provider.
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_symbols() -> Vec<String> {
    ["BDT", "DKK", "USD", "EUR"].map(String::from).to_vec()
}

/// Contents of `server.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address the HTTP API binds to.
    pub bind_address: String,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    deductions: DeductionsConfig,
    exchange: ExchangeConfig,
    server: ServerConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(deductions: DeductionsConfig, exchange: ExchangeConfig, server: ServerConfig) -> Self {
        Self {
            deductions,
            exchange,
            server,
        }
    }

    /// Returns the deduction rates.
    pub fn rates(&self) -> &DeductionRates {
        &self.deductions.rates
    }

    /// Returns the default validation policy.
    pub fn validation_policy(&self) -> ValidationPolicy {
        self.deductions.validation_policy
    }

    /// Returns the exchange-rate provider configuration.
    pub fn exchange(&self) -> &ExchangeConfig {
        &self.exchange
    }

    /// Mutable access for command-line overrides.
    pub fn exchange_mut(&mut self) -> &mut ExchangeConfig {
        &mut self.exchange
    }

    /// Returns the server configuration.
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Mutable access for command-line overrides.
    pub fn server_mut(&mut self) -> &mut ServerConfig {
        &mut self.server
    }
}
