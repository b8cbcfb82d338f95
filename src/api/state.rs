//! Application state for the wage engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculator::WageCalculator;
use crate::config::{EngineConfig, ProviderKind};
use crate::error::EngineResult;
use crate::rates::{ExchangeRateProvider, HttpRateProvider, StaticRateProvider};

/// Shared application state.
///
/// Holds the loaded configuration and a calculator bound to the
/// configured exchange-rate provider. Nothing in it changes between
/// requests.
#[derive(Clone)]
pub struct AppState {
    config: Arc<EngineConfig>,
    calculator: WageCalculator,
}

impl AppState {
    /// Creates state with an explicit rate provider.
    pub fn new(config: EngineConfig, provider: Arc<dyn ExchangeRateProvider>) -> Self {
        let calculator =
            WageCalculator::new(config.rates().clone(), config.validation_policy(), provider);
        Self {
            config: Arc::new(config),
            calculator,
        }
    }

    /// Creates state with the provider selected in `exchange.yaml`.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        let provider: Arc<dyn ExchangeRateProvider> = match config.exchange().provider {
            ProviderKind::Http => Arc::new(HttpRateProvider::from_config(config.exchange())?),
            ProviderKind::Offline => Arc::new(StaticRateProvider::unavailable()),
        };
        Ok(Self::new(config, provider))
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the calculator.
    pub fn calculator(&self) -> &WageCalculator {
        &self.calculator
    }
}
