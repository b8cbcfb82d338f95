//! Configuration loading and management for the wage engine.
//!
//! This module loads the deduction rates, ATP pension table, exchange-rate
//! provider settings and server settings from YAML files. The pure
//! calculation core only needs [`DeductionRates`], whose `Default` is the
//! statutory set, so it runs without any file on disk.
//!
//! # Example
//!
//! ```no_run
//! use dk_wage_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! println!("Binding to {}", loader.config().server().bind_address);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DeductionRates, DeductionsConfig, EngineConfig, ExchangeConfig, PensionTier, ProviderKind,
    STATUTORY_PENSION_TIERS, ServerConfig,
};
