//! Core data models for the wage engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod calculation;
mod conversion;
mod last_result;
mod wage_input;
mod wage_result;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use calculation::Calculation;
pub use conversion::{
    ConversionOutcome, ConversionResult, Currency, ExchangeRate, MAX_RATE, RateSource, ResolvedRate,
    SalaryAmounts,
};
pub use last_result::LastResult;
pub use wage_input::{MAX_AMOUNT, MAX_MINUTES, RawWageInput, ValidationPolicy, WageInput};
pub use wage_result::{HolidayPayResult, WageResult};
