//! End-to-end calculation: raw input in, [`Calculation`] record out.
//!
//! [`WageCalculator`] normalises the raw text, runs the deduction pipeline,
//! adds holiday pay and projects the result into another currency when
//! asked to. Rate problems are recorded as warnings in the audit trace and
//! never fail the calculation.

use std::sync::Arc;
use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{calculate_conversion, calculate_wage, normalize_input};
use crate::config::DeductionRates;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditWarning, Calculation, Currency, RawWageInput, ValidationPolicy};
use crate::rates::{ExchangeRateProvider, resolve_rate};

/// Currency projection requested alongside a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// Target currency.
    pub currency: Currency,
    /// Rate to use when the provider is bypassed or fails.
    #[serde(default)]
    pub manual_rate: Option<Decimal>,
    /// Skip the provider and use `manual_rate` directly.
    #[serde(default)]
    pub prefer_manual: bool,
    /// Sum holiday pay into the converted amounts.
    #[serde(default)]
    pub include_holiday_pay: bool,
}

impl ConversionOptions {
    /// Converts into `currency` using the provider rate.
    pub fn to(currency: Currency) -> Self {
        Self {
            currency,
            manual_rate: None,
            prefer_manual: false,
            include_holiday_pay: false,
        }
    }
}

/// Per-call options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationOptions {
    /// Overrides the calculator's default validation policy.
    #[serde(default)]
    pub policy: Option<ValidationPolicy>,
    /// Compute holiday pay.
    #[serde(default)]
    pub include_holiday_pay: bool,
    /// Project the result into another currency.
    #[serde(default)]
    pub conversion: Option<ConversionOptions>,
}

/// Runs complete calculations against a fixed rate set and rate provider.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use dk_wage_engine::calculator::{CalculationOptions, WageCalculator};
/// use dk_wage_engine::config::DeductionRates;
/// use dk_wage_engine::models::{RawWageInput, ValidationPolicy};
/// use dk_wage_engine::rates::StaticRateProvider;
///
/// let calculator = WageCalculator::new(
///     DeductionRates::default(),
///     ValidationPolicy::Strict,
///     Arc::new(StaticRateProvider::unavailable()),
/// );
/// let raw = RawWageInput {
///     hours_worked: "37".to_string(),
///     minutes_worked: "30".to_string(),
///     hourly_rate: "150".to_string(),
///     personal_deduction: "5207".to_string(),
///     ..RawWageInput::default()
/// };
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// let calc = runtime
///     .block_on(calculator.calculate(&raw, &CalculationOptions::default()))
///     .unwrap();
/// assert_eq!(calc.wage.net_salary.to_string(), "5175.00");
/// ```
#[derive(Clone)]
pub struct WageCalculator {
    rates: DeductionRates,
    default_policy: ValidationPolicy,
    provider: Arc<dyn ExchangeRateProvider>,
}

impl WageCalculator {
    /// Creates a calculator.
    pub fn new(
        rates: DeductionRates,
        default_policy: ValidationPolicy,
        provider: Arc<dyn ExchangeRateProvider>,
    ) -> Self {
        Self {
            rates,
            default_policy,
            provider,
        }
    }

    /// The deduction rates in use.
    pub fn rates(&self) -> &DeductionRates {
        &self.rates
    }

    /// The rate provider in use.
    pub fn provider(&self) -> &dyn ExchangeRateProvider {
        self.provider.as_ref()
    }

    /// Runs a complete calculation.
    ///
    /// Fails only on invalid input. A rate that cannot be resolved leaves
    /// `conversion` empty and adds a `RATE_UNAVAILABLE` or
    /// `INVALID_MANUAL_RATE` warning.
    ///
    /// `holiday_pay` is filled only when `options.include_holiday_pay` is set,
    /// even if the conversion summed holiday pay into its amounts.
    pub async fn calculate(
        &self,
        raw: &RawWageInput,
        options: &CalculationOptions,
    ) -> EngineResult<Calculation> {
        let start_time = Instant::now();
        let policy = options.policy.unwrap_or(self.default_policy);
        let input = normalize_input(raw, policy)?;

        let conversion_needs_holiday = options
            .conversion
            .as_ref()
            .is_some_and(|c| c.include_holiday_pay);
        let mut calc = calculate_wage(
            &input,
            &self.rates,
            options.include_holiday_pay || conversion_needs_holiday,
        );

        if let Some(conversion) = &options.conversion {
            let resolved = resolve_rate(
                self.provider.as_ref(),
                conversion.currency,
                conversion.manual_rate,
                conversion.prefer_manual,
            )
            .await;

            match resolved {
                Ok(rate) => {
                    let holiday = calc
                        .holiday_pay
                        .as_ref()
                        .filter(|_| conversion.include_holiday_pay);
                    let step_number = calc.audit_trace.steps.len() as u32 + 1;
                    let converted = calculate_conversion(&calc.wage, holiday, rate, step_number);
                    calc.audit_trace.steps.push(converted.audit_step);
                    calc.conversion = Some(converted.outcome);
                }
                Err(error) => calc.audit_trace.warnings.push(rate_warning(&error)),
            }
        }

        if !options.include_holiday_pay {
            calc.holiday_pay = None;
        }

        calc.audit_trace.duration_us = start_time.elapsed().as_micros() as u64;
        Ok(calc)
    }
}

fn rate_warning(error: &EngineError) -> AuditWarning {
    let code = match error {
        EngineError::InvalidManualRate { .. } => "INVALID_MANUAL_RATE",
        _ => "RATE_UNAVAILABLE",
    };
    AuditWarning::new(code, error.to_string(), "medium")
}
