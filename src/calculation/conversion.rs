//! Currency projection of the headline salary figures.
//!
//! Conversion is plain multiplication by an already-resolved DKK→target
//! rate. Where that rate comes from is the concern of [`crate::rates`].

use crate::models::{
    AuditStep, ConversionOutcome, ConversionResult, ExchangeRate, HolidayPayResult, ResolvedRate,
    SalaryAmounts, WageResult,
};

/// Multiplies each amount by `rate`.
///
/// # Examples
///
/// ```
/// use dk_wage_engine::calculation::convert;
/// use dk_wage_engine::models::{ExchangeRate, SalaryAmounts};
/// use rust_decimal::Decimal;
///
/// let amounts = SalaryAmounts {
///     gross: Decimal::new(1000, 0),
///     tax: Decimal::new(300, 0),
///     net: Decimal::new(700, 0),
/// };
/// let rate = ExchangeRate::manual(Decimal::new(134, 3)).unwrap();
/// let converted = convert(&amounts, rate);
///
/// assert_eq!(converted.gross_converted, Decimal::new(134, 0));
/// assert_eq!(converted.net_converted, Decimal::new(938, 1));
/// ```
pub fn convert(amounts: &SalaryAmounts, rate: ExchangeRate) -> ConversionResult {
    let multiplier = rate.value();
    ConversionResult {
        gross_converted: amounts.gross * multiplier,
        net_converted: amounts.net * multiplier,
        tax_converted: amounts.tax * multiplier,
    }
}

/// A conversion outcome with the audit step that produced it.
#[derive(Debug, Clone)]
pub struct ConversionCalculation {
    /// The conversion section of the calculation record.
    pub outcome: ConversionOutcome,
    /// The audit step recording this conversion.
    pub audit_step: AuditStep,
}

/// Projects a wage result, optionally summed with holiday pay, into the
/// resolved currency.
pub fn calculate_conversion(
    wage: &WageResult,
    holiday_pay: Option<&HolidayPayResult>,
    rate: ResolvedRate,
    step_number: u32,
) -> ConversionCalculation {
    let base = SalaryAmounts::from_wage(wage);
    let amounts = match holiday_pay {
        Some(holiday) => base.with_holiday(holiday),
        None => base,
    };
    let converted = convert(&amounts, rate.rate);

    let audit_step = AuditStep {
        step_number,
        rule_id: "currency_conversion".to_string(),
        rule_name: "Currency Conversion".to_string(),
        input: serde_json::json!({
            "gross": amounts.gross.to_string(),
            "tax": amounts.tax.to_string(),
            "net": amounts.net.to_string(),
            "includes_holiday_pay": holiday_pay.is_some()
        }),
        output: serde_json::json!({
            "currency": rate.currency.code(),
            "rate": rate.rate.value().normalize().to_string(),
            "source": rate.source,
            "gross_converted": converted.gross_converted.round_dp(2).to_string(),
            "net_converted": converted.net_converted.round_dp(2).to_string(),
            "tax_converted": converted.tax_converted.round_dp(2).to_string()
        }),
        reasoning: format!(
            "1 DKK = {} {} ({:?} rate)",
            rate.rate.value().normalize(),
            rate.currency,
            rate.source
        ),
    };

    ConversionCalculation {
        outcome: ConversionOutcome {
            rate,
            includes_holiday_pay: holiday_pay.is_some(),
            amounts,
            converted,
        },
        audit_step,
    }
}
