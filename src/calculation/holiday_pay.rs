//! Holiday pay (feriepenge) sub-pipeline.
//!
//! Holiday pay is 12.5% of the base gross salary (tips excluded), taxed
//! through a shortened pipeline: AM-bidrag, then A-skat on the remainder.
//! No ATP and no personal deduction apply.
//!
//! Unlike the main pipeline the income-tax base is not floored at zero.
//! With a non-negative holiday gross the base cannot go negative, since
//! AM-bidrag rounds to at most the amount it is levied on.

use rust_decimal::Decimal;

use super::rounding::{round_currency, round_whole};
use crate::config::DeductionRates;
use crate::models::{AuditStep, HolidayPayResult};

/// Holiday pay with the audit step that produced it.
#[derive(Debug, Clone)]
pub struct HolidayPayCalculation {
    /// The holiday pay breakdown.
    pub result: HolidayPayResult,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Holiday pay for `base_gross_salary` under statutory rates.
///
/// # Examples
///
/// ```
/// use dk_wage_engine::calculation::compute_holiday;
/// use rust_decimal::Decimal;
///
/// let holiday = compute_holiday(Decimal::new(562500, 2));
/// assert_eq!(holiday.holiday_gross, Decimal::new(70313, 2));
/// assert_eq!(holiday.holiday_net, Decimal::new(40113, 2));
/// ```
pub fn compute_holiday(base_gross_salary: Decimal) -> HolidayPayResult {
    calculate_holiday_pay(base_gross_salary, &DeductionRates::default(), 1).result
}

/// Holiday pay for `base_gross_salary` under `rates`.
pub fn calculate_holiday_pay(
    base_gross_salary: Decimal,
    rates: &DeductionRates,
    step_number: u32,
) -> HolidayPayCalculation {
    let holiday_gross = round_currency(base_gross_salary * rates.holiday_pay_rate);
    let labor_market_contribution = round_whole(holiday_gross * rates.labor_market_rate);
    let income_tax_base = holiday_gross - labor_market_contribution;
    let income_tax = round_whole(income_tax_base * rates.income_tax_rate);
    let holiday_net = round_currency(holiday_gross - labor_market_contribution - income_tax);

    let audit_step = AuditStep {
        step_number,
        rule_id: "holiday_pay".to_string(),
        rule_name: "Holiday Pay".to_string(),
        input: serde_json::json!({
            "base_gross_salary": base_gross_salary.to_string(),
            "holiday_pay_rate": rates.holiday_pay_rate.normalize().to_string(),
            "labor_market_rate": rates.labor_market_rate.normalize().to_string(),
            "income_tax_rate": rates.income_tax_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "holiday_gross": holiday_gross.to_string(),
            "labor_market_contribution": labor_market_contribution.to_string(),
            "income_tax_base": income_tax_base.to_string(),
            "income_tax": income_tax.to_string(),
            "holiday_net": holiday_net.to_string()
        }),
        reasoning: format!(
            "{} x {} = {}; AM-bidrag {}, A-skat {}; net {}",
            base_gross_salary,
            rates.holiday_pay_rate.normalize(),
            holiday_gross,
            labor_market_contribution,
            income_tax,
            holiday_net
        ),
    };

    HolidayPayCalculation {
        result: HolidayPayResult {
            base_gross_salary,
            holiday_gross,
            labor_market_contribution,
            income_tax_base,
            income_tax,
            holiday_net,
        },
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_holiday_scenario() {
        let holiday = compute_holiday(dec("5625.00"));

        assert_eq!(holiday.holiday_gross, dec("703.13"));
        assert_eq!(holiday.labor_market_contribution, dec("56"));
        assert_eq!(holiday.income_tax_base, dec("647.13"));
        assert_eq!(holiday.income_tax, dec("246"));
        assert_eq!(holiday.holiday_net, dec("401.13"));
    }

    #[test]
    fn test_holiday_on_zero_gross() {
        let holiday = compute_holiday(Decimal::ZERO);
        assert_eq!(holiday.holiday_gross, Decimal::ZERO);
        assert_eq!(holiday.holiday_net, Decimal::ZERO);
    }

    #[test]
    fn test_holiday_tax_base_not_negative_for_tiny_amounts() {
        let holiday = compute_holiday(dec("0.04"));
        // 0.04 x 0.125 = 0.005 -> 0.01; AM-bidrag round(0.0008) = 0
        assert_eq!(holiday.holiday_gross, dec("0.01"));
        assert_eq!(holiday.income_tax_base, dec("0.01"));
        assert_eq!(holiday.holiday_net, dec("0.01"));
    }

    #[test]
    fn test_holiday_audit_step() {
        let calc = calculate_holiday_pay(dec("9600.00"), &DeductionRates::default(), 10);

        // 9600 x 0.125 = 1200; AM 96; A-skat round(1104 x 0.38 = 419.52) = 420
        assert_eq!(calc.result.holiday_gross, dec("1200.00"));
        assert_eq!(calc.result.labor_market_contribution, dec("96"));
        assert_eq!(calc.result.income_tax, dec("420"));
        assert_eq!(calc.result.holiday_net, dec("684.00"));
        assert_eq!(calc.audit_step.step_number, 10);
        assert_eq!(
            calc.audit_step.output["holiday_net"].as_str().unwrap(),
            "684.00"
        );
    }
}
