//! Individual deduction steps.
//!
//! Each function performs one stage of the deduction pipeline and
//! records it as an [`AuditStep`]. The order they are applied in lives in
//! [`pipeline`](super::pipeline).

use rust_decimal::Decimal;

use super::rounding::{round_currency, round_whole};
use crate::models::AuditStep;

/// A single derived amount with the audit step that produced it.
#[derive(Debug, Clone)]
pub struct DeductionStep {
    /// The derived amount in DKK.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Income tax together with the base it was levied on.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// Salary after pension and AM-bidrag, less the personal deduction.
    pub income_tax_base: Decimal,
    /// A-skat, whole kroner.
    pub income_tax: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Net salary after the optional other-tax deduction.
#[derive(Debug, Clone)]
pub struct OtherTaxResult {
    /// Other tax, whole kroner.
    pub other_tax_amount: Decimal,
    /// Net salary after other tax.
    pub net_salary: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn step(
    step_number: u32,
    rule_id: &str,
    rule_name: &str,
    input: serde_json::Value,
    output: serde_json::Value,
    reasoning: String,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input,
        output,
        reasoning,
    }
}

/// Subtracts the ATP contribution from gross salary, floored at zero.
pub fn deduct_pension(gross_salary: Decimal, pension: Decimal, step_number: u32) -> DeductionStep {
    let amount = (gross_salary - pension).max(Decimal::ZERO);

    DeductionStep {
        amount,
        audit_step: step(
            step_number,
            "salary_after_pension",
            "Salary After ATP",
            serde_json::json!({
                "gross_salary": gross_salary.to_string(),
                "pension_contribution": pension.normalize().to_string()
            }),
            serde_json::json!({ "salary_after_pension": amount.to_string() }),
            format!("max(0, {} - {}) = {}", gross_salary, pension.normalize(), amount),
        ),
    }
}

/// AM-bidrag: `round(salary_after_pension * rate)` to whole kroner.
///
/// # Examples
///
/// ```
/// use dk_wage_engine::calculation::calculate_labor_market_contribution;
/// use rust_decimal::Decimal;
///
/// let result = calculate_labor_market_contribution(Decimal::new(9534, 0), Decimal::new(8, 2), 1);
/// assert_eq!(result.amount, Decimal::new(763, 0));
/// ```
pub fn calculate_labor_market_contribution(
    salary_after_pension: Decimal,
    rate: Decimal,
    step_number: u32,
) -> DeductionStep {
    let exact = salary_after_pension * rate;
    let amount = round_whole(exact);

    DeductionStep {
        amount,
        audit_step: step(
            step_number,
            "labor_market_contribution",
            "AM-bidrag",
            serde_json::json!({
                "salary_after_pension": salary_after_pension.to_string(),
                "rate": rate.normalize().to_string()
            }),
            serde_json::json!({ "labor_market_contribution": amount.to_string() }),
            format!(
                "{} x {} = {}, rounded to {}",
                salary_after_pension,
                rate.normalize(),
                exact.normalize(),
                amount
            ),
        ),
    }
}

/// A-skat on salary after pension and AM-bidrag, less the personal deduction.
///
/// The base is floored at zero before the rate is applied.
pub fn calculate_income_tax(
    salary_after_pension: Decimal,
    labor_market_contribution: Decimal,
    personal_deduction: Decimal,
    rate: Decimal,
    step_number: u32,
) -> IncomeTaxResult {
    let income_tax_base =
        (salary_after_pension - labor_market_contribution - personal_deduction).max(Decimal::ZERO);
    let exact = income_tax_base * rate;
    let income_tax = round_whole(exact);

    let audit_step = step(
        step_number,
        "income_tax",
        "A-skat",
        serde_json::json!({
            "salary_after_pension": salary_after_pension.to_string(),
            "labor_market_contribution": labor_market_contribution.to_string(),
            "personal_deduction": personal_deduction.normalize().to_string(),
            "rate": rate.normalize().to_string()
        }),
        serde_json::json!({
            "income_tax_base": income_tax_base.normalize().to_string(),
            "income_tax": income_tax.to_string()
        }),
        format!(
            "max(0, {} - {} - {}) = {}; x {} = {}, rounded to {}",
            salary_after_pension,
            labor_market_contribution,
            personal_deduction.normalize(),
            income_tax_base.normalize(),
            rate.normalize(),
            exact.normalize(),
            income_tax
        ),
    );

    IncomeTaxResult {
        income_tax_base,
        income_tax,
        audit_step,
    }
}

/// Sums pension, AM-bidrag and A-skat, capped so tax never exceeds gross.
pub fn calculate_total_tax(
    gross_salary: Decimal,
    pension: Decimal,
    labor_market_contribution: Decimal,
    income_tax: Decimal,
    step_number: u32,
) -> DeductionStep {
    let uncapped = round_whole(pension) + labor_market_contribution + income_tax;
    let amount = uncapped.min(gross_salary);
    let capped = amount < uncapped;

    let reasoning = if capped {
        format!(
            "{} + {} + {} = {} exceeds gross {}; capped at gross",
            round_whole(pension),
            labor_market_contribution,
            income_tax,
            uncapped,
            gross_salary
        )
    } else {
        format!(
            "{} + {} + {} = {}",
            round_whole(pension),
            labor_market_contribution,
            income_tax,
            uncapped
        )
    };

    DeductionStep {
        amount,
        audit_step: step(
            step_number,
            "total_tax",
            "Total Tax",
            serde_json::json!({
                "gross_salary": gross_salary.to_string(),
                "pension_contribution": pension.normalize().to_string(),
                "labor_market_contribution": labor_market_contribution.to_string(),
                "income_tax": income_tax.to_string()
            }),
            serde_json::json!({
                "total_tax": amount.normalize().to_string(),
                "capped": capped
            }),
            reasoning,
        ),
    }
}

/// Net salary: `round(gross - total_tax)` to øre.
pub fn calculate_net_salary(gross_salary: Decimal, total_tax: Decimal, step_number: u32) -> DeductionStep {
    let amount = round_currency(gross_salary - total_tax);

    DeductionStep {
        amount,
        audit_step: step(
            step_number,
            "net_salary",
            "Net Salary",
            serde_json::json!({
                "gross_salary": gross_salary.to_string(),
                "total_tax": total_tax.normalize().to_string()
            }),
            serde_json::json!({ "net_salary": amount.to_string() }),
            format!("{} - {} = {}", gross_salary, total_tax.normalize(), amount),
        ),
    }
}

/// Deducts other tax (church tax or similar) from net salary.
///
/// Nothing is deducted when `percent` is zero. The deduction is whole
/// kroner and never exceeds the net salary it is taken from.
pub fn apply_other_tax(net_salary: Decimal, percent: Decimal, step_number: u32) -> OtherTaxResult {
    let other_tax_amount = if percent > Decimal::ZERO {
        round_whole(net_salary * percent / Decimal::ONE_HUNDRED).min(net_salary)
    } else {
        Decimal::ZERO
    };
    let remaining = net_salary - other_tax_amount;

    let reasoning = if percent > Decimal::ZERO {
        format!(
            "{}% of {} = {}; net {} - {} = {}",
            percent.normalize(),
            net_salary,
            other_tax_amount.normalize(),
            net_salary,
            other_tax_amount.normalize(),
            remaining
        )
    } else {
        "No other tax percentage given".to_string()
    };

    let audit_step = step(
        step_number,
        "other_tax",
        "Other Tax",
        serde_json::json!({
            "net_salary": net_salary.to_string(),
            "other_tax_percent": percent.normalize().to_string()
        }),
        serde_json::json!({
            "other_tax_amount": other_tax_amount.normalize().to_string(),
            "net_salary": remaining.to_string()
        }),
        reasoning,
    );

    OtherTaxResult {
        other_tax_amount,
        net_salary: remaining,
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
    fn test_deduct_pension_floors_at_zero() {
        assert_eq!(deduct_pension(dec("9600.00"), dec("66"), 1).amount, dec("9534"));
        assert_eq!(deduct_pension(dec("20.00"), dec("33"), 1).amount, Decimal::ZERO);
    }

    #[test]
    fn test_labor_market_contribution_rounds_to_whole_kroner() {
        let result = calculate_labor_market_contribution(dec("5625.00"), dec("0.08"), 1);
        assert_eq!(result.amount, dec("450"));

        let result = calculate_labor_market_contribution(dec("9534.00"), dec("0.08"), 1);
        assert_eq!(result.amount, dec("763"));
        assert_eq!(result.audit_step.rule_id, "labor_market_contribution");
    }

    #[test]
    fn test_income_tax_base_floored_by_deduction() {
        let result = calculate_income_tax(dec("5625.00"), dec("450"), dec("5207"), dec("0.38"), 1);
        assert_eq!(result.income_tax_base, Decimal::ZERO);
        assert_eq!(result.income_tax, Decimal::ZERO);
    }

    #[test]
    fn test_income_tax_rounds_to_whole_kroner() {
        let result = calculate_income_tax(dec("9534.00"), dec("763"), dec("5207"), dec("0.38"), 1);
        assert_eq!(result.income_tax_base, dec("3564"));
        // 3564 x 0.38 = 1354.32
        assert_eq!(result.income_tax, dec("1354"));
    }

    #[test]
    fn test_total_tax_sums_components() {
        let result = calculate_total_tax(dec("9600.00"), dec("66"), dec("763"), dec("1354"), 1);
        assert_eq!(result.amount, dec("2183"));
        assert_eq!(result.audit_step.output["capped"].as_bool().unwrap(), false);
    }

    #[test]
    fn test_total_tax_capped_at_gross() {
        // 3.00 gross with 33 ATP
        let result = calculate_total_tax(dec("3.00"), dec("33"), Decimal::ZERO, Decimal::ZERO, 1);
        assert_eq!(result.amount, dec("3.00"));
        assert_eq!(result.audit_step.output["capped"].as_bool().unwrap(), true);
        assert!(result.audit_step.reasoning.contains("capped"));
    }

    #[test]
    fn test_net_salary() {
        let result = calculate_net_salary(dec("9600.00"), dec("2183"), 1);
        assert_eq!(result.amount, dec("7417.00"));
        assert_eq!(result.audit_step.output["net_salary"].as_str().unwrap(), "7417.00");
    }

    #[test]
    fn test_other_tax_applied() {
        let result = apply_other_tax(dec("7417.00"), dec("0.7"), 1);
        // 7417 x 0.007 = 51.919
        assert_eq!(result.other_tax_amount, dec("52"));
        assert_eq!(result.net_salary, dec("7365.00"));
    }

    #[test]
    fn test_zero_other_tax_percent_deducts_nothing() {
        let result = apply_other_tax(dec("5175.00"), Decimal::ZERO, 1);
        assert_eq!(result.other_tax_amount, Decimal::ZERO);
        assert_eq!(result.net_salary, dec("5175.00"));
        assert!(result.audit_step.reasoning.contains("No other tax"));
    }

    #[test]
    fn test_other_tax_never_exceeds_net() {
        // round(0.60) = 1 would leave a negative net
        let result = apply_other_tax(dec("0.60"), dec("100"), 1);
        assert_eq!(result.other_tax_amount, dec("0.60"));
        assert_eq!(result.net_salary, Decimal::ZERO);
    }
}
