//! Gross salary calculation.

use rust_decimal::Decimal;

use super::rounding::round_currency;
use crate::models::AuditStep;

/// Gross salary before and after tips.
#[derive(Debug, Clone)]
pub struct GrossResult {
    /// `total_hours * hourly_rate`, rounded to øre.
    pub base_gross_salary: Decimal,
    /// Base gross plus tips, rounded to øre.
    pub gross_salary: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes gross salary from paid hours, hourly rate and tips.
///
/// # Examples
///
/// ```
/// use dk_wage_engine::calculation::calculate_gross;
/// use rust_decimal::Decimal;
///
/// let result = calculate_gross(Decimal::new(375, 1), Decimal::new(150, 0), Decimal::ZERO, 1);
/// assert_eq!(result.gross_salary, Decimal::new(562500, 2));
/// ```
pub fn calculate_gross(
    total_hours: Decimal,
    hourly_rate: Decimal,
    tip: Decimal,
    step_number: u32,
) -> GrossResult {
    let base_gross_salary = round_currency(total_hours * hourly_rate);
    let gross_salary = round_currency(base_gross_salary + tip);

    let audit_step = AuditStep {
        step_number,
        rule_id: "gross_salary".to_string(),
        rule_name: "Gross Salary".to_string(),
        input: serde_json::json!({
            "total_hours": total_hours.normalize().to_string(),
            "hourly_rate": hourly_rate.normalize().to_string(),
            "tip": tip.normalize().to_string()
        }),
        output: serde_json::json!({
            "base_gross_salary": base_gross_salary.to_string(),
            "gross_salary": gross_salary.to_string()
        }),
        reasoning: format!(
            "{} hours x {} DKK = {} DKK, plus {} DKK tips = {} DKK",
            total_hours.normalize(),
            hourly_rate.normalize(),
            base_gross_salary,
            tip.normalize(),
            gross_salary
        ),
    };

    GrossResult {
        base_gross_salary,
        gross_salary,
        audit_step,
    }
}
