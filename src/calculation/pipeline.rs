//! The deduction pipeline.
//!
//! Runs the stages in their fixed order:
//!
//! 1. raw hours and quarter-hour rounding
//! 2. ATP tier lookup on raw hours
//! 3. gross salary (base, then tips)
//! 4. salary after ATP
//! 5. AM-bidrag
//! 6. A-skat
//! 7. total tax, capped at gross
//! 8. net salary
//! 9. other tax
//!
//! [`compute`] is the pure entry point with statutory rates;
//! [`compute_with`] takes explicit rates and returns the audit steps too.

use std::time::Instant;

use chrono::Utc;
use uuid::Uuid;

use super::deductions::{
    apply_other_tax, calculate_income_tax, calculate_labor_market_contribution,
    calculate_net_salary, calculate_total_tax, deduct_pension,
};
use super::gross::calculate_gross;
use super::holiday_pay::calculate_holiday_pay;
use super::hours::calculate_hours;
use super::pension::calculate_pension;
use crate::config::DeductionRates;
use crate::models::{AuditStep, AuditTrace, Calculation, WageInput, WageResult};

/// Pipeline output together with its audit steps.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// The wage breakdown.
    pub result: WageResult,
    /// One step per pipeline stage, in order.
    pub audit_steps: Vec<AuditStep>,
}

/// Runs the deduction pipeline with statutory rates.
///
/// # Examples
///
/// ```
/// use dk_wage_engine::calculation::compute;
/// use dk_wage_engine::models::WageInput;
/// use rust_decimal::Decimal;
///
/// let input = WageInput::new(80, 0, Decimal::new(120, 0))
///     .and_then(|i| i.with_personal_deduction(Decimal::new(5207, 0)))
///     .unwrap();
/// let result = compute(&input);
///
/// assert_eq!(result.gross_salary, Decimal::new(9600, 0));
/// assert_eq!(result.total_tax, Decimal::new(2183, 0));
/// assert_eq!(result.net_salary, Decimal::new(7417, 0));
/// ```
pub fn compute(input: &WageInput) -> WageResult {
    compute_with(input, &DeductionRates::default()).result
}

/// Runs the deduction pipeline with the given rates.
pub fn compute_with(input: &WageInput, rates: &DeductionRates) -> PipelineOutcome {
    let mut audit_steps = Vec::with_capacity(9);
    let mut step_number: u32 = 1;
    let mut next_step = || {
        let current = step_number;
        step_number += 1;
        current
    };

    let hours = calculate_hours(input.hours_worked, input.minutes_worked, next_step());
    audit_steps.push(hours.audit_step);

    let pension = calculate_pension(hours.raw_total_hours, &rates.pension_tiers, next_step());
    audit_steps.push(pension.audit_step);

    let gross = calculate_gross(hours.total_hours, input.hourly_rate, input.tip, next_step());
    audit_steps.push(gross.audit_step);

    let after_pension = deduct_pension(gross.gross_salary, pension.contribution, next_step());
    audit_steps.push(after_pension.audit_step);

    let labor_market = calculate_labor_market_contribution(
        after_pension.amount,
        rates.labor_market_rate,
        next_step(),
    );
    audit_steps.push(labor_market.audit_step);

    let income_tax = calculate_income_tax(
        after_pension.amount,
        labor_market.amount,
        input.personal_deduction,
        rates.income_tax_rate,
        next_step(),
    );
    audit_steps.push(income_tax.audit_step);

    let total_tax = calculate_total_tax(
        gross.gross_salary,
        pension.contribution,
        labor_market.amount,
        income_tax.income_tax,
        next_step(),
    );
    audit_steps.push(total_tax.audit_step);

    let net = calculate_net_salary(gross.gross_salary, total_tax.amount, next_step());
    audit_steps.push(net.audit_step);

    let other_tax = apply_other_tax(net.amount, input.other_tax_percent, next_step());
    audit_steps.push(other_tax.audit_step);

    PipelineOutcome {
        result: WageResult {
            raw_total_hours: hours.raw_total_hours,
            total_hours: hours.total_hours,
            pension_contribution: pension.contribution,
            base_gross_salary: gross.base_gross_salary,
            gross_salary: gross.gross_salary,
            salary_after_pension: after_pension.amount,
            labor_market_contribution: labor_market.amount,
            income_tax_base: income_tax.income_tax_base,
            income_tax: income_tax.income_tax,
            total_tax: total_tax.amount,
            other_tax_amount: other_tax.other_tax_amount,
            net_salary: other_tax.net_salary,
        },
        audit_steps,
    }
}

/// Runs the pipeline (and optionally holiday pay) and wraps the outcome in
/// a [`Calculation`] record without any currency projection.
pub fn calculate_wage(
    input: &WageInput,
    rates: &DeductionRates,
    include_holiday_pay: bool,
) -> Calculation {
    let start_time = Instant::now();
    let outcome = compute_with(input, rates);
    let mut steps = outcome.audit_steps;

    let holiday_pay = include_holiday_pay.then(|| {
        let holiday = calculate_holiday_pay(
            outcome.result.base_gross_salary,
            rates,
            steps.len() as u32 + 1,
        );
        steps.push(holiday.audit_step);
        holiday.result
    });

    Calculation {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        input: input.clone(),
        wage: outcome.result,
        holiday_pay,
        conversion: None,
        audit_trace: AuditTrace {
            steps,
            warnings: vec![],
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    }
}
