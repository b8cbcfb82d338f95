//! Calculation logic for the wage engine.
//!
//! This module contains the deduction pipeline for a Danish hourly wage
//! earner: quarter-hour rounding of worked time, the tiered ATP pension,
//! gross salary, AM-bidrag, A-skat, the total-tax cap, net salary and the
//! optional other tax. Holiday pay and currency conversion build on the
//! pipeline result, and input normalisation turns raw form text into a
//! validated [`WageInput`](crate::models::WageInput).

mod conversion;
mod deductions;
mod gross;
mod holiday_pay;
mod hours;
mod normalize;
mod pension;
mod pipeline;
pub mod rounding;

pub use conversion::{ConversionCalculation, calculate_conversion, convert};
pub use deductions::{
    DeductionStep, IncomeTaxResult, OtherTaxResult, apply_other_tax, calculate_income_tax,
    calculate_labor_market_contribution, calculate_net_salary, calculate_total_tax,
    deduct_pension,
};
pub use gross::{GrossResult, calculate_gross};
pub use holiday_pay::{HolidayPayCalculation, calculate_holiday_pay, compute_holiday};
pub use hours::{HoursResult, calculate_hours};
pub use normalize::normalize_input;
pub use pension::{PensionResult, calculate_pension, pension_for_hours, tiered_pension};
pub use pipeline::{PipelineOutcome, calculate_wage, compute, compute_with};
