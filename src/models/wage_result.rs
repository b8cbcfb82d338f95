//! Result records of the deduction pipeline and the holiday-pay sub-pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Output of the main deduction pipeline.
///
/// Monetary values are in DKK. Gross and net salary carry two decimals;
/// the labor-market contribution, income tax and other tax are whole kroner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageResult {
    /// `hours + minutes / 60`, unrounded. Drives the pension tier.
    pub raw_total_hours: Decimal,
    /// Raw hours quantised to the nearest quarter hour. Drives pay.
    pub total_hours: Decimal,
    /// Tiered ATP contribution.
    pub pension_contribution: Decimal,
    /// `total_hours * hourly_rate`, before tips.
    pub base_gross_salary: Decimal,
    /// Base gross plus tips.
    pub gross_salary: Decimal,
    /// Gross less pension, floored at zero.
    pub salary_after_pension: Decimal,
    /// AM-bidrag.
    pub labor_market_contribution: Decimal,
    /// Amount the income tax rate is applied to.
    pub income_tax_base: Decimal,
    /// A-skat.
    pub income_tax: Decimal,
    /// Pension + AM-bidrag + A-skat, capped at gross salary.
    pub total_tax: Decimal,
    /// Church tax or similar, taken from the net salary.
    pub other_tax_amount: Decimal,
    /// Take-home pay after all deductions.
    pub net_salary: Decimal,
}

impl WageResult {
    /// Everything withheld from gross, including other tax.
    pub fn total_tax_paid(&self) -> Decimal {
        self.total_tax + self.other_tax_amount
    }
}

/// Output of the holiday-pay sub-pipeline (feriepenge).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayPayResult {
    /// The base gross salary the entitlement was derived from.
    pub base_gross_salary: Decimal,
    /// Holiday pay before tax.
    pub holiday_gross: Decimal,
    /// AM-bidrag on the holiday pay.
    pub labor_market_contribution: Decimal,
    /// Holiday gross less AM-bidrag.
    pub income_tax_base: Decimal,
    /// A-skat on the holiday pay.
    pub income_tax: Decimal,
    /// Holiday pay after tax.
    pub holiday_net: Decimal,
}

impl HolidayPayResult {
    /// AM-bidrag plus A-skat on the holiday pay.
    pub fn total_tax(&self) -> Decimal {
        self.labor_market_contribution + self.income_tax
    }
}
