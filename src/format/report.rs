use std::fmt;

use super::{NumberStyle, format_amount, format_whole};
use crate::models::Calculation;

/// Plain-text payslip breakdown of a calculation.
///
/// Sections for other tax, holiday pay, conversion and warnings appear only
/// when the calculation carries them.
pub struct Breakdown<'a>(pub &'a Calculation);

impl fmt::Display for Breakdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wage = &self.0.wage;
        let dkk = |amount| format_amount(amount, NumberStyle::Western);

        writeln!(f, "Gross earned:    {} DKK", dkk(wage.gross_salary))?;
        writeln!(f, "Total tax paid:  {} DKK", dkk(wage.total_tax_paid()))?;
        writeln!(f, "Net earned:      {} DKK", dkk(wage.net_salary))?;
        writeln!(f)?;
        writeln!(
            f,
            "Hours: {} worked, {} paid",
            wage.raw_total_hours.normalize(),
            wage.total_hours.normalize()
        )?;
        writeln!(f, "  ATP: {} DKK", format_whole(wage.pension_contribution))?;
        writeln!(
            f,
            "  AM-bidrag: {} DKK",
            format_whole(wage.labor_market_contribution)
        )?;
        writeln!(f, "  A-skat: {} DKK", format_whole(wage.income_tax))?;
        if !wage.other_tax_amount.is_zero() {
            writeln!(
                f,
                "  Other tax @ {}%: {} DKK",
                self.0.input.other_tax_percent.normalize(),
                format_whole(wage.other_tax_amount)
            )?;
        }

        if let Some(holiday) = &self.0.holiday_pay {
            writeln!(f)?;
            writeln!(f, "Holiday pay:     {} DKK", dkk(holiday.holiday_gross))?;
            writeln!(
                f,
                "  AM-bidrag: {} DKK",
                format_whole(holiday.labor_market_contribution)
            )?;
            writeln!(f, "  A-skat: {} DKK", format_whole(holiday.income_tax))?;
            writeln!(f, "Net holiday pay: {} DKK", dkk(holiday.holiday_net))?;
        }

        if let Some(conversion) = &self.0.conversion {
            let currency = conversion.rate.currency;
            let style = NumberStyle::for_currency(currency);
            writeln!(f)?;
            writeln!(
                f,
                "Exchange rate ({:?}): 1 DKK = {} {}",
                conversion.rate.source,
                conversion.rate.rate.value().round_dp(5).normalize(),
                currency
            )?;
            if conversion.includes_holiday_pay {
                writeln!(f, "  (amounts include holiday pay)")?;
            }
            let converted = &conversion.converted;
            writeln!(
                f,
                "  Gross income:   {} {}",
                format_amount(converted.gross_converted, style),
                currency
            )?;
            writeln!(
                f,
                "  Net income:     {} {}",
                format_amount(converted.net_converted, style),
                currency
            )?;
            writeln!(
                f,
                "  Total tax paid: {} {}",
                format_amount(converted.tax_converted, style),
                currency
            )?;
        }

        for warning in &self.0.audit_trace.warnings {
            writeln!(f)?;
            writeln!(f, "Warning [{}]: {}", warning.code, warning.message)?;
        }

        Ok(())
    }
}

/// Renders a calculation as a plain-text payslip breakdown.
pub fn render_breakdown(calc: &Calculation) -> String {
    Breakdown(calc).to_string()
}
