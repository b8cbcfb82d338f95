//! Number formatting and the plain-text breakdown report.
//!
//! Grouping style is chosen explicitly per call; nothing here reads a
//! process-wide locale.

mod report;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::Currency;

pub use report::{Breakdown, render_breakdown};

/// Digit grouping convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle {
    /// Groups of three: `1,234,567.89`.
    Western,
    /// Last three, then groups of two: `12,34,567.89`.
    Indian,
}

impl NumberStyle {
    /// BDT amounts use the Indian (lakh/crore) convention, all others Western.
    pub fn for_currency(currency: Currency) -> Self {
        match currency {
            Currency::Bdt => NumberStyle::Indian,
            _ => NumberStyle::Western,
        }
    }
}

/// Formats `amount` with two decimals and the given grouping.
///
/// # Examples
///
/// ```
/// use dk_wage_engine::format::{NumberStyle, format_amount};
/// use rust_decimal::Decimal;
///
/// let amount = Decimal::new(123456789, 2);
/// assert_eq!(format_amount(amount, NumberStyle::Western), "1,234,567.89");
/// assert_eq!(format_amount(amount, NumberStyle::Indian), "12,34,567.89");
/// ```
pub fn format_amount(amount: Decimal, style: NumberStyle) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    let text = rounded.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{}{}.{}", sign, group_digits(whole, style), fraction)
}

/// Formats whole kroner with Western grouping and no decimals.
pub fn format_whole(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let text = rounded.abs().trunc().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}", sign, group_digits(&text, NumberStyle::Western))
}

fn group_digits(digits: &str, style: NumberStyle) -> String {
    let len = digits.len();
    let mut result = String::with_capacity(len + len / 2);

    for (i, c) in digits.chars().enumerate() {
        let remaining = len - i;
        let boundary = match style {
            NumberStyle::Western => remaining % 3 == 0,
            NumberStyle::Indian => remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0),
        };
        if i > 0 && boundary {
            result.push(',');
        }
        result.push(c);
    }

    result
}
