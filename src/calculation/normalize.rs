//! Input normalisation.
//!
//! Turns the six text fields of a [`RawWageInput`] into a validated
//! [`WageInput`] under a [`ValidationPolicy`].
//!
//! | situation                           | strict        | lenient |
//! |-------------------------------------|---------------|---------|
//! | blank hours / hourly rate           | InvalidInput  | 0       |
//! | blank minutes, deduction, tip, tax  | 0             | 0       |
//! | non-numeric or negative text        | InvalidInput  | 0       |
//! | minutes > 59, other tax > 100       | InvalidInput  | InvalidInput |

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{RawWageInput, ValidationPolicy, WageInput};

/// Whether a blank field is acceptable under the strict policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Required,
    Optional,
}

/// Normalises raw text input into a validated [`WageInput`].
///
/// # Examples
///
/// ```
/// use dk_wage_engine::calculation::normalize_input;
/// use dk_wage_engine::models::{RawWageInput, ValidationPolicy};
///
/// let raw = RawWageInput {
///     hours_worked: "37".to_string(),
///     minutes_worked: "30".to_string(),
///     hourly_rate: "abc".to_string(),
///     ..RawWageInput::default()
/// };
///
/// assert!(normalize_input(&raw, ValidationPolicy::Strict).is_err());
///
/// let input = normalize_input(&raw, ValidationPolicy::Lenient).unwrap();
/// assert!(input.hourly_rate.is_zero());
/// ```
pub fn normalize_input(raw: &RawWageInput, policy: ValidationPolicy) -> EngineResult<WageInput> {
    let input = WageInput {
        hours_worked: parse_whole("hours_worked", &raw.hours_worked, Presence::Required, policy)?,
        minutes_worked: parse_whole(
            "minutes_worked",
            &raw.minutes_worked,
            Presence::Optional,
            policy,
        )?,
        hourly_rate: parse_amount("hourly_rate", &raw.hourly_rate, Presence::Required, policy)?,
        personal_deduction: parse_amount(
            "personal_deduction",
            &raw.personal_deduction,
            Presence::Optional,
            policy,
        )?,
        tip: parse_amount("tip", &raw.tip, Presence::Optional, policy)?,
        other_tax_percent: parse_amount(
            "other_tax_percent",
            &raw.other_tax_percent,
            Presence::Optional,
            policy,
        )?,
    };

    input.validate()?;
    Ok(input)
}

fn parse_whole(
    field: &str,
    text: &str,
    presence: Presence,
    policy: ValidationPolicy,
) -> EngineResult<u32> {
    let text = text.trim();
    if text.is_empty() {
        return blank(field, presence, policy).map(|_| 0);
    }

    match text.parse::<i64>() {
        Ok(value) if value >= 0 => u32::try_from(value).or_else(|_| {
            reject(field, format!("{} is too large", value), policy).map(|_| 0)
        }),
        Ok(value) => reject(field, format!("must not be negative, got {}", value), policy).map(|_| 0),
        Err(_) => reject(
            field,
            format!("expected a whole number, got '{}'", text),
            policy,
        )
        .map(|_| 0),
    }
}

fn parse_amount(
    field: &str,
    text: &str,
    presence: Presence,
    policy: ValidationPolicy,
) -> EngineResult<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return blank(field, presence, policy).map(|_| Decimal::ZERO);
    }

    match Decimal::from_str(text) {
        Ok(value) if !value.is_sign_negative() || value.is_zero() => Ok(value),
        Ok(value) => reject(field, format!("must not be negative, got {}", value), policy)
            .map(|_| Decimal::ZERO),
        Err(_) => reject(field, format!("expected a number, got '{}'", text), policy)
            .map(|_| Decimal::ZERO),
    }
}

fn blank(field: &str, presence: Presence, policy: ValidationPolicy) -> EngineResult<()> {
    match (presence, policy) {
        (Presence::Required, ValidationPolicy::Strict) => {
            Err(EngineError::invalid_input(field, "is required"))
        }
        _ => Ok(()),
    }
}

/// Fails under the strict policy; under the lenient policy the caller
/// substitutes zero.
fn reject(field: &str, message: String, policy: ValidationPolicy) -> EngineResult<()> {
    match policy {
        ValidationPolicy::Strict => Err(EngineError::invalid_input(field, message)),
        ValidationPolicy::Lenient => Ok(()),
    }
}
