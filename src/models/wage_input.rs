//! Wage input models.
//!
//! [`RawWageInput`] is what a form or HTTP client hands over: six text
//! fields. [`WageInput`] is the validated numeric record the deduction
//! pipeline runs on.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Highest accepted value for `minutes_worked`.
pub const MAX_MINUTES: u32 = 59;

/// Highest accepted hourly rate, personal deduction or tip (1 000 000 000 DKK).
///
/// Keeps `hours * rate + tip` and every downstream product well inside
/// the `Decimal` range for any `u32` hour count.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// How invalid numeric text is treated during normalisation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Non-numeric or negative text fails with `InvalidInput`.
    #[default]
    Strict,
    /// Non-numeric or negative text silently becomes 0.
    Lenient,
}

/// Unparsed wage input as typed by the user.
///
/// Every field defaults to the empty string so partially filled forms
/// deserialize cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawWageInput {
    /// Whole hours worked.
    pub hours_worked: String,
    /// Additional minutes worked, 0..=59.
    pub minutes_worked: String,
    /// Hourly wage in DKK.
    pub hourly_rate: String,
    /// Monthly personal allowance (fradrag) in DKK.
    pub personal_deduction: String,
    /// Tips in DKK.
    pub tip: String,
    /// Other tax (e.g. church tax) as a percentage, 5 means 5%.
    pub other_tax_percent: String,
}

/// Validated wage input.
///
/// Build one with [`WageInput::new`] or from text via
/// [`normalize_input`](crate::calculation::normalize_input).
///
/// # Example
///
/// ```
/// use dk_wage_engine::models::WageInput;
/// use rust_decimal::Decimal;
///
/// let input = WageInput::new(37, 30, Decimal::new(150, 0)).unwrap();
/// assert_eq!(input.personal_deduction, Decimal::ZERO);
///
/// assert!(WageInput::new(37, 60, Decimal::new(150, 0)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageInput {
    /// Whole hours worked.
    pub hours_worked: u32,
    /// Additional minutes worked, 0..=59.
    pub minutes_worked: u32,
    /// Hourly wage in DKK.
    pub hourly_rate: Decimal,
    /// Monthly personal allowance subtracted before the income-tax base.
    #[serde(default)]
    pub personal_deduction: Decimal,
    /// Tips added to gross salary.
    #[serde(default)]
    pub tip: Decimal,
    /// Other tax percentage in [0, 100], applied to net salary.
    #[serde(default)]
    pub other_tax_percent: Decimal,
}

impl WageInput {
    /// Creates a validated input with zero deduction, tip and other tax.
    pub fn new(hours_worked: u32, minutes_worked: u32, hourly_rate: Decimal) -> EngineResult<Self> {
        let input = Self {
            hours_worked,
            minutes_worked,
            hourly_rate,
            personal_deduction: Decimal::ZERO,
            tip: Decimal::ZERO,
            other_tax_percent: Decimal::ZERO,
        };
        input.validate()?;
        Ok(input)
    }

    /// Sets the personal deduction.
    pub fn with_personal_deduction(mut self, amount: Decimal) -> EngineResult<Self> {
        self.personal_deduction = amount;
        self.validate()?;
        Ok(self)
    }

    /// Sets the tip.
    pub fn with_tip(mut self, amount: Decimal) -> EngineResult<Self> {
        self.tip = amount;
        self.validate()?;
        Ok(self)
    }

    /// Sets the other tax percentage.
    pub fn with_other_tax_percent(mut self, percent: Decimal) -> EngineResult<Self> {
        self.other_tax_percent = percent;
        self.validate()?;
        Ok(self)
    }

    /// Checks the range invariants of every field.
    pub fn validate(&self) -> EngineResult<()> {
        if self.minutes_worked > MAX_MINUTES {
            return Err(EngineError::invalid_input(
                "minutes_worked",
                format!("must be between 0 and {}, got {}", MAX_MINUTES, self.minutes_worked),
            ));
        }

        let non_negative = [
            ("hourly_rate", self.hourly_rate),
            ("personal_deduction", self.personal_deduction),
            ("tip", self.tip),
            ("other_tax_percent", self.other_tax_percent),
        ];
        for (field, value) in non_negative {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(EngineError::invalid_input(
                    field,
                    format!("must not be negative, got {}", value),
                ));
            }
            if field != "other_tax_percent" && value > MAX_AMOUNT {
                return Err(EngineError::invalid_input(
                    field,
                    format!("must be at most {}, got {}", MAX_AMOUNT, value),
                ));
            }
        }

        if self.other_tax_percent > Decimal::ONE_HUNDRED {
            return Err(EngineError::invalid_input(
                "other_tax_percent",
                format!("must be at most 100, got {}", self.other_tax_percent),
            ));
        }

        Ok(())
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
    fn test_new_accepts_boundary_minutes() {
        assert!(WageInput::new(0, 0, dec("150")).is_ok());
        assert!(WageInput::new(0, 59, dec("150")).is_ok());
    }

    #[test]
    fn test_new_rejects_minutes_above_59() {
        match WageInput::new(10, 60, dec("150")) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "minutes_worked"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_rate_rejected() {
        let result = WageInput::new(10, 0, dec("-1"));
        assert!(matches!(
            result,
            Err(EngineError::InvalidInput { ref field, .. }) if field == "hourly_rate"
        ));
    }

    #[test]
    fn test_other_tax_above_100_rejected() {
        let result = WageInput::new(10, 0, dec("150"))
            .unwrap()
            .with_other_tax_percent(dec("100.5"));
        assert!(result.is_err());
    }

    #[test]
    fn test_amounts_capped_at_max_amount() {
        assert!(WageInput::new(u32::MAX, 59, MAX_AMOUNT).is_ok());

        let over = MAX_AMOUNT + dec("0.01");
        for result in [
            WageInput::new(10, 0, over),
            WageInput::new(10, 0, dec("150")).unwrap().with_tip(over),
            WageInput::new(10, 0, dec("150")).unwrap().with_personal_deduction(over),
        ] {
            assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
        }
    }

    #[test]
    fn test_decimal_max_rate_rejected() {
        let result = WageInput::new(2, 0, Decimal::MAX);
        assert!(matches!(
            result,
            Err(EngineError::InvalidInput { ref field, .. }) if field == "hourly_rate"
        ));
    }

    #[test]
    fn test_builder_sets_optional_fields() {
        let input = WageInput::new(80, 0, dec("120"))
            .and_then(|i| i.with_personal_deduction(dec("5207")))
            .and_then(|i| i.with_tip(dec("250")))
            .and_then(|i| i.with_other_tax_percent(dec("0.7")))
            .unwrap();

        assert_eq!(input.personal_deduction, dec("5207"));
        assert_eq!(input.tip, dec("250"));
        assert_eq!(input.other_tax_percent, dec("0.7"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "hours_worked": 37,
            "minutes_worked": 30,
            "hourly_rate": "150"
        }"#;

        let input: WageInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.hours_worked, 37);
        assert_eq!(input.tip, Decimal::ZERO);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_raw_input_deserializes_partial_form() {
        let raw: RawWageInput = serde_json::from_str(r#"{"hours_worked": "12"}"#).unwrap();
        assert_eq!(raw.hours_worked, "12");
        assert_eq!(raw.tip, "");
    }

    #[test]
    fn test_validation_policy_serialization() {
        assert_eq!(
            serde_json::to_string(&ValidationPolicy::Lenient).unwrap(),
            "\"lenient\""
        );
        assert_eq!(ValidationPolicy::default(), ValidationPolicy::Strict);
    }
}
