//! Request types for the wage engine API.
//!
//! This module defines the JSON request structures for the `/calculate` endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculator::{CalculationOptions, ConversionOptions};
use crate::models::{RawWageInput, ValidationPolicy};

/// A numeric form field sent either as a JSON number or as text.
///
/// Text is passed through untouched so that normalisation applies the
/// validation policy to it. Non-integer JSON numbers go through `f64` and
/// keep about 17 significant digits; send amounts as strings when every
/// digit matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A JSON number.
    Number(serde_json::Number),
    /// A JSON string.
    Text(String),
}

impl FieldValue {
    fn into_text(self) -> String {
        match self {
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s,
        }
    }
}

fn text(field: Option<FieldValue>) -> String {
    field.map(FieldValue::into_text).unwrap_or_default()
}

/// Request body for the `/calculate` endpoint.
///
/// Every wage field is optional; how a missing or unparsable field is
/// treated depends on the validation policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Whole hours worked.
    #[serde(default)]
    pub hours_worked: Option<FieldValue>,
    /// Additional minutes, 0..=59.
    #[serde(default)]
    pub minutes_worked: Option<FieldValue>,
    /// DKK per hour.
    #[serde(default)]
    pub hourly_rate: Option<FieldValue>,
    /// Monthly personal deduction (personfradrag).
    #[serde(default)]
    pub personal_deduction: Option<FieldValue>,
    /// Tips added to gross.
    #[serde(default)]
    pub tip: Option<FieldValue>,
    /// Church tax or similar, percent of net.
    #[serde(default)]
    pub other_tax_percent: Option<FieldValue>,
    /// Overrides the configured validation policy.
    #[serde(default)]
    pub validation_policy: Option<ValidationPolicy>,
    /// Compute holiday pay.
    #[serde(default)]
    pub include_holiday_pay: bool,
    /// Project the result into another currency.
    #[serde(default)]
    pub conversion: Option<ConversionRequest>,
}

/// Conversion settings in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// Target currency code (DKK, USD, EUR, BDT).
    pub currency: String,
    /// Fallback or preferred manual rate.
    #[serde(default)]
    pub manual_rate: Option<Decimal>,
    /// Use the manual rate without asking the provider.
    #[serde(default)]
    pub prefer_manual: bool,
    /// Sum holiday pay into the converted amounts.
    #[serde(default)]
    pub include_holiday_pay: bool,
}

impl CalculationRequest {
    /// Splits the request into raw input and calculation options.
    ///
    /// Fails only when the conversion currency is not supported.
    pub fn into_parts(self) -> crate::error::EngineResult<(RawWageInput, CalculationOptions)> {
        let conversion = match self.conversion {
            Some(req) => Some(ConversionOptions {
                currency: req.currency.parse()?,
                manual_rate: req.manual_rate,
                prefer_manual: req.prefer_manual,
                include_holiday_pay: req.include_holiday_pay,
            }),
            None => None,
        };

        let raw = RawWageInput {
            hours_worked: text(self.hours_worked),
            minutes_worked: text(self.minutes_worked),
            hourly_rate: text(self.hourly_rate),
            personal_deduction: text(self.personal_deduction),
            tip: text(self.tip),
            other_tax_percent: text(self.other_tax_percent),
        };

        let options = CalculationOptions {
            policy: self.validation_policy,
            include_holiday_pay: self.include_holiday_pay,
            conversion,
        };

        Ok((raw, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::Currency;

    #[test]
    fn test_deserialize_numbers_and_strings() {
        let json = r#"{
            "hours_worked": 37,
            "minutes_worked": "30",
            "hourly_rate": 150.5,
            "personal_deduction": "5207"
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        let (raw, options) = request.into_parts().unwrap();

        assert_eq!(raw.hours_worked, "37");
        assert_eq!(raw.minutes_worked, "30");
        assert_eq!(raw.hourly_rate, "150.5");
        assert_eq!(raw.personal_deduction, "5207");
        assert_eq!(raw.tip, "");
        assert_eq!(options, CalculationOptions::default());
    }

    #[test]
    fn test_string_amounts_keep_full_precision() {
        let request: CalculationRequest = serde_json::from_str(
            r#"{"hours_worked": 1, "hourly_rate": "123.456789012345678901"}"#,
        )
        .unwrap();
        let (raw, _) = request.into_parts().unwrap();
        assert_eq!(raw.hourly_rate, "123.456789012345678901");
    }

    #[test]
    fn test_integer_numbers_are_exact() {
        let request: CalculationRequest =
            serde_json::from_str(r#"{"personal_deduction": 9007199254740993}"#).unwrap();
        let (raw, _) = request.into_parts().unwrap();
        assert_eq!(raw.personal_deduction, "9007199254740993");
    }

    #[test]
    fn test_deserialize_conversion_and_policy() {
        let json = r#"{
            "hours_worked": "80",
            "hourly_rate": "120",
            "validation_policy": "lenient",
            "include_holiday_pay": true,
            "conversion": { "currency": "bdt", "manual_rate": "17.1", "prefer_manual": true }
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        let (_, options) = request.into_parts().unwrap();

        assert_eq!(options.policy, Some(ValidationPolicy::Lenient));
        assert!(options.include_holiday_pay);
        let conversion = options.conversion.unwrap();
        assert_eq!(conversion.currency, Currency::Bdt);
        assert_eq!(conversion.manual_rate, Some(Decimal::new(171, 1)));
        assert!(conversion.prefer_manual);
        assert!(!conversion.include_holiday_pay);
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let request = CalculationRequest {
            conversion: Some(ConversionRequest {
                currency: "GBP".to_string(),
                manual_rate: None,
                prefer_manual: false,
                include_holiday_pay: false,
            }),
            ..CalculationRequest::default()
        };

        assert!(matches!(
            request.into_parts(),
            Err(EngineError::UnsupportedCurrency { .. })
        ));
    }
}
