//! USD-based quote table and cross-rate math.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Currency, ExchangeRate};

/// Quotes against USD, keyed by currency code.
///
/// Deserialises from the provider payload `{"rates": {"DKK": "6.89", ...}}`.
/// Quotes may be JSON strings or numbers.
///
/// # Example
///
/// ```
/// use dk_wage_engine::models::Currency;
/// use dk_wage_engine::rates::RateTable;
/// use rust_decimal::Decimal;
///
/// let table: RateTable =
///     serde_json::from_str(r#"{"rates": {"DKK": "6.5", "EUR": "0.871"}}"#).unwrap();
/// let rate = table.dkk_to(Currency::Eur).unwrap();
/// assert_eq!(rate.value(), Decimal::new(134, 3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    rates: HashMap<String, Decimal>,
}

impl RateTable {
    /// Builds a table from `(code, quote)` pairs.
    pub fn from_quotes<I, S>(quotes: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        Self {
            rates: quotes
                .into_iter()
                .map(|(code, quote)| (code.into().to_uppercase(), quote))
                .collect(),
        }
    }

    /// The USD quote for `currency`. USD itself is always 1.
    pub fn quote(&self, currency: Currency) -> Option<Decimal> {
        match currency {
            Currency::Usd => Some(Decimal::ONE),
            other => self.rates.get(other.code()).copied(),
        }
    }

    /// The DKK→`target` multiplier: `quote(target) / quote(DKK)`.
    pub fn dkk_to(&self, target: Currency) -> EngineResult<ExchangeRate> {
        if target == Currency::Dkk {
            return Ok(ExchangeRate::UNIT);
        }

        let dkk = self.positive_quote(target, Currency::Dkk)?;
        let quote = self.positive_quote(target, target)?;
        let rate = quote.checked_div(dkk).ok_or_else(|| EngineError::RateUnavailable {
            currency: target.to_string(),
            message: "cross rate overflowed".to_string(),
        })?;

        ExchangeRate::from_quote(target, rate)
    }

    fn positive_quote(&self, target: Currency, currency: Currency) -> EngineResult<Decimal> {
        match self.quote(currency) {
            Some(quote) if quote > Decimal::ZERO => Ok(quote),
            Some(quote) => Err(EngineError::RateUnavailable {
                currency: target.to_string(),
                message: format!("{} quote {} is not positive", currency, quote),
            }),
            None => Err(EngineError::RateUnavailable {
                currency: target.to_string(),
                message: format!("no {} quote in provider response", currency),
            }),
        }
    }
}
