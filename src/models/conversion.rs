//! Currency and conversion models.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{HolidayPayResult, WageResult};
use crate::error::{EngineError, EngineResult};

/// Currencies the engine can project a salary into. DKK is the base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Danish krone.
    Dkk,
    /// US dollar.
    Usd,
    /// Euro.
    Eur,
    /// Bangladeshi taka.
    Bdt,
}

impl Currency {
    /// All supported currencies.
    pub const ALL: [Currency; 4] = [Currency::Dkk, Currency::Usd, Currency::Eur, Currency::Bdt];

    /// ISO 4217 code.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Dkk => "DKK",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Bdt => "BDT",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or(EngineError::UnsupportedCurrency { code })
    }
}

/// Highest accepted DKK→target multiplier.
pub const MAX_RATE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// A DKK→target multiplier in `(0, MAX_RATE]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct ExchangeRate(Decimal);

impl ExchangeRate {
    /// The identity rate, used for DKK→DKK.
    pub const UNIT: ExchangeRate = ExchangeRate(Decimal::ONE);

    /// Validates a user-supplied rate.
    ///
    /// ```
    /// use dk_wage_engine::models::ExchangeRate;
    /// use rust_decimal::Decimal;
    ///
    /// assert!(ExchangeRate::manual(Decimal::new(1534, 2)).is_ok());
    /// assert!(ExchangeRate::manual(Decimal::ZERO).is_err());
    /// assert!(ExchangeRate::manual(Decimal::MAX).is_err());
    /// ```
    pub fn manual(rate: Decimal) -> EngineResult<Self> {
        if in_range(rate) {
            Ok(Self(rate))
        } else {
            Err(EngineError::InvalidManualRate { rate })
        }
    }

    /// Validates a rate derived from provider quotes.
    pub fn from_quote(currency: Currency, rate: Decimal) -> EngineResult<Self> {
        if in_range(rate) {
            Ok(Self(rate))
        } else {
            Err(EngineError::RateUnavailable {
                currency: currency.to_string(),
                message: format!("derived rate {} is outside (0, {}]", rate, MAX_RATE),
            })
        }
    }

    /// The raw multiplier.
    pub fn value(self) -> Decimal {
        self.0
    }
}

fn in_range(rate: Decimal) -> bool {
    rate > Decimal::ZERO && rate <= MAX_RATE
}

impl TryFrom<Decimal> for ExchangeRate {
    type Error = EngineError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        ExchangeRate::manual(value)
    }
}

impl From<ExchangeRate> for Decimal {
    fn from(rate: ExchangeRate) -> Self {
        rate.0
    }
}

/// Where a resolved rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// Fetched from the exchange-rate provider.
    Provider,
    /// Typed in by the user.
    Manual,
}

/// A rate ready to be applied, with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRate {
    /// Target currency.
    pub currency: Currency,
    /// DKK→currency multiplier.
    pub rate: ExchangeRate,
    /// Provider or manual.
    pub source: RateSource,
}

/// The three headline DKK figures that get projected into another currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryAmounts {
    /// Gross salary.
    pub gross: Decimal,
    /// Total tax paid.
    pub tax: Decimal,
    /// Net salary.
    pub net: Decimal,
}

impl SalaryAmounts {
    /// Headline figures of a wage result; tax includes other tax.
    pub fn from_wage(wage: &WageResult) -> Self {
        Self {
            gross: wage.gross_salary,
            tax: wage.total_tax_paid(),
            net: wage.net_salary,
        }
    }

    /// Adds the holiday-pay components on top.
    pub fn with_holiday(self, holiday: &HolidayPayResult) -> Self {
        Self {
            gross: self.gross + holiday.holiday_gross,
            tax: self.tax + holiday.total_tax(),
            net: self.net + holiday.holiday_net,
        }
    }
}

/// Converted figures, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Gross in the target currency.
    pub gross_converted: Decimal,
    /// Net in the target currency.
    pub net_converted: Decimal,
    /// Tax in the target currency.
    pub tax_converted: Decimal,
}

/// Conversion section of a calculation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOutcome {
    /// The rate that was applied.
    pub rate: ResolvedRate,
    /// Whether holiday pay was summed into the converted amounts.
    pub includes_holiday_pay: bool,
    /// The DKK amounts that were converted.
    pub amounts: SalaryAmounts,
    /// The converted amounts.
    pub converted: ConversionResult,
}
