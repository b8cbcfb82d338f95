use rust_decimal::Decimal;
use tracing::{info, warn};

use super::ExchangeRateProvider;
use crate::error::{EngineError, EngineResult};
use crate::models::{Currency, ExchangeRate, RateSource, ResolvedRate};

/// Resolves the DKK→`currency` rate.
///
/// - DKK resolves to the unit rate without contacting the provider.
/// - With `prefer_manual` the manual rate is used and must be in range.
/// - Otherwise the provider is asked once. If it fails, a manual rate is
///   used when one was given; without one the provider error is returned.
///
/// A manual rate that is not positive or exceeds
/// [`MAX_RATE`](crate::models::MAX_RATE) is
/// [`EngineError::InvalidManualRate`] whenever it is actually needed.
pub async fn resolve_rate(
    provider: &dyn ExchangeRateProvider,
    currency: Currency,
    manual: Option<Decimal>,
    prefer_manual: bool,
) -> EngineResult<ResolvedRate> {
    if currency == Currency::Dkk {
        return Ok(ResolvedRate {
            currency,
            rate: ExchangeRate::UNIT,
            source: RateSource::Provider,
        });
    }

    if prefer_manual {
        return manual_rate(currency, manual);
    }

    match provider
        .fetch_rates()
        .await
        .and_then(|table| table.dkk_to(currency))
    {
        Ok(rate) => {
            info!(
                provider = provider.name(),
                currency = %currency,
                rate = %rate.value(),
                "Resolved exchange rate"
            );
            Ok(ResolvedRate {
                currency,
                rate,
                source: RateSource::Provider,
            })
        }
        Err(error) => {
            let error = scoped(error, currency);
            match manual {
                Some(_) => {
                    warn!(
                        provider = provider.name(),
                        currency = %currency,
                        error = %error,
                        "Provider rate unavailable, falling back to manual rate"
                    );
                    manual_rate(currency, manual)
                }
                None => Err(error),
            }
        }
    }
}

fn manual_rate(currency: Currency, manual: Option<Decimal>) -> EngineResult<ResolvedRate> {
    let rate = match manual {
        Some(value) => ExchangeRate::manual(value)?,
        None => {
            return Err(EngineError::RateUnavailable {
                currency: currency.to_string(),
                message: "manual rate requested but none was given".to_string(),
            });
        }
    };

    Ok(ResolvedRate {
        currency,
        rate,
        source: RateSource::Manual,
    })
}

/// Providers fail before they know the target; tag the error with it.
fn scoped(error: EngineError, currency: Currency) -> EngineError {
    match error {
        EngineError::RateUnavailable { message, .. } => EngineError::RateUnavailable {
            currency: currency.to_string(),
            message,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::{RateTable, StaticRateProvider};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn live() -> StaticRateProvider {
        StaticRateProvider::new(RateTable::from_quotes([
            ("DKK", dec("6.5")),
            ("EUR", dec("0.871")),
            ("BDT", dec("110.5")),
        ]))
    }

    #[tokio::test]
    async fn test_provider_rate_used_by_default() {
        let resolved = resolve_rate(&live(), Currency::Eur, None, false).await.unwrap();
        assert_eq!(resolved.rate.value(), dec("0.134"));
        assert_eq!(resolved.source, RateSource::Provider);
    }

    #[tokio::test]
    async fn test_provider_wins_over_manual_when_available() {
        let resolved = resolve_rate(&live(), Currency::Bdt, Some(dec("20")), false)
            .await
            .unwrap();
        assert_eq!(resolved.rate.value(), dec("17"));
        assert_eq!(resolved.source, RateSource::Provider);
    }

    #[tokio::test]
    async fn test_prefer_manual_bypasses_provider() {
        let resolved = resolve_rate(&live(), Currency::Bdt, Some(dec("20")), true)
            .await
            .unwrap();
        assert_eq!(resolved.rate.value(), dec("20"));
        assert_eq!(resolved.source, RateSource::Manual);
    }

    #[tokio::test]
    async fn test_falls_back_to_manual_on_provider_failure() {
        let provider = StaticRateProvider::unavailable();
        let resolved = resolve_rate(&provider, Currency::Usd, Some(dec("0.145")), false)
            .await
            .unwrap();
        assert_eq!(resolved.rate.value(), dec("0.145"));
        assert_eq!(resolved.source, RateSource::Manual);
    }

    #[tokio::test]
    async fn test_provider_failure_without_manual_is_unavailable() {
        let provider = StaticRateProvider::unavailable();
        match resolve_rate(&provider, Currency::Eur, None, false).await {
            Err(EngineError::RateUnavailable { currency, .. }) => assert_eq!(currency, "EUR"),
            other => panic!("Expected RateUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_positive_manual_rate_rejected() {
        let provider = StaticRateProvider::unavailable();
        let result = resolve_rate(&provider, Currency::Eur, Some(Decimal::ZERO), false).await;
        assert!(matches!(result, Err(EngineError::InvalidManualRate { .. })));

        let result = resolve_rate(&live(), Currency::Eur, Some(dec("-1")), true).await;
        assert!(matches!(result, Err(EngineError::InvalidManualRate { .. })));
    }

    #[tokio::test]
    async fn test_dkk_is_unit_without_provider() {
        let provider = StaticRateProvider::unavailable();
        let resolved = resolve_rate(&provider, Currency::Dkk, None, false).await.unwrap();
        assert_eq!(resolved.rate, ExchangeRate::UNIT);
    }
}
