//! Rounding rules used throughout the pipeline.
//!
//! All rounding is half away from zero. Every monetary value in the
//! pipeline is non-negative, so this is ordinary round-half-up.

use rust_decimal::{Decimal, RoundingStrategy};

const STRATEGY: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Rounds to øre. The result always carries exactly 2 decimal places.
pub fn round_currency(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, STRATEGY);
    rounded.rescale(2);
    rounded
}

/// Rounds to whole kroner.
pub fn round_whole(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, STRATEGY)
}

/// Rounds hours to the nearest quarter hour: `round(hours * 4) / 4`.
pub fn round_quarter_hour(hours: Decimal) -> Decimal {
    let four = Decimal::from(4);
    round_whole(hours * four) / four
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_currency_half_up() {
        assert_eq!(round_currency(dec("703.125")), dec("703.13"));
        assert_eq!(round_currency(dec("703.1249")), dec("703.12"));
        assert_eq!(round_currency(dec("5625")), dec("5625.00"));
        assert_eq!(round_currency(dec("5625.0")).to_string(), "5625.00");
    }

    #[test]
    fn test_round_whole_half_up() {
        assert_eq!(round_whole(dec("56.25")), dec("56"));
        assert_eq!(round_whole(dec("762.72")), dec("763"));
        assert_eq!(round_whole(dec("0.5")), dec("1"));
        assert_eq!(round_whole(dec("2.5")), dec("3"));
    }

    #[test]
    fn test_round_quarter_hour() {
        assert_eq!(round_quarter_hour(dec("37.5")), dec("37.5"));
        assert_eq!(round_quarter_hour(dec("10.1")), dec("10"));
        assert_eq!(round_quarter_hour(dec("10.2")), dec("10.25"));
        assert_eq!(round_quarter_hour(dec("10.875")), dec("11"));
    }

    #[test]
    fn test_round_quarter_hour_tie_goes_up() {
        // 10.125 * 4 = 40.5
        assert_eq!(round_quarter_hour(dec("10.125")), dec("10.25"));
    }
}
