//! Caller-held cache of the most recent calculation.
//!
//! Interactive front ends redisplay the previous breakdown while the user
//! toggles holiday pay or picks a currency. That memory belongs to the
//! caller; the calculation core never holds one.

use super::{Calculation, WageInput};

/// The last calculation shown to a user, if any.
#[derive(Debug, Clone, Default)]
pub struct LastResult {
    latest: Option<Calculation>,
}

impl LastResult {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `calculation`, returning the one it replaced.
    pub fn record(&mut self, calculation: Calculation) -> Option<Calculation> {
        self.latest.replace(calculation)
    }

    /// The most recent calculation.
    pub fn latest(&self) -> Option<&Calculation> {
        self.latest.as_ref()
    }

    /// True when nothing is cached or the cached result was computed from
    /// different input than `input`.
    pub fn is_stale_for(&self, input: &WageInput) -> bool {
        self.latest.as_ref().is_none_or(|calc| &calc.input != input)
    }

    /// Forgets the cached calculation.
    pub fn clear(&mut self) {
        self.latest = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_wage;
    use crate::config::DeductionRates;
    use rust_decimal::Decimal;

    fn calculation(hours: u32) -> Calculation {
        let input = WageInput::new(hours, 0, Decimal::new(150, 0)).unwrap();
        calculate_wage(&input, &DeductionRates::default(), false)
    }

    #[test]
    fn test_empty_cache_is_stale() {
        let cache = LastResult::new();
        let input = WageInput::new(10, 0, Decimal::new(150, 0)).unwrap();

        assert!(cache.latest().is_none());
        assert!(cache.is_stale_for(&input));
    }

    #[test]
    fn test_record_replaces_previous() {
        let mut cache = LastResult::new();
        assert!(cache.record(calculation(10)).is_none());

        let replaced = cache.record(calculation(20)).unwrap();
        assert_eq!(replaced.input.hours_worked, 10);
        assert_eq!(cache.latest().unwrap().input.hours_worked, 20);
    }

    #[test]
    fn test_staleness_tracks_input() {
        let mut cache = LastResult::new();
        let calc = calculation(10);
        let same = calc.input.clone();
        cache.record(calc);

        assert!(!cache.is_stale_for(&same));
        let changed = WageInput::new(11, 0, Decimal::new(150, 0)).unwrap();
        assert!(cache.is_stale_for(&changed));
    }

    #[test]
    fn test_clear() {
        let mut cache = LastResult::new();
        cache.record(calculation(10));
        cache.clear();
        assert!(cache.latest().is_none());
    }
}
