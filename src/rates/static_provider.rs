use async_trait::async_trait;

use super::{ExchangeRateProvider, RateTable};
use crate::error::{EngineError, EngineResult};

/// A provider backed by a fixed table, or by nothing at all.
///
/// Used for the `offline` provider setting and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticRateProvider {
    table: Option<RateTable>,
}

impl StaticRateProvider {
    /// Always answers with `table`.
    pub fn new(table: RateTable) -> Self {
        Self { table: Some(table) }
    }

    /// Always fails with `RateUnavailable`.
    pub fn unavailable() -> Self {
        Self { table: None }
    }
}

#[async_trait]
impl ExchangeRateProvider for StaticRateProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_rates(&self) -> EngineResult<RateTable> {
        self.table.clone().ok_or_else(|| EngineError::RateUnavailable {
            currency: "*".to_string(),
            message: "no exchange-rate provider configured".to_string(),
        })
    }
}
