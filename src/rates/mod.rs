//! Exchange-rate providers.
//!
//! The deduction pipeline never depends on a rate. Conversion takes an
//! already-resolved [`ResolvedRate`](crate::models::ResolvedRate), and this
//! module is where one comes from: a provider quote table, a manual rate
//! typed in by the user, or both with a fallback between them.

mod http;
mod resolve;
mod static_provider;
mod table;

use async_trait::async_trait;

use crate::error::EngineResult;

pub use http::HttpRateProvider;
pub use resolve::resolve_rate;
pub use static_provider::StaticRateProvider;
pub use table::RateTable;

/// A source of USD-based quotes.
///
/// Implementations make a single attempt per call with a bounded timeout.
/// Failures surface as [`EngineError::RateUnavailable`](crate::error::EngineError::RateUnavailable);
/// there is no retry and no caching.
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync + 'static {
    /// Provider name for logs (e.g. "http", "static").
    fn name(&self) -> &str;

    /// Fetches the current quote table.
    async fn fetch_rates(&self) -> EngineResult<RateTable>;
}
