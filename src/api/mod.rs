//! HTTP API module for the wage engine.
//!
//! `POST /calculate` runs a complete calculation from raw form input and
//! `GET /rates/{currency}` reports the provider's current DKK rate.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, ConversionRequest, FieldValue};
pub use response::{ApiError, ApiErrorResponse, RateResponse};
pub use state::AppState;
