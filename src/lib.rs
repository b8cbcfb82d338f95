//! Net salary engine for Danish hourly wage earners.
//!
//! This crate turns hours, minutes and an hourly rate into a payslip
//! breakdown: quarter-hour rounding, the tiered ATP pension, AM-bidrag,
//! A-skat with a personal deduction, an optional other tax, holiday pay
//! (feriepenge), and an optional projection into USD, EUR or BDT using a
//! live or manually supplied exchange rate. Every figure carries an audit
//! step explaining how it was derived.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod calculator;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod rates;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialises tracing with an `EnvFilter` read from `RUST_LOG`,
/// defaulting to `info`.
///
/// Can only be called once per process.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
