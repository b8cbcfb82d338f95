//! The complete calculation record.
//!
//! A [`Calculation`] bundles everything one "Calculate" action produces:
//! the normalised input, the wage breakdown, optional holiday pay, an
//! optional currency projection and the audit trace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AuditTrace, ConversionOutcome, HolidayPayResult, WageInput, WageResult};

/// The complete result of a wage calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// The normalised input the pipeline ran on.
    pub input: WageInput,
    /// Main deduction pipeline output.
    pub wage: WageResult,
    /// Holiday pay, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_pay: Option<HolidayPayResult>,
    /// Currency projection, when requested and a rate was available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion: Option<ConversionOutcome>,
    /// Audit trail of every pipeline step.
    pub audit_trace: AuditTrace,
}
