//! Audit trail models.
//!
//! Every stage of the deduction pipeline records an [`AuditStep`] so that a
//! payslip figure can always be traced back to the inputs and rounding rule
//! that produced it.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention, such as an exchange rate that could not
/// be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning with the given code, message and severity.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use dk_wage_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

impl AuditTrace {
    /// Returns the step recorded for `rule_id`, if any.
    pub fn step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|s| s.rule_id == rule_id)
    }

    /// Returns true if a warning with the given code was recorded.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(number: u32, rule_id: &str) -> AuditStep {
        AuditStep {
            step_number: number,
            rule_id: rule_id.to_string(),
            rule_name: rule_id.to_string(),
            input: serde_json::json!({}),
            output: serde_json::json!({}),
            reasoning: String::new(),
        }
    }

    #[test]
    fn test_step_lookup_by_rule_id() {
        let trace = AuditTrace {
            steps: vec![step(1, "quarter_hour_rounding"), step(2, "pension_tier")],
            warnings: vec![],
            duration_us: 0,
        };

        assert_eq!(trace.step("pension_tier").unwrap().step_number, 2);
        assert!(trace.step("unknown").is_none());
    }

    #[test]
    fn test_has_warning() {
        let trace = AuditTrace {
            steps: vec![],
            warnings: vec![AuditWarning::new("RATE_UNAVAILABLE", "offline", "medium")],
            duration_us: 0,
        };

        assert!(trace.has_warning("RATE_UNAVAILABLE"));
        assert!(!trace.has_warning("INVALID_MANUAL_RATE"));
    }

    #[test]
    fn test_audit_step_round_trips_through_json() {
        let original = step(3, "labor_market_contribution");
        let json = serde_json::to_string(&original).unwrap();
        let parsed: AuditStep = serde_json::from_str(&json).unwrap();
        assert_eq!(original, parsed);
    }
}
