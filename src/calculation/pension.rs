//! Tiered ATP pension contribution.
//!
//! The contribution is a step function of raw (not quarter-rounded) hours
//! worked. The statutory table is:
//!
//! | hours       | contribution |
//! |-------------|--------------|
//! | < 39        | 0.00         |
//! | [39, 78)    | 33.00        |
//! | [78, 117)   | 66.00        |
//! | >= 117      | 99.00        |

use rust_decimal::Decimal;

use crate::config::{PensionTier, STATUTORY_PENSION_TIERS};
use crate::models::AuditStep;

/// The result of the pension tier lookup.
#[derive(Debug, Clone)]
pub struct PensionResult {
    /// ATP contribution in DKK.
    pub contribution: Decimal,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// ATP contribution for `hours` under the statutory table.
///
/// # Examples
///
/// ```
/// use dk_wage_engine::calculation::tiered_pension;
/// use rust_decimal::Decimal;
///
/// assert_eq!(tiered_pension(Decimal::new(3899, 2)), Decimal::ZERO);
/// assert_eq!(tiered_pension(Decimal::new(39, 0)), Decimal::new(33, 0));
/// assert_eq!(tiered_pension(Decimal::new(117, 0)), Decimal::new(99, 0));
/// ```
pub fn tiered_pension(hours: Decimal) -> Decimal {
    pension_for_hours(hours, &STATUTORY_PENSION_TIERS)
}

/// ATP contribution for `hours` under `tiers`.
///
/// `tiers` must be ascending by `min_hours`. Hours below the first tier
/// yield zero.
pub fn pension_for_hours(hours: Decimal, tiers: &[PensionTier]) -> Decimal {
    matching_tier(hours, tiers)
        .map(|tier| tier.amount)
        .unwrap_or(Decimal::ZERO)
}

fn matching_tier(hours: Decimal, tiers: &[PensionTier]) -> Option<&PensionTier> {
    tiers.iter().rev().find(|tier| hours >= tier.min_hours)
}

/// Looks up the ATP contribution for raw hours worked.
pub fn calculate_pension(
    raw_total_hours: Decimal,
    tiers: &[PensionTier],
    step_number: u32,
) -> PensionResult {
    let tier = matching_tier(raw_total_hours, tiers);
    let contribution = tier.map(|t| t.amount).unwrap_or(Decimal::ZERO);

    let reasoning = match tier {
        Some(t) => format!(
            "{} raw hours falls in tier from {} hours: ATP {}",
            raw_total_hours.round_dp(4).normalize(),
            t.min_hours.normalize(),
            contribution.normalize()
        ),
        None => format!(
            "{} raw hours is below the first tier: no ATP",
            raw_total_hours.round_dp(4).normalize()
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "pension_tier".to_string(),
        rule_name: "ATP Pension Contribution".to_string(),
        input: serde_json::json!({
            "raw_total_hours": raw_total_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "pension_contribution": contribution.normalize().to_string(),
            "tier_min_hours": tier.map(|t| t.min_hours.normalize().to_string())
        }),
        reasoning,
    };

    PensionResult {
        contribution,
        audit_step,
    }
}
