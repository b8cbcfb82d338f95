//! Hours calculation.
//!
//! Converts hours and minutes into decimal hours, keeping both the raw
//! value (which selects the ATP tier) and the quarter-hour rounded value
//! (which is what gets paid).

use rust_decimal::Decimal;

use super::rounding::round_quarter_hour;
use crate::models::AuditStep;

/// Raw and paid hours, with the audit step recording the rounding.
#[derive(Debug, Clone)]
pub struct HoursResult {
    /// `hours + minutes / 60`, unrounded.
    pub raw_total_hours: Decimal,
    /// Raw hours rounded to the nearest quarter hour.
    pub total_hours: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes raw and quarter-hour rounded hours.
///
/// # Examples
///
/// ```
/// use dk_wage_engine::calculation::calculate_hours;
/// use rust_decimal::Decimal;
///
/// let result = calculate_hours(37, 30, 1);
/// assert_eq!(result.raw_total_hours, Decimal::new(375, 1));
/// assert_eq!(result.total_hours, Decimal::new(375, 1));
///
/// // 7 minutes is closer to 0 than to 15
/// let result = calculate_hours(10, 7, 1);
/// assert_eq!(result.total_hours, Decimal::new(10, 0));
/// ```
pub fn calculate_hours(hours_worked: u32, minutes_worked: u32, step_number: u32) -> HoursResult {
    let raw_total_hours =
        Decimal::from(hours_worked) + Decimal::from(minutes_worked) / Decimal::from(60);
    let total_hours = round_quarter_hour(raw_total_hours);

    let audit_step = AuditStep {
        step_number,
        rule_id: "quarter_hour_rounding".to_string(),
        rule_name: "Quarter Hour Rounding".to_string(),
        input: serde_json::json!({
            "hours_worked": hours_worked,
            "minutes_worked": minutes_worked
        }),
        output: serde_json::json!({
            "raw_total_hours": raw_total_hours.normalize().to_string(),
            "total_hours": total_hours.normalize().to_string()
        }),
        reasoning: format!(
            "{}h {}m = {} hours, rounded to nearest quarter hour = {}",
            hours_worked,
            minutes_worked,
            raw_total_hours.round_dp(4).normalize(),
            total_hours.normalize()
        ),
    };

    HoursResult {
        raw_total_hours,
        total_hours,
        audit_step,
    }
}
