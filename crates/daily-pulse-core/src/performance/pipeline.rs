use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::advice::{generate_advice, AdviceResult};
use super::input::{validate_input, BusinessDayInput, BusinessDayRecord};
use super::metrics::{compute_metrics, metric_warnings, DerivedMetrics};
use crate::types::{with_metadata, ComputationOutput};
use crate::PulseResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The merged record: input figures, derived metrics and advice, serialised
/// as one flat object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessDayReport {
    #[serde(flatten)]
    pub record: BusinessDayRecord,
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
    #[serde(flatten)]
    pub advice: AdviceResult,
}

fn assumptions(record: &BusinessDayRecord) -> serde_json::Value {
    serde_json::json!({
        "has_prior_day": record.has_prior_day(),
        "change_basis": "percent of prior-day value",
        "zero_or_missing_base": "undefined",
    })
}

// ---------------------------------------------------------------------------
// Function 1: calculate_daily_metrics
// ---------------------------------------------------------------------------

/// Validate the incoming record and derive the day-over-day metrics.
pub fn calculate_daily_metrics(
    input: &BusinessDayInput,
) -> PulseResult<ComputationOutput<DerivedMetrics>> {
    let start = Instant::now();

    let record = validated(input)?;
    let metrics = compute_metrics(&record);
    tracing::debug!(profit = %metrics.profit, "metrics computed");
    let warnings = metric_warnings(&record, &metrics);

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Day-over-day profit, revenue/cost change and customer acquisition cost",
        &assumptions(&record),
        warnings,
        elapsed,
        metrics,
    ))
}

// ---------------------------------------------------------------------------
// Function 2: analyze_business_day
// ---------------------------------------------------------------------------

/// Run the full pipeline: validate, compute metrics, generate advice.
///
/// Fails only when a required field is missing, before any metric is
/// computed. Each call is independent; nothing is shared between calls.
pub fn analyze_business_day(
    input: &BusinessDayInput,
) -> PulseResult<ComputationOutput<BusinessDayReport>> {
    let start = Instant::now();

    let record = validated(input)?;

    let metrics = compute_metrics(&record);
    tracing::debug!(profit = %metrics.profit, "metrics computed");

    let advice = generate_advice(&metrics);
    tracing::debug!(
        status = %advice.profit_status,
        recommendations = advice.recommendations.len(),
        alerts = advice.alerts.len(),
        "advice generated"
    );

    let warnings = metric_warnings(&record, &metrics);
    let assumptions = assumptions(&record);

    let report = BusinessDayReport {
        record,
        metrics,
        advice,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Daily business performance: metrics derivation and rule-based advice",
        &assumptions,
        warnings,
        elapsed,
        report,
    ))
}

/// Run the full pipeline on a JSON-encoded business-day record.
pub fn analyze_json(input_json: &str) -> PulseResult<ComputationOutput<BusinessDayReport>> {
    let input: BusinessDayInput = serde_json::from_str(input_json)?;
    analyze_business_day(&input)
}

fn validated(input: &BusinessDayInput) -> PulseResult<BusinessDayRecord> {
    match validate_input(input) {
        Ok(record) => {
            tracing::debug!(has_prior_day = record.has_prior_day(), "input validated");
            Ok(record)
        }
        Err(e) => {
            tracing::warn!(error = %e, "input rejected");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PulseError;
    use crate::performance::advice::{ProfitStatus, REC_STABLE};
    use rust_decimal_macros::dec;

    fn profitable_day() -> BusinessDayInput {
        BusinessDayInput {
            today_revenue: Some(dec!(12000)),
            today_cost: Some(dec!(8000)),
            today_customers: Some(100),
            yesterday_revenue: Some(dec!(10000)),
            yesterday_cost: Some(dec!(7000)),
            yesterday_customers: Some(80),
        }
    }

    #[test]
    fn test_report_merges_all_stages() {
        let out = analyze_business_day(&profitable_day()).unwrap();
        let r = &out.result;
        assert_eq!(r.record.today_revenue, dec!(12000));
        assert_eq!(r.metrics.profit, dec!(4000));
        assert_eq!(r.metrics.revenue_change, Some(dec!(20)));
        assert_eq!(r.advice.profit_status, ProfitStatus::Profit);
        assert!(out.warnings.is_empty());
        assert_eq!(out.assumptions["has_prior_day"], serde_json::json!(true));
    }

    #[test]
    fn test_missing_field_fails_before_metrics() {
        let mut input = profitable_day();
        input.today_revenue = None;
        let err = analyze_business_day(&input).unwrap_err();
        assert!(matches!(err, PulseError::MissingRequiredField { ref field } if field == "today_revenue"));

        let err = calculate_daily_metrics(&input).unwrap_err();
        assert_eq!(err.field(), Some("today_revenue"));
    }

    #[test]
    fn test_report_serialises_flat() {
        let out = analyze_business_day(&profitable_day()).unwrap();
        let v = serde_json::to_value(&out.result).unwrap();
        let obj = v.as_object().unwrap();
        for key in [
            "today_revenue",
            "today_cost",
            "today_customers",
            "yesterday_revenue",
            "yesterday_cost",
            "yesterday_customers",
            "profit",
            "revenue_change",
            "cost_change",
            "cac_today",
            "cac_yesterday",
            "cac_increase",
            "profit_status",
            "recommendations",
            "alerts",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(obj["profit_status"], serde_json::json!("profit"));
    }

    #[test]
    fn test_analyze_json() {
        let out = analyze_json(
            r#"{"today_revenue": 6000, "today_cost": 8000, "today_customers": 40}"#,
        )
        .unwrap();
        assert_eq!(out.result.metrics.profit, dec!(-2000));
        assert_eq!(out.result.advice.profit_status, ProfitStatus::Loss);

        let err = analyze_json(r#"{"today_cost": 8000, "today_customers": 40}"#).unwrap_err();
        assert_eq!(err.field(), Some("today_revenue"));

        let err = analyze_json("not json").unwrap_err();
        assert!(matches!(err, PulseError::SerializationError(_)));
    }

    #[test]
    fn test_metrics_only_carries_warnings() {
        let input = BusinessDayInput {
            today_revenue: Some(dec!(100)),
            today_cost: Some(dec!(40)),
            today_customers: Some(0),
            ..Default::default()
        };
        let out = calculate_daily_metrics(&input).unwrap();
        assert_eq!(out.result.profit, dec!(60));
        assert_eq!(out.result.cac_today, None);
        assert!(out.warnings.iter().any(|w| w.contains("No customers today")));
        let advice = generate_advice(&out.result);
        assert_eq!(advice.recommendations, vec![REC_STABLE.to_string()]);
    }
}
