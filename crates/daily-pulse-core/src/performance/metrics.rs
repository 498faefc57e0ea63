use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::input::BusinessDayRecord;
use crate::types::{Money, Rate};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Day-over-day metrics derived from a validated business-day record.
///
/// Only `profit` is always defined. Every other field is `None` when its
/// inputs are missing or when computing it would divide by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// today_revenue - today_cost
    pub profit: Money,
    /// Revenue change vs yesterday, in percent
    pub revenue_change: Option<Rate>,
    /// Cost change vs yesterday, in percent
    pub cost_change: Option<Rate>,
    /// Customer acquisition cost today: cost / customers
    pub cac_today: Option<Money>,
    /// Customer acquisition cost yesterday
    pub cac_yesterday: Option<Money>,
    /// CAC change vs yesterday, in percent
    pub cac_increase: Option<Rate>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Percentage change of `current` relative to `base`.
///
/// A missing or zero base yields `None` rather than an error; negative bases
/// are computed normally. Overflow also yields `None`.
pub fn pct_change(current: Decimal, base: Option<Decimal>) -> Option<Rate> {
    let base = base.filter(|b| !b.is_zero())?;
    current
        .checked_sub(base)?
        .checked_div(base)?
        .checked_mul(dec!(100))
}

/// Cost per customer; `None` when there were no customers.
pub fn cost_per_customer(cost: Money, customers: u64) -> Option<Money> {
    if customers == 0 {
        return None;
    }
    cost.checked_div(Decimal::from(customers))
}

// ---------------------------------------------------------------------------
// MetricsCalculator
// ---------------------------------------------------------------------------

/// Derive profit, revenue/cost change and customer acquisition cost figures.
///
/// Total over any validated record: each division is guarded so that the
/// result is `None` instead of a fault.
pub fn compute_metrics(record: &BusinessDayRecord) -> DerivedMetrics {
    let profit = record.today_revenue.saturating_sub(record.today_cost);

    let revenue_change = pct_change(record.today_revenue, record.yesterday_revenue);
    let cost_change = pct_change(record.today_cost, record.yesterday_cost);

    let cac_today = cost_per_customer(record.today_cost, record.today_customers);
    let cac_yesterday = match (record.yesterday_cost, record.yesterday_customers) {
        (Some(cost), Some(customers)) => cost_per_customer(cost, customers),
        _ => None,
    };

    let cac_increase = cac_today.and_then(|today| pct_change(today, cac_yesterday));

    DerivedMetrics {
        profit,
        revenue_change,
        cost_change,
        cac_today,
        cac_yesterday,
        cac_increase,
    }
}

/// Explain every derived metric that came out undefined, and a profit that
/// had to be clamped to the Decimal range.
pub fn metric_warnings(record: &BusinessDayRecord, metrics: &DerivedMetrics) -> Vec<String> {
    let mut warnings = Vec::new();

    if record.today_revenue.checked_sub(record.today_cost).is_none() {
        warnings.push(
            "Profit exceeds the representable range; clamped to the nearest bound".to_string(),
        );
    }

    if metrics.revenue_change.is_none() {
        warnings.push(match record.yesterday_revenue {
            None => "No prior-day revenue available; revenue change is undefined".to_string(),
            Some(v) if v.is_zero() => {
                "Prior-day revenue is zero; revenue change is undefined".to_string()
            }
            Some(_) => "Revenue change overflowed; reported as undefined".to_string(),
        });
    }

    if metrics.cost_change.is_none() {
        warnings.push(match record.yesterday_cost {
            None => "No prior-day cost available; cost change is undefined".to_string(),
            Some(v) if v.is_zero() => {
                "Prior-day cost is zero; cost change is undefined".to_string()
            }
            Some(_) => "Cost change overflowed; reported as undefined".to_string(),
        });
    }

    if metrics.cac_today.is_none() {
        warnings.push("No customers today; CAC is undefined".to_string());
    }

    if metrics.cac_yesterday.is_none() {
        match (record.yesterday_cost, record.yesterday_customers) {
            (Some(_), Some(0)) => warnings
                .push("No customers yesterday; prior-day CAC is undefined".to_string()),
            _ => warnings.push(
                "Prior-day cost or customers missing; prior-day CAC is undefined".to_string(),
            ),
        }
    } else if metrics.cac_yesterday == Some(Decimal::ZERO) {
        warnings.push("Prior-day CAC is zero; CAC increase is undefined".to_string());
    } else if metrics.cac_today.is_some() && metrics.cac_increase.is_none() {
        warnings.push("CAC increase overflowed; reported as undefined".to_string());
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        today: (Decimal, Decimal, u64),
        yesterday: (Option<Decimal>, Option<Decimal>, Option<u64>),
    ) -> BusinessDayRecord {
        BusinessDayRecord {
            today_revenue: today.0,
            today_cost: today.1,
            today_customers: today.2,
            yesterday_revenue: yesterday.0,
            yesterday_cost: yesterday.1,
            yesterday_customers: yesterday.2,
        }
    }

    #[test]
    fn test_profit_is_revenue_minus_cost() {
        let r = record((dec!(12000), dec!(8000), 100), (None, None, None));
        assert_eq!(compute_metrics(&r).profit, dec!(4000));

        let r = record((dec!(6000), dec!(8000), 40), (None, None, None));
        assert_eq!(compute_metrics(&r).profit, dec!(-2000));
    }

    #[test]
    fn test_revenue_and_cost_change() {
        // (12000 - 10000) / 10000 * 100 = 20
        // (8000 - 10000) / 10000 * 100 = -20
        let r = record(
            (dec!(12000), dec!(8000), 100),
            (Some(dec!(10000)), Some(dec!(10000)), Some(80)),
        );
        let m = compute_metrics(&r);
        assert_eq!(m.revenue_change, Some(dec!(20)));
        assert_eq!(m.cost_change, Some(dec!(-20)));
    }

    #[test]
    fn test_zero_base_treated_as_absent() {
        let r = record(
            (dec!(500), dec!(100), 5),
            (Some(dec!(0)), Some(dec!(0)), Some(0)),
        );
        let m = compute_metrics(&r);
        assert_eq!(m.revenue_change, None);
        assert_eq!(m.cost_change, None);
        assert_eq!(m.cac_yesterday, None);
        assert_eq!(m.cac_increase, None);
        assert_eq!(m.cac_today, Some(dec!(20)));
    }

    #[test]
    fn test_negative_base_computed_normally() {
        // (50 - (-100)) / -100 * 100 = -150
        let r = record((dec!(50), dec!(10), 1), (Some(dec!(-100)), None, None));
        assert_eq!(compute_metrics(&r).revenue_change, Some(dec!(-150)));
    }

    #[test]
    fn test_cac_figures() {
        // cac_today = 10000 / 20 = 500, cac_yesterday = 5000 / 50 = 100
        // cac_increase = (500 - 100) / 100 * 100 = 400
        let r = record(
            (dec!(10000), dec!(10000), 20),
            (Some(dec!(10000)), Some(dec!(5000)), Some(50)),
        );
        let m = compute_metrics(&r);
        assert_eq!(m.cac_today, Some(dec!(500)));
        assert_eq!(m.cac_yesterday, Some(dec!(100)));
        assert_eq!(m.cac_increase, Some(dec!(400)));
    }

    #[test]
    fn test_no_customers_today_leaves_cac_undefined() {
        let r = record(
            (dec!(100), dec!(50), 0),
            (Some(dec!(100)), Some(dec!(50)), Some(10)),
        );
        let m = compute_metrics(&r);
        assert_eq!(m.cac_today, None);
        assert_eq!(m.cac_yesterday, Some(dec!(5)));
        assert_eq!(m.cac_increase, None);
    }

    #[test]
    fn test_prior_cac_needs_both_cost_and_customers() {
        let r = record((dec!(100), dec!(50), 5), (None, Some(dec!(50)), None));
        assert_eq!(compute_metrics(&r).cac_yesterday, None);

        let r = record((dec!(100), dec!(50), 5), (None, None, Some(5)));
        assert_eq!(compute_metrics(&r).cac_yesterday, None);
    }

    #[test]
    fn test_zero_prior_cac_suppresses_increase() {
        let r = record((dec!(100), dec!(50), 5), (None, Some(dec!(0)), Some(5)));
        let m = compute_metrics(&r);
        assert_eq!(m.cac_yesterday, Some(dec!(0)));
        assert_eq!(m.cac_increase, None);
        assert!(metric_warnings(&r, &m)
            .iter()
            .any(|w| w.contains("CAC increase is undefined")));
    }

    #[test]
    fn test_pct_change_overflow_is_undefined() {
        assert_eq!(pct_change(Decimal::MAX, Some(dec!(0.0000001))), None);
    }

    #[test]
    fn test_profit_saturates_instead_of_overflowing() {
        let r = record((Decimal::MAX, dec!(-1), 1), (None, None, None));
        let m = compute_metrics(&r);
        assert_eq!(m.profit, Decimal::MAX);
        assert!(metric_warnings(&r, &m)[0].contains("Profit exceeds the representable range"));

        let r = record((Decimal::MIN, dec!(1), 1), (None, None, None));
        assert_eq!(compute_metrics(&r).profit, Decimal::MIN);
    }

    #[test]
    fn test_cac_increase_overflow_is_explained() {
        // cac_today = MAX, cac_yesterday = 0.0000001 / 1: the change overflows
        let r = record(
            (dec!(1), Decimal::MAX, 1),
            (None, Some(dec!(0.0000001)), Some(1)),
        );
        let m = compute_metrics(&r);
        assert_eq!(m.cac_today, Some(Decimal::MAX));
        assert_eq!(m.cac_yesterday, Some(dec!(0.0000001)));
        assert_eq!(m.cac_increase, None);
        assert!(metric_warnings(&r, &m)
            .iter()
            .any(|w| w == "CAC increase overflowed; reported as undefined"));
    }

    #[test]
    fn test_warnings_explain_missing_prior_day() {
        let r = record((dec!(12000), dec!(8000), 100), (None, None, None));
        let m = compute_metrics(&r);
        let warnings = metric_warnings(&r, &m);
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("No prior-day revenue"));
        assert!(warnings[1].contains("No prior-day cost"));
        assert!(warnings[2].contains("prior-day CAC is undefined"));
    }

    #[test]
    fn test_no_warnings_when_everything_defined() {
        let r = record(
            (dec!(12000), dec!(8000), 100),
            (Some(dec!(10000)), Some(dec!(7000)), Some(80)),
        );
        let m = compute_metrics(&r);
        assert!(metric_warnings(&r, &m).is_empty());
    }
}
