use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::metrics::DerivedMetrics;
use crate::types::Rate;

// ---------------------------------------------------------------------------
// Rule thresholds and messages
// ---------------------------------------------------------------------------

/// CAC increase (in percent) above which the marketing rule fires.
pub const CAC_INCREASE_THRESHOLD: Rate = dec!(20);

pub const REC_REDUCE_COSTS: &str = "Reduce costs if profit is negative.";
pub const REC_REVIEW_MARKETING: &str =
    "Review marketing campaigns if CAC increased significantly.";
pub const REC_INCREASE_ADVERTISING: &str =
    "Consider increasing advertising budget if sales are growing.";
pub const REC_STABLE: &str = "Metrics stable. Continue current strategy.";

pub const ALERT_NEGATIVE_PROFIT: &str = "Warning: Negative profit detected.";
pub const ALERT_CAC_INCREASE: &str = "Alert: CAC increased by more than 20%.";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Whether the day closed in profit (including break-even) or at a loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfitStatus {
    Profit,
    Loss,
}

impl ProfitStatus {
    pub fn from_profit(profit: Decimal) -> Self {
        if profit >= Decimal::ZERO {
            ProfitStatus::Profit
        } else {
            ProfitStatus::Loss
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfitStatus::Profit => "profit",
            ProfitStatus::Loss => "loss",
        }
    }
}

impl std::fmt::Display for ProfitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status label plus the recommendations and alerts triggered by the rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceResult {
    pub profit_status: ProfitStatus,
    /// Never empty: falls back to a single "stable" message
    pub recommendations: Vec<String>,
    pub alerts: Vec<String>,
}

// ---------------------------------------------------------------------------
// AdviceGenerator
// ---------------------------------------------------------------------------

/// Apply the advice rules in fixed order. Every matching rule contributes;
/// the stable fallback only appears when none did.
pub fn generate_advice(metrics: &DerivedMetrics) -> AdviceResult {
    let mut recommendations: Vec<String> = Vec::new();
    let mut alerts: Vec<String> = Vec::new();

    if metrics.profit < Decimal::ZERO {
        recommendations.push(REC_REDUCE_COSTS.to_string());
        alerts.push(ALERT_NEGATIVE_PROFIT.to_string());
    }

    if metrics
        .cac_increase
        .is_some_and(|increase| increase > CAC_INCREASE_THRESHOLD)
    {
        recommendations.push(REC_REVIEW_MARKETING.to_string());
        alerts.push(ALERT_CAC_INCREASE.to_string());
    }

    if metrics
        .revenue_change
        .is_some_and(|change| change > Decimal::ZERO)
    {
        recommendations.push(REC_INCREASE_ADVERTISING.to_string());
    }

    if recommendations.is_empty() {
        recommendations.push(REC_STABLE.to_string());
    }

    AdviceResult {
        profit_status: ProfitStatus::from_profit(metrics.profit),
        recommendations,
        alerts,
    }
}
