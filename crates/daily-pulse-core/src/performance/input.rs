use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::PulseError;
use crate::types::Money;
use crate::PulseResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Incoming business-day figures as supplied by the caller.
///
/// Every field is optional so that an incomplete record can still be
/// deserialised and then rejected by [`validate_input`] with the name of the
/// missing field. A JSON `null` is read as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessDayInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today_revenue: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today_cost: Option<Money>,
    #[serde(
        default,
        deserialize_with = "customer_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub today_customers: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yesterday_revenue: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yesterday_cost: Option<Money>,
    #[serde(
        default,
        deserialize_with = "customer_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub yesterday_customers: Option<u64>,
}

/// Customer counts arrive as JSON integers or as whole-number floats
/// (`100.0`). Fractional or negative counts are rejected.
fn customer_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Whole(u64),
        Float(f64),
    }

    match Option::<Count>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Count::Whole(n)) => Ok(Some(n)),
        Some(Count::Float(f)) if f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 => {
            Ok(Some(f as u64))
        }
        Some(Count::Float(f)) => Err(D::Error::custom(format!(
            "customer count must be a non-negative whole number, got {f}"
        ))),
    }
}

/// A business-day record whose required fields are known to be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessDayRecord {
    /// Revenue booked today
    pub today_revenue: Money,
    /// Total cost incurred today
    pub today_cost: Money,
    /// Customers acquired today
    pub today_customers: u64,
    /// Prior-day revenue; `None` means no prior-day data
    pub yesterday_revenue: Option<Money>,
    /// Prior-day cost
    pub yesterday_cost: Option<Money>,
    /// Prior-day customers
    pub yesterday_customers: Option<u64>,
}

impl BusinessDayRecord {
    /// True when at least one prior-day figure was supplied.
    pub fn has_prior_day(&self) -> bool {
        self.yesterday_revenue.is_some()
            || self.yesterday_cost.is_some()
            || self.yesterday_customers.is_some()
    }
}

impl From<BusinessDayRecord> for BusinessDayInput {
    fn from(record: BusinessDayRecord) -> Self {
        BusinessDayInput {
            today_revenue: Some(record.today_revenue),
            today_cost: Some(record.today_cost),
            today_customers: Some(record.today_customers),
            yesterday_revenue: record.yesterday_revenue,
            yesterday_cost: record.yesterday_cost,
            yesterday_customers: record.yesterday_customers,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn required<T: Copy>(value: Option<T>, field: &str) -> PulseResult<T> {
    value.ok_or_else(|| PulseError::MissingRequiredField {
        field: field.to_string(),
    })
}

/// Check that today's revenue, cost and customer count are present, in that
/// order, and pass the figures through unchanged.
///
/// Values are not range-checked: a negative revenue is accepted as given.
pub fn validate_input(input: &BusinessDayInput) -> PulseResult<BusinessDayRecord> {
    let record = BusinessDayRecord {
        today_revenue: required(input.today_revenue, "today_revenue")?,
        today_cost: required(input.today_cost, "today_cost")?,
        today_customers: required(input.today_customers, "today_customers")?,
        yesterday_revenue: input.yesterday_revenue,
        yesterday_cost: input.yesterday_cost,
        yesterday_customers: input.yesterday_customers,
    };
    Ok(record)
}
