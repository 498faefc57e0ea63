use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use daily_pulse_core::performance::advice;
use daily_pulse_core::performance::input::BusinessDayInput;
use daily_pulse_core::performance::metrics::DerivedMetrics;
use daily_pulse_core::performance::pipeline;

use crate::input;

/// Business-day figures, from a JSON file, piped stdin, or individual flags
#[derive(Args, Debug, Default)]
#[command(allow_hyphen_values = true)]
pub struct BusinessDayArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Revenue booked today
    #[arg(long)]
    pub today_revenue: Option<Decimal>,

    /// Total cost incurred today
    #[arg(long)]
    pub today_cost: Option<Decimal>,

    /// Customers acquired today
    #[arg(long)]
    pub today_customers: Option<u64>,

    /// Prior-day revenue
    #[arg(long)]
    pub yesterday_revenue: Option<Decimal>,

    /// Prior-day cost
    #[arg(long)]
    pub yesterday_cost: Option<Decimal>,

    /// Prior-day customers
    #[arg(long)]
    pub yesterday_customers: Option<u64>,
}

impl BusinessDayArgs {
    fn has_field_flags(&self) -> bool {
        self.today_revenue.is_some()
            || self.today_cost.is_some()
            || self.today_customers.is_some()
            || self.yesterday_revenue.is_some()
            || self.yesterday_cost.is_some()
            || self.yesterday_customers.is_some()
    }

    fn to_input(&self) -> BusinessDayInput {
        BusinessDayInput {
            today_revenue: self.today_revenue,
            today_cost: self.today_cost,
            today_customers: self.today_customers,
            yesterday_revenue: self.yesterday_revenue,
            yesterday_cost: self.yesterday_cost,
            yesterday_customers: self.yesterday_customers,
        }
    }
}

/// Arguments for the full analysis pipeline
#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub day: BusinessDayArgs,
}

/// Arguments for metrics-only calculation
#[derive(Args)]
pub struct MetricsArgs {
    #[command(flatten)]
    pub day: BusinessDayArgs,
}

/// Arguments for advice generation
#[derive(Args)]
pub struct AdviceArgs {
    /// Path to JSON file holding a derived-metrics record
    #[arg(long)]
    pub input: Option<String>,
}

/// Resolve the incoming record. Missing required fields are left as `None`
/// so the validator can name them.
fn read_business_day(args: &BusinessDayArgs) -> Result<BusinessDayInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if args.has_field_flags() {
        return Ok(args.to_input());
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Ok(args.to_input())
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let day = read_business_day(&args.day)?;
    let result = pipeline::analyze_business_day(&day)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_metrics(args: MetricsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let day = read_business_day(&args.day)?;
    let result = pipeline::calculate_daily_metrics(&day)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_advice(args: AdviceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let metrics: DerivedMetrics = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <metrics.json> or stdin required for advice generation".into());
    };
    let result = advice::generate_advice(&metrics);
    Ok(serde_json::to_value(result)?)
}
