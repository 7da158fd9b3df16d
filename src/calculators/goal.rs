//! Goal planning: what to invest, monthly or once, to afford a future cost

use log::debug;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::Result;
use crate::projection::{Instrument, ProjectionResult};
use super::{monthly_rate, plan_monthly_savings, SavingsPlan};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalInput {
    /// Cost of the goal in today's money
    pub target_amount: f64,
    pub years: u32,
    pub inflation_percent: f64,
    pub annual_rate_percent: f64,
    #[serde(default)]
    pub existing_savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalPlan {
    /// Cost of the goal when it falls due
    pub inflated_target: f64,
    pub savings_future_value: f64,
    pub shortfall: f64,
    pub required_monthly_sip: f64,
    /// One-time investment today that alone covers the shortfall
    pub required_lumpsum: f64,
    pub accumulation: ProjectionResult,
}

pub fn project_goal(input: &GoalInput, assumptions: &Assumptions) -> Result<GoalPlan> {
    let limits = &assumptions.limits;
    let target = limits.positive_amount("target_amount", input.target_amount)?;
    let years = limits.tenure_years("years", input.years)?;
    let inflation = limits.annual_rate("inflation_percent", input.inflation_percent)?;
    let rate = limits.annual_rate("annual_rate_percent", input.annual_rate_percent)?;
    let savings = limits.non_negative_amount("existing_savings", input.existing_savings)?;

    let inflated_target = target * (1.0 + inflation / 100.0).powi(years as i32);
    let i = monthly_rate(rate);
    let months = years * 12;

    let SavingsPlan { savings_future_value, shortfall, required_monthly_sip, accumulation } =
        plan_monthly_savings(Instrument::Goal, inflated_target, savings, i, months)?;

    let required_lumpsum = shortfall / (1.0 + i).powi(months as i32);

    debug!(
        "Goal {:.2} in {}y: SIP {:.2} or lumpsum {:.2}",
        inflated_target, years, required_monthly_sip, required_lumpsum
    );

    Ok(GoalPlan {
        inflated_target,
        savings_future_value,
        shortfall,
        required_monthly_sip,
        required_lumpsum,
        accumulation,
    })
}
