//! Retirement planning: corpus needed to fund inflating expenses, and the
//! monthly SIP that closes the gap left by existing savings

use log::debug;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::{InputIssue, ProjectionError, Result};
use crate::projection::{Instrument, ProjectionResult};
use super::{monthly_rate, plan_monthly_savings, SavingsPlan};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,

    /// Monthly expenses in today's money
    pub monthly_expense: f64,

    pub inflation_percent: f64,
    pub pre_retirement_return_percent: f64,
    pub post_retirement_return_percent: f64,

    #[serde(default)]
    pub existing_savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementPlan {
    /// Monthly expense at the retirement date
    pub future_monthly_expense: f64,

    /// Corpus required on the retirement date
    pub corpus_required: f64,

    pub savings_future_value: f64,
    pub shortfall: f64,
    pub required_monthly_sip: f64,

    /// Month-by-month growth of savings plus the required SIP
    pub accumulation: ProjectionResult,
}

/// Present value at retirement of expenses paid at the start of each year,
/// growing with inflation and discounted at the post-retirement return
fn corpus_for(annual_expense: f64, inflation: f64, post_return: f64, years: u32) -> f64 {
    if (post_return - inflation).abs() < 1e-12 {
        return annual_expense * years as f64;
    }
    let ratio = (1.0 + inflation) / (1.0 + post_return);
    annual_expense * (1.0 + post_return) * (1.0 - ratio.powi(years as i32)) / (post_return - inflation)
}

pub fn project_retirement(input: &RetirementInput, assumptions: &Assumptions) -> Result<RetirementPlan> {
    let limits = &assumptions.limits;

    let expense = limits.positive_amount("monthly_expense", input.monthly_expense)?;
    let inflation = limits.annual_rate("inflation_percent", input.inflation_percent)?;
    let pre = limits.annual_rate("pre_retirement_return_percent", input.pre_retirement_return_percent)?;
    let post = limits.annual_rate("post_retirement_return_percent", input.post_retirement_return_percent)?;
    let savings = limits.non_negative_amount("existing_savings", input.existing_savings)?;

    if input.retirement_age <= input.current_age {
        return Err(ProjectionError::invalid(
            "retirement_age",
            InputIssue::Inconsistent("must be later than current_age".into()),
        ));
    }
    if input.life_expectancy <= input.retirement_age {
        return Err(ProjectionError::invalid(
            "life_expectancy",
            InputIssue::Inconsistent("must be later than retirement_age".into()),
        ));
    }

    let years_to_retire = limits.tenure_years("retirement_age", input.retirement_age - input.current_age)?;
    let retirement_years = limits.tenure_years("life_expectancy", input.life_expectancy - input.retirement_age)?;

    let future_monthly_expense = expense * (1.0 + inflation / 100.0).powi(years_to_retire as i32);
    let corpus_required = corpus_for(
        future_monthly_expense * 12.0,
        inflation / 100.0,
        post / 100.0,
        retirement_years,
    );

    let SavingsPlan { savings_future_value, shortfall, required_monthly_sip, accumulation } =
        plan_monthly_savings(
            Instrument::Retirement,
            corpus_required,
            savings,
            monthly_rate(pre),
            years_to_retire * 12,
        )?;

    debug!(
        "Retirement at {}: corpus {:.2}, shortfall {:.2}, SIP {:.2}",
        input.retirement_age, corpus_required, shortfall, required_monthly_sip
    );

    Ok(RetirementPlan {
        future_monthly_expense,
        corpus_required,
        savings_future_value,
        shortfall,
        required_monthly_sip,
        accumulation,
    })
}
