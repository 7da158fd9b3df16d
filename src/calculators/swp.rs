//! Systematic Withdrawal Plan: fixed monthly withdrawals from a growing corpus

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::{InputIssue, ProjectionError, Result};
use crate::projection::{BalanceState, Instrument, PeriodUnit, ProjectionResult};
use super::monthly_rate;

/// Balances at or below this are treated as fully drawn down
const EXHAUSTION_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwpInput {
    pub corpus: f64,
    pub monthly_withdrawal: f64,
    pub annual_rate_percent: f64,

    /// Months to run; defaults to the configured withdrawal ceiling
    #[serde(default)]
    pub tenure_months: Option<u32>,
}

/// How a withdrawal schedule ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SwpOutcome {
    /// The corpus ran out; `period` is the month of the last (possibly partial) withdrawal
    Exhausted { period: u32, last_withdrawal: f64 },
    /// Every requested month was paid in full
    Completed { remaining_corpus: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwpProjection {
    pub schedule: ProjectionResult,
    pub outcome: SwpOutcome,
}

impl SwpProjection {
    pub fn is_exhausted(&self) -> bool {
        matches!(self.outcome, SwpOutcome::Exhausted { .. })
    }
}

/// Project a SWP
///
/// Each month the withdrawal comes out first and the remainder grows:
/// `closing = (opening - withdrawal) * (1 + r/1200)`. The loop is bounded by
/// the tenure, which itself may not exceed `limits.max_withdrawal_months`.
pub fn project_swp(input: &SwpInput, assumptions: &Assumptions) -> Result<SwpProjection> {
    let limits = &assumptions.limits;
    let corpus = limits.positive_amount("corpus", input.corpus)?;
    let withdrawal = limits.positive_amount("monthly_withdrawal", input.monthly_withdrawal)?;
    let rate = limits.annual_rate("annual_rate_percent", input.annual_rate_percent)?;

    let ceiling = limits.max_withdrawal_months;
    let months = match input.tenure_months {
        None => ceiling,
        Some(0) => return Err(ProjectionError::invalid("tenure_months", InputIssue::NotPositive)),
        Some(months) if months > ceiling => {
            return Err(ProjectionError::invalid(
                "tenure_months",
                InputIssue::OutOfRange { min: 1.0, max: ceiling as f64 },
            ))
        }
        Some(months) => months,
    };

    let i = monthly_rate(rate);
    let mut result = ProjectionResult::new(Instrument::Swp, PeriodUnit::Month);
    let mut state = BalanceState::with_opening(corpus);
    let mut outcome = None;

    for month in 1..=months {
        let opening = state.balance;

        if opening - withdrawal <= EXHAUSTION_EPSILON {
            // Final payout drains whatever is left
            result.add_row(state.advance(0.0, opening, i));
            outcome = Some(SwpOutcome::Exhausted { period: month, last_withdrawal: opening });
            break;
        }

        result.add_row(state.advance(0.0, withdrawal, i));
    }

    let outcome = outcome.unwrap_or(SwpOutcome::Completed { remaining_corpus: state.balance });

    match &outcome {
        SwpOutcome::Exhausted { period, .. } => {
            debug!("SWP {} from {:.2} at {}%: exhausted in month {}", withdrawal, corpus, rate, period)
        }
        SwpOutcome::Completed { remaining_corpus } if input.tenure_months.is_none() => {
            warn!(
                "SWP {} from {:.2} at {}% still holds {:.2} at the {}-month cutoff",
                withdrawal, corpus, rate, remaining_corpus, ceiling
            )
        }
        SwpOutcome::Completed { remaining_corpus } => {
            debug!("SWP completed {} months with {:.2} left", months, remaining_corpus)
        }
    }

    let tenure = result.schedule.len() as u32;
    let maturity_value = state.balance;
    Ok(SwpProjection {
        schedule: result.finish(tenure, corpus, maturity_value)?,
        outcome,
    })
}
