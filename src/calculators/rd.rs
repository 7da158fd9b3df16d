//! Recurring deposit with bank-style quarterly interest posting
//!
//! Interest accrues every month as simple interest (`r/1200`) on the balance
//! after that month's deposit. Accrued interest is credited to the balance,
//! and so starts compounding, at the end of every third month and at maturity.
//! A deposit held for one full quarter therefore grows by exactly `r/400`.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::Result;
use crate::inputs::InvestmentInput;
use crate::projection::{BalanceState, Instrument, PeriodUnit, ProjectionResult};
use super::monthly_rate;

/// Months between interest postings
pub const POSTING_INTERVAL_MONTHS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RdInput {
    pub monthly_deposit: f64,
    pub annual_rate_percent: f64,
    pub tenure_months: u32,
}

impl From<&InvestmentInput> for RdInput {
    fn from(input: &InvestmentInput) -> Self {
        Self {
            monthly_deposit: input.amount,
            annual_rate_percent: input.annual_rate_percent,
            tenure_months: input.tenure.in_months(),
        }
    }
}

/// Project a recurring deposit month by month
///
/// Each row's `interest_accrued` is the interest credited that month, which is
/// zero except in posting months.
pub fn project_rd(input: &RdInput, assumptions: &Assumptions) -> Result<ProjectionResult> {
    let limits = &assumptions.limits;
    let deposit = limits.positive_amount("monthly_deposit", input.monthly_deposit)?;
    let rate = limits.annual_rate("annual_rate_percent", input.annual_rate_percent)?;
    let months = limits.tenure_months("tenure_months", input.tenure_months)?;

    let i = monthly_rate(rate);
    let mut result = ProjectionResult::new(Instrument::RecurringDeposit, PeriodUnit::Month);
    let mut state = BalanceState::new();
    let mut pending_interest = 0.0;

    for month in 1..=months {
        pending_interest += (state.balance + deposit) * i;

        let posting = month % POSTING_INTERVAL_MONTHS == 0 || month == months;
        let credited = if posting { std::mem::take(&mut pending_interest) } else { 0.0 };

        result.add_row(state.advance_with_credit(deposit, credited));
    }

    let maturity_value = state.balance;
    debug!("RD {} x {} months at {}%: {:.2}", deposit, months, rate, maturity_value);

    result.finish(months, deposit * months as f64, maturity_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rd(deposit: f64, rate: f64, months: u32) -> ProjectionResult {
        project_rd(
            &RdInput { monthly_deposit: deposit, annual_rate_percent: rate, tenure_months: months },
            &Assumptions::standard(),
        )
        .unwrap()
    }

    #[test]
    fn test_single_quarter() {
        // 1000 held 3 months, 2000 held 2 months, 3000 held 1 month, at 1% per month simple
        let result = rd(1000.0, 12.0, 3);
        assert_relative_eq!(result.maturity_value, 3000.0 + 30.0 + 20.0 + 10.0, epsilon = 1e-9);
        assert_eq!(result.schedule[0].interest_accrued, 0.0);
        assert_eq!(result.schedule[1].interest_accrued, 0.0);
        assert_relative_eq!(result.schedule[2].interest_accrued, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_single_month_posts_at_maturity() {
        let result = rd(1000.0, 8.0, 1);
        assert_relative_eq!(result.maturity_value, 1000.0 * (1.0 + 0.08 / 12.0), epsilon = 1e-9);
    }

    #[test]
    fn test_interest_compounds_after_posting() {
        let result = rd(1000.0, 12.0, 6);
        let first_quarter = result.schedule[2].closing_balance;
        // Month 4 accrual includes interest on the posted first-quarter interest
        let second_quarter_credit = result.schedule[5].interest_accrued;
        let simple_only = (first_quarter + 1000.0) * 0.01
            + (first_quarter + 2000.0) * 0.01
            + (first_quarter + 3000.0) * 0.01;
        assert_relative_eq!(second_quarter_credit, simple_only, epsilon = 1e-9);
        assert!(result.maturity_value > 6000.0 + 2.0 * 60.0);
    }

    #[test]
    fn test_partial_final_quarter_is_posted_at_maturity() {
        let result = rd(500.0, 7.0, 13);
        assert_eq!(result.schedule.len(), 13);
        assert!(result.schedule[12].interest_accrued > 0.0);
        assert_relative_eq!(result.final_balance(), result.maturity_value);
        assert!(result.schedule.iter().all(|r| r.rollforward_error() < 1e-9));
    }

    #[test]
    fn test_zero_rate() {
        let result = rd(2000.0, 0.0, 24);
        assert_eq!(result.maturity_value, 48_000.0);
        assert_eq!(result.total_interest_earned, 0.0);
    }

    #[test]
    fn test_monotonic_in_rate() {
        let low = rd(5000.0, 6.5, 60).maturity_value;
        let high = rd(5000.0, 7.0, 60).maturity_value;
        assert!(high > low);
    }
}
