//! Systematic Investment Plan: fixed monthly contributions into a growth fund

use log::debug;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::Result;
use crate::inputs::InvestmentInput;
use crate::projection::{BalanceState, Instrument, PeriodUnit, ProjectionResult};
use super::monthly_rate;

/// Monthly SIP parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipInput {
    pub monthly_amount: f64,
    pub annual_rate_percent: f64,
    pub tenure_months: u32,
}

impl From<&InvestmentInput> for SipInput {
    fn from(input: &InvestmentInput) -> Self {
        Self {
            monthly_amount: input.amount,
            annual_rate_percent: input.annual_rate_percent,
            tenure_months: input.tenure.in_months(),
        }
    }
}

/// SIP whose monthly amount rises once a year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepUpSipInput {
    /// Contribution during the first twelve months
    pub monthly_amount: f64,
    /// Raise applied at the start of every later year (10.0 = 10%)
    pub annual_step_up_percent: f64,
    pub annual_rate_percent: f64,
    pub tenure_months: u32,
}

/// Future value of 1 paid at the start of each of `months` months
///
/// `((1+i)^n - 1) / i * (1+i)`, degrading to `n` at a zero rate.
pub fn sip_growth_factor(monthly_rate: f64, months: u32) -> f64 {
    if monthly_rate == 0.0 {
        return months as f64;
    }
    let compounded = (1.0 + monthly_rate).powi(months as i32);
    (compounded - 1.0) / monthly_rate * (1.0 + monthly_rate)
}

/// Project a monthly SIP
pub fn project_sip(input: &SipInput, assumptions: &Assumptions) -> Result<ProjectionResult> {
    let limits = &assumptions.limits;
    let amount = limits.positive_amount("monthly_amount", input.monthly_amount)?;
    let rate = limits.annual_rate("annual_rate_percent", input.annual_rate_percent)?;
    let months = limits.tenure_months("tenure_months", input.tenure_months)?;

    let i = monthly_rate(rate);
    let maturity_value = amount * sip_growth_factor(i, months);
    debug!("SIP {} x {} months at {}%: {:.2}", amount, months, rate, maturity_value);

    accumulate(Instrument::Sip, 0.0, amount, i, months, maturity_value)
}

/// Project a SIP with an annual step-up in contribution
pub fn project_step_up_sip(input: &StepUpSipInput, assumptions: &Assumptions) -> Result<ProjectionResult> {
    let limits = &assumptions.limits;
    let amount = limits.positive_amount("monthly_amount", input.monthly_amount)?;
    let step_up = limits.annual_rate("annual_step_up_percent", input.annual_step_up_percent)?;
    let rate = limits.annual_rate("annual_rate_percent", input.annual_rate_percent)?;
    let months = limits.tenure_months("tenure_months", input.tenure_months)?;

    let i = monthly_rate(rate);
    let mut result = ProjectionResult::new(Instrument::StepUpSip, PeriodUnit::Month);
    let mut state = BalanceState::new();
    let mut invested = 0.0;

    for month in 1..=months {
        let year_index = ((month - 1) / 12) as i32;
        let contribution = amount * (1.0 + step_up / 100.0).powi(year_index);
        invested += contribution;
        result.add_row(state.advance(contribution, 0.0, i));
    }

    let maturity_value = state.balance;
    debug!("Step-up SIP {} (+{}%/yr) x {} months: {:.2}", amount, step_up, months, maturity_value);

    result.finish(months, invested, maturity_value)
}

/// Monthly accumulation schedule shared by SIP-shaped plans
///
/// `initial` is added to the first month's contribution (existing savings);
/// `maturity_value` is the closed-form result the schedule converges to.
pub(crate) fn accumulate(
    instrument: Instrument,
    initial: f64,
    monthly_amount: f64,
    monthly_rate: f64,
    months: u32,
    maturity_value: f64,
) -> Result<ProjectionResult> {
    let mut result = ProjectionResult::new(instrument, PeriodUnit::Month);
    let mut state = BalanceState::new();

    for month in 1..=months {
        let contribution = if month == 1 { initial + monthly_amount } else { monthly_amount };
        result.add_row(state.advance(contribution, 0.0, monthly_rate));
    }

    let invested = initial + monthly_amount * months as f64;
    result.finish(months, invested, maturity_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InputIssue, ProjectionError};
    use approx::assert_relative_eq;

    fn sip(amount: f64, rate: f64, months: u32) -> Result<ProjectionResult> {
        project_sip(
            &SipInput { monthly_amount: amount, annual_rate_percent: rate, tenure_months: months },
            &Assumptions::standard(),
        )
    }

    #[test]
    fn test_reference_scenario() {
        let result = sip(5000.0, 12.0, 12).unwrap();
        let expected = 5000.0 * ((1.01f64.powi(12) - 1.0) / 0.01) * 1.01;

        assert_relative_eq!(result.maturity_value, expected, epsilon = 1e-6);
        assert!((result.maturity_value - 64_046.64).abs() < 0.01);
        assert_eq!(result.total_invested, 60_000.0);
        assert_eq!(result.schedule.len(), 12);
    }

    #[test]
    fn test_schedule_matches_closed_form() {
        let result = sip(2500.0, 14.0, 240).unwrap();
        assert_relative_eq!(result.final_balance(), result.maturity_value, max_relative = 1e-9);
        assert!(result.schedule.iter().all(|r| r.rollforward_error() < 1e-6));
        assert_relative_eq!(
            result.maturity_value,
            result.total_invested + result.total_interest_earned,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_zero_rate_returns_contributions() {
        let result = sip(5000.0, 0.0, 36).unwrap();
        assert_eq!(result.maturity_value, 180_000.0);
        assert_eq!(result.total_interest_earned, 0.0);
    }

    #[test]
    fn test_single_month() {
        let result = sip(1000.0, 12.0, 1).unwrap();
        assert_relative_eq!(result.maturity_value, 1010.0, epsilon = 1e-9);
        assert_eq!(result.schedule.len(), 1);
    }

    #[test]
    fn test_higher_rate_grows_more() {
        let mut previous = sip(1000.0, 0.0, 60).unwrap().maturity_value;
        for rate in [1.0, 6.0, 12.0, 24.0] {
            let current = sip(1000.0, rate, 60).unwrap().maturity_value;
            assert!(current > previous, "{}% did not beat the lower rate", rate);
            previous = current;
        }
    }

    #[test]
    fn test_validation_names_field() {
        assert_eq!(
            sip(0.0, 12.0, 12).unwrap_err(),
            ProjectionError::invalid("monthly_amount", InputIssue::NotPositive)
        );
        assert_eq!(sip(1000.0, -1.0, 12).unwrap_err().field(), Some("annual_rate_percent"));
        assert_eq!(sip(1000.0, 12.0, 0).unwrap_err().field(), Some("tenure_months"));
        assert_eq!(sip(f64::NAN, 12.0, 12).unwrap_err().field(), Some("monthly_amount"));
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(sip(3000.0, 11.5, 120).unwrap(), sip(3000.0, 11.5, 120).unwrap());
    }

    #[test]
    fn test_effective_yield_of_monthly_compounding() {
        let yield_rate = sip(5000.0, 12.0, 24).unwrap().annualized_return().unwrap();
        assert!((yield_rate - (1.01f64.powi(12) - 1.0)).abs() < 1e-6);
    }

    #[test]
    fn test_step_up_zero_matches_plain_sip() {
        let plain = sip(4000.0, 10.0, 60).unwrap();
        let stepped = project_step_up_sip(
            &StepUpSipInput {
                monthly_amount: 4000.0,
                annual_step_up_percent: 0.0,
                annual_rate_percent: 10.0,
                tenure_months: 60,
            },
            &Assumptions::standard(),
        )
        .unwrap();

        assert_relative_eq!(stepped.maturity_value, plain.maturity_value, max_relative = 1e-9);
        assert_eq!(stepped.total_invested, plain.total_invested);
    }

    #[test]
    fn test_step_up_raises_contribution_yearly() {
        let result = project_step_up_sip(
            &StepUpSipInput {
                monthly_amount: 1000.0,
                annual_step_up_percent: 10.0,
                annual_rate_percent: 12.0,
                tenure_months: 25,
            },
            &Assumptions::standard(),
        )
        .unwrap();

        assert_eq!(result.schedule[11].contribution, 1000.0);
        assert_relative_eq!(result.schedule[12].contribution, 1100.0, epsilon = 1e-9);
        assert_relative_eq!(result.schedule[24].contribution, 1210.0, epsilon = 1e-9);
        assert_relative_eq!(result.total_invested, 12_000.0 + 13_200.0 + 1210.0, epsilon = 1e-6);
    }
}
