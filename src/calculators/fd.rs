//! Fixed deposit compounded at the bank's posting frequency

use log::debug;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::Result;
use crate::inputs::{CompoundingFrequency, InvestmentInput};
use crate::projection::{BalanceState, Instrument, ProjectionResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FdInput {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub tenure_months: u32,
    pub compounding: CompoundingFrequency,
}

impl From<&InvestmentInput> for FdInput {
    fn from(input: &InvestmentInput) -> Self {
        Self {
            principal: input.amount,
            annual_rate_percent: input.annual_rate_percent,
            tenure_months: input.tenure.in_months(),
            compounding: input.compounding,
        }
    }
}

impl FdInput {
    /// Most banks compound FDs quarterly
    pub fn quarterly(principal: f64, annual_rate_percent: f64, tenure_months: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            tenure_months,
            compounding: CompoundingFrequency::Quarterly,
        }
    }
}

/// Project a fixed deposit: `P * (1 + r/(100f))^(f * months/12)`
///
/// One schedule row per compounding period. A tenure that is not a whole
/// number of periods ends with a shorter stub row compounded fractionally.
pub fn project_fd(input: &FdInput, assumptions: &Assumptions) -> Result<ProjectionResult> {
    let limits = &assumptions.limits;
    let principal = limits.positive_amount("principal", input.principal)?;
    let rate = limits.annual_rate("annual_rate_percent", input.annual_rate_percent)?;
    let months = limits.tenure_months("tenure_months", input.tenure_months)?;

    let f = input.compounding.periods_per_year();
    let months_per_period = input.compounding.months_per_period();
    let periodic_rate = rate / (100.0 * f as f64);

    let full_periods = months / months_per_period;
    let stub_months = months % months_per_period;
    let maturity_value =
        principal * (1.0 + periodic_rate).powf(months as f64 / months_per_period as f64);

    let mut result = ProjectionResult::new(Instrument::FixedDeposit, input.compounding.into());
    let mut state = BalanceState::new();

    for period in 1..=full_periods {
        let contribution = if period == 1 { principal } else { 0.0 };
        result.add_row(state.advance(contribution, 0.0, periodic_rate));
    }
    if stub_months > 0 {
        let stub_growth = (1.0 + periodic_rate).powf(stub_months as f64 / months_per_period as f64) - 1.0;
        let contribution = if full_periods == 0 { principal } else { 0.0 };
        result.add_row(state.advance(contribution, 0.0, stub_growth));
    }

    debug!(
        "FD {} for {} months at {}% ({}): {:.2}",
        principal, months, rate, input.compounding, maturity_value
    );
    result.finish(months, principal, maturity_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quarterly_one_year() {
        let result = project_fd(&FdInput::quarterly(100_000.0, 7.0, 12), &Assumptions::standard()).unwrap();
        assert_relative_eq!(result.maturity_value, 100_000.0 * 1.0175f64.powi(4), max_relative = 1e-12);
        assert_eq!(result.schedule.len(), 4);
        assert_relative_eq!(result.final_balance(), result.maturity_value, max_relative = 1e-12);
    }

    #[test]
    fn test_stub_period() {
        let result = project_fd(&FdInput::quarterly(10_000.0, 6.0, 14), &Assumptions::standard()).unwrap();
        // Four full quarters plus a two-month stub
        assert_eq!(result.schedule.len(), 5);
        assert_relative_eq!(result.final_balance(), result.maturity_value, max_relative = 1e-12);
        assert_eq!(result.tenure_months, 14);
    }

    #[test]
    fn test_tenure_shorter_than_one_period() {
        let input = FdInput {
            principal: 10_000.0,
            annual_rate_percent: 6.0,
            tenure_months: 5,
            compounding: CompoundingFrequency::Annual,
        };
        let result = project_fd(&input, &Assumptions::standard()).unwrap();
        assert_eq!(result.schedule.len(), 1);
        assert_eq!(result.schedule[0].contribution, 10_000.0);
        assert_relative_eq!(result.maturity_value, 10_000.0 * 1.06f64.powf(5.0 / 12.0), max_relative = 1e-12);
    }

    #[test]
    fn test_zero_rate_and_validation() {
        let result = project_fd(&FdInput::quarterly(25_000.0, 0.0, 36), &Assumptions::standard()).unwrap();
        assert_eq!(result.maturity_value, 25_000.0);

        let err = project_fd(&FdInput::quarterly(-5.0, 7.0, 36), &Assumptions::standard()).unwrap_err();
        assert_eq!(err.field(), Some("principal"));
    }
}
