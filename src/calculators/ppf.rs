//! Public Provident Fund: yearly deposits, yearly compounding, 15-year lock-in

use log::debug;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::{InputIssue, ProjectionError, Result};
use crate::projection::{BalanceState, Instrument, PeriodUnit, ProjectionResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpfInput {
    /// Deposit made at the start of every year
    pub annual_deposit: f64,

    /// Defaults to the lock-in period
    #[serde(default)]
    pub tenure_years: Option<u32>,

    /// Defaults to the notified scheme rate
    #[serde(default)]
    pub annual_rate_percent: Option<f64>,
}

impl PpfInput {
    pub fn new(annual_deposit: f64) -> Self {
        Self {
            annual_deposit,
            tenure_years: None,
            annual_rate_percent: None,
        }
    }
}

/// Project a PPF account with a level annual deposit
pub fn project_ppf(input: &PpfInput, assumptions: &Assumptions) -> Result<ProjectionResult> {
    let rules = &assumptions.ppf;
    let limits = &assumptions.limits;

    let deposit = limits.positive_amount("annual_deposit", input.annual_deposit)?;
    if deposit < rules.min_annual_deposit || deposit > rules.max_annual_deposit {
        return Err(ProjectionError::invalid(
            "annual_deposit",
            InputIssue::OutOfRange { min: rules.min_annual_deposit, max: rules.max_annual_deposit },
        ));
    }

    let rate = limits.annual_rate(
        "annual_rate_percent",
        input.annual_rate_percent.unwrap_or(rules.annual_rate_percent),
    )?;

    let years = limits.tenure_years("tenure_years", input.tenure_years.unwrap_or(rules.lock_in_years))?;
    if !rules.is_valid_tenure(years) {
        return Err(ProjectionError::invalid(
            "tenure_years",
            InputIssue::Inconsistent(format!(
                "must be {} years plus extensions of {} years",
                rules.lock_in_years, rules.extension_block_years
            )),
        ));
    }

    let r = rate / 100.0;
    let maturity_value = if r == 0.0 {
        deposit * years as f64
    } else {
        deposit * ((1.0 + r).powi(years as i32) - 1.0) / r * (1.0 + r)
    };

    let mut result = ProjectionResult::new(Instrument::Ppf, PeriodUnit::Year);
    let mut state = BalanceState::new();
    for _ in 1..=years {
        result.add_row(state.advance(deposit, 0.0, r));
    }

    debug!("PPF {} x {}y at {}%: {:.2}", deposit, years, rate, maturity_value);
    result.finish(years * 12, deposit * years as f64, maturity_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_max_deposit_fifteen_years() {
        let result = project_ppf(&PpfInput::new(150_000.0), &Assumptions::standard()).unwrap();

        assert_eq!(result.schedule.len(), 15);
        assert_eq!(result.total_invested, 2_250_000.0);
        // Well-known figure for Rs 1.5L/yr at 7.1% over 15 years
        assert!((result.maturity_value - 4_068_209.0).abs() < 1.0, "got {}", result.maturity_value);
        assert_relative_eq!(result.final_balance(), result.maturity_value, max_relative = 1e-12);
    }

    #[test]
    fn test_deposit_bounds() {
        let err = project_ppf(&PpfInput::new(200_000.0), &Assumptions::standard()).unwrap_err();
        assert_eq!(err.field(), Some("annual_deposit"));

        let err = project_ppf(&PpfInput::new(100.0), &Assumptions::standard()).unwrap_err();
        assert_eq!(err.field(), Some("annual_deposit"));
    }

    #[test]
    fn test_extension_blocks() {
        let extended = PpfInput { tenure_years: Some(20), ..PpfInput::new(50_000.0) };
        let result = project_ppf(&extended, &Assumptions::standard()).unwrap();
        assert_eq!(result.schedule.len(), 20);

        let odd = PpfInput { tenure_years: Some(18), ..PpfInput::new(50_000.0) };
        let err = project_ppf(&odd, &Assumptions::standard()).unwrap_err();
        assert_eq!(err.field(), Some("tenure_years"));
    }

    #[test]
    fn test_rate_override_zero() {
        let input = PpfInput { annual_rate_percent: Some(0.0), ..PpfInput::new(10_000.0) };
        let result = project_ppf(&input, &Assumptions::standard()).unwrap();
        assert_eq!(result.maturity_value, 150_000.0);
    }
}
