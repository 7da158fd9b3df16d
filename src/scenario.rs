//! Calculator front-end for single runs, batches, and rate sweeps
//!
//! Holds one `Assumptions` value and hands it to each projector, so a page
//! render or a batch job never reaches for global configuration.

use rayon::prelude::*;

use crate::assumptions::Assumptions;
use crate::calculators::{
    self, FdInput, GoalInput, GoalPlan, LumpsumInput, NpsInput, NpsProjection, PpfInput, RdInput,
    RetirementInput, RetirementPlan, SipInput, StepUpSipInput, SwpInput, SwpProjection,
};
use crate::error::Result;
use crate::inputs::{CalculatorKind, Scenario};
use crate::projection::ProjectionResult;

/// Calculator bound to a fixed set of assumptions
///
/// # Example
/// ```ignore
/// let calculator = Calculator::new();
///
/// // How much does one extra percent of return matter?
/// let results = calculator.rate_sweep(&[10.0, 11.0, 12.0], |calc, rate| {
///     calc.sip(&SipInput { monthly_amount: 5000.0, annual_rate_percent: rate, tenure_months: 120 })
/// });
/// ```
#[derive(Debug, Clone)]
pub struct Calculator {
    assumptions: Assumptions,
}

impl Calculator {
    /// Create a calculator with built-in assumptions
    pub fn new() -> Self {
        Self {
            assumptions: Assumptions::standard(),
        }
    }

    /// Create a calculator by loading config/assumptions.json
    pub fn from_json() -> std::result::Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            assumptions: Assumptions::from_json()?,
        })
    }

    /// Create a calculator from a specific assumptions file
    pub fn from_json_path(path: &std::path::Path) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            assumptions: Assumptions::from_json_path(path)?,
        })
    }

    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    pub fn sip(&self, input: &SipInput) -> Result<ProjectionResult> {
        calculators::project_sip(input, &self.assumptions)
    }

    pub fn step_up_sip(&self, input: &StepUpSipInput) -> Result<ProjectionResult> {
        calculators::project_step_up_sip(input, &self.assumptions)
    }

    pub fn lumpsum(&self, input: &LumpsumInput) -> Result<ProjectionResult> {
        calculators::project_lumpsum(input, &self.assumptions)
    }

    pub fn rd(&self, input: &RdInput) -> Result<ProjectionResult> {
        calculators::project_rd(input, &self.assumptions)
    }

    pub fn fd(&self, input: &FdInput) -> Result<ProjectionResult> {
        calculators::project_fd(input, &self.assumptions)
    }

    pub fn ppf(&self, input: &PpfInput) -> Result<ProjectionResult> {
        calculators::project_ppf(input, &self.assumptions)
    }

    pub fn nps(&self, input: &NpsInput) -> Result<NpsProjection> {
        calculators::project_nps(input, &self.assumptions)
    }

    pub fn retirement(&self, input: &RetirementInput) -> Result<RetirementPlan> {
        calculators::project_retirement(input, &self.assumptions)
    }

    pub fn goal(&self, input: &GoalInput) -> Result<GoalPlan> {
        calculators::project_goal(input, &self.assumptions)
    }

    pub fn swp(&self, input: &SwpInput) -> Result<SwpProjection> {
        calculators::project_swp(input, &self.assumptions)
    }

    /// Run a batch scenario through the matching projector
    pub fn run(&self, scenario: &Scenario) -> Result<ProjectionResult> {
        let input = &scenario.input;
        match scenario.kind {
            CalculatorKind::Sip => self.sip(&SipInput::from(input)),
            CalculatorKind::Lumpsum => self.lumpsum(&LumpsumInput::from_investment(input)?),
            CalculatorKind::Rd => self.rd(&RdInput::from(input)),
            CalculatorKind::Fd => self.fd(&FdInput::from(input)),
            CalculatorKind::Ppf => self.ppf(&PpfInput {
                annual_deposit: input.amount,
                tenure_years: Some(input.tenure.whole_years("tenure_years")?),
                annual_rate_percent: Some(input.annual_rate_percent),
            }),
        }
    }

    /// Run many scenarios in parallel; results keep the input order
    pub fn run_batch(&self, scenarios: &[Scenario]) -> Vec<Result<ProjectionResult>> {
        scenarios.par_iter().map(|s| self.run(s)).collect()
    }

    /// Evaluate one projector across several rates in parallel
    pub fn rate_sweep<F>(&self, rates: &[f64], project: F) -> Vec<Result<ProjectionResult>>
    where
        F: Fn(&Self, f64) -> Result<ProjectionResult> + Sync,
    {
        rates.par_iter().map(|&rate| project(self, rate)).collect()
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.assumptions
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{CompoundingFrequency, InvestmentInput, Tenure};

    #[test]
    fn test_rate_sweep_is_ordered_and_increasing() {
        let calculator = Calculator::new();
        let rates = [0.0, 4.0, 8.0, 12.0, 16.0];

        let results = calculator.rate_sweep(&rates, |calc, rate| {
            calc.lumpsum(&LumpsumInput {
                principal: 100_000.0,
                annual_rate_percent: rate,
                tenure_years: 10,
                compounding: CompoundingFrequency::Annual,
            })
        });

        assert_eq!(results.len(), rates.len());
        assert_eq!(results[0].as_ref().unwrap().maturity_value, 100_000.0);
        for pair in results.windows(2) {
            assert!(pair[1].as_ref().unwrap().maturity_value > pair[0].as_ref().unwrap().maturity_value);
        }
    }

    #[test]
    fn test_run_batch_matches_direct_calls() {
        let calculator = Calculator::new();
        let scenarios = vec![
            Scenario {
                kind: CalculatorKind::Sip,
                input: InvestmentInput::new(5000.0, 12.0, Tenure::Months(12)),
            },
            Scenario {
                kind: CalculatorKind::Rd,
                input: InvestmentInput::new(2000.0, 7.0, Tenure::Years(2)),
            },
            Scenario {
                kind: CalculatorKind::Ppf,
                input: InvestmentInput::new(100_000.0, 7.1, Tenure::Years(15)),
            },
            Scenario {
                kind: CalculatorKind::Lumpsum,
                input: InvestmentInput::new(10_000.0, 8.0, Tenure::Months(7)),
            },
        ];

        let results = calculator.run_batch(&scenarios);
        assert_eq!(results.len(), 4);

        let direct_sip = calculator
            .sip(&SipInput { monthly_amount: 5000.0, annual_rate_percent: 12.0, tenure_months: 12 })
            .unwrap();
        assert_eq!(results[0].as_ref().unwrap(), &direct_sip);
        assert_eq!(results[1].as_ref().unwrap().schedule.len(), 24);
        assert_eq!(results[2].as_ref().unwrap().schedule.len(), 15);
        assert_eq!(results[3].as_ref().unwrap_err().field(), Some("tenure_years"));
    }

    #[test]
    fn test_custom_assumptions_flow_through() {
        let mut calculator = Calculator::new();
        calculator.assumptions_mut().limits.max_annual_rate_percent = 10.0;

        let err = calculator
            .sip(&SipInput { monthly_amount: 1000.0, annual_rate_percent: 12.0, tenure_months: 12 })
            .unwrap_err();
        assert_eq!(err.field(), Some("annual_rate_percent"));
    }
}
