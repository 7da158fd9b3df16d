//! One-time investment compounded to a horizon in whole years

use log::debug;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::Result;
use crate::inputs::{CompoundingFrequency, InvestmentInput};
use crate::projection::{BalanceState, Instrument, PeriodUnit, ProjectionResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LumpsumInput {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub tenure_years: u32,
    #[serde(default)]
    pub compounding: CompoundingFrequency,
}

impl LumpsumInput {
    /// Lumpsum tenures are whole years; month tenures must divide by 12
    pub fn from_investment(input: &InvestmentInput) -> Result<Self> {
        Ok(Self {
            principal: input.amount,
            annual_rate_percent: input.annual_rate_percent,
            tenure_years: input.tenure.whole_years("tenure_years")?,
            compounding: input.compounding,
        })
    }
}

/// Project a lumpsum: `P * (1 + r/(100f))^(f*t)`, one schedule row per year
pub fn project_lumpsum(input: &LumpsumInput, assumptions: &Assumptions) -> Result<ProjectionResult> {
    let limits = &assumptions.limits;
    let principal = limits.positive_amount("principal", input.principal)?;
    let rate = limits.annual_rate("annual_rate_percent", input.annual_rate_percent)?;
    let years = limits.tenure_years("tenure_years", input.tenure_years)?;

    let f = input.compounding.periods_per_year();
    let periodic_rate = rate / (100.0 * f as f64);
    let maturity_value = principal * (1.0 + periodic_rate).powi((f * years) as i32);

    // Growth over one year at the chosen compounding frequency
    let yearly_growth = (1.0 + periodic_rate).powi(f as i32) - 1.0;

    let mut result = ProjectionResult::new(Instrument::Lumpsum, PeriodUnit::Year);
    let mut state = BalanceState::new();
    for year in 1..=years {
        let contribution = if year == 1 { principal } else { 0.0 };
        result.add_row(state.advance(contribution, 0.0, yearly_growth));
    }

    debug!(
        "Lumpsum {} for {}y at {}% ({}): {:.2}",
        principal, years, rate, input.compounding, maturity_value
    );
    result.finish(years * 12, principal, maturity_value)
}
