//! Investment calculators, one pure projector per instrument
//!
//! Every projector validates its own input against `Assumptions::limits`,
//! computes with unrounded `f64` arithmetic, and returns either a
//! `ProjectionResult` or a richer plan that embeds one.

pub mod sip;
pub mod lumpsum;
pub mod rd;
pub mod fd;
pub mod ppf;
pub mod nps;
pub mod retirement;
pub mod goal;
pub mod swp;

pub use sip::{project_sip, project_step_up_sip, sip_growth_factor, SipInput, StepUpSipInput};
pub use lumpsum::{project_lumpsum, LumpsumInput};
pub use rd::{project_rd, RdInput};
pub use fd::{project_fd, FdInput};
pub use ppf::{project_ppf, PpfInput};
pub use nps::{project_nps, NpsInput, NpsProjection};
pub use retirement::{project_retirement, RetirementInput, RetirementPlan};
pub use goal::{project_goal, GoalInput, GoalPlan};
pub use swp::{project_swp, SwpInput, SwpOutcome, SwpProjection};

use crate::error::Result;
use crate::projection::{Instrument, ProjectionResult};

/// Monthly rate from an annual percentage (12.0 -> 0.01)
pub(crate) fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 1200.0
}

/// Savings needed to reach a target at a future date
pub(crate) struct SavingsPlan {
    pub savings_future_value: f64,
    pub shortfall: f64,
    pub required_monthly_sip: f64,
    pub accumulation: ProjectionResult,
}

/// Grow existing savings to the target date and size the SIP that covers the rest
pub(crate) fn plan_monthly_savings(
    instrument: Instrument,
    target: f64,
    savings: f64,
    monthly_rate: f64,
    months: u32,
) -> Result<SavingsPlan> {
    let savings_future_value = savings * (1.0 + monthly_rate).powi(months as i32);
    let shortfall = (target - savings_future_value).max(0.0);
    let factor = sip_growth_factor(monthly_rate, months);
    let required_monthly_sip = shortfall / factor;

    let maturity_value = savings_future_value + required_monthly_sip * factor;
    let accumulation = sip::accumulate(
        instrument,
        savings,
        required_monthly_sip,
        monthly_rate,
        months,
        maturity_value,
    )?;

    Ok(SavingsPlan {
        savings_future_value,
        shortfall,
        required_monthly_sip,
        accumulation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::Assumptions;
    use crate::inputs::{CompoundingFrequency, InvestmentInput, Tenure};

    fn accumulation_projections(rate: f64) -> Vec<ProjectionResult> {
        let assumptions = Assumptions::standard();
        let monthly = InvestmentInput::new(2500.0, rate, Tenure::Years(3));
        let yearly = InvestmentInput::new(2500.0, rate, Tenure::Years(3))
            .with_compounding(CompoundingFrequency::Quarterly);

        vec![
            project_sip(&SipInput::from(&monthly), &assumptions).unwrap(),
            project_rd(&RdInput::from(&monthly), &assumptions).unwrap(),
            project_lumpsum(&LumpsumInput::from_investment(&yearly).unwrap(), &assumptions).unwrap(),
            project_fd(&FdInput::from(&yearly), &assumptions).unwrap(),
        ]
    }

    #[test]
    fn test_zero_rate_means_no_interest() {
        for result in accumulation_projections(0.0) {
            assert_eq!(result.maturity_value, result.total_invested, "{:?}", result.instrument);
            assert_eq!(result.total_interest_earned, 0.0);
        }
    }

    #[test]
    fn test_headline_figures_add_up() {
        for result in accumulation_projections(9.5) {
            let gap = result.maturity_value - (result.total_invested + result.total_interest_earned);
            assert!(gap.abs() < 0.01, "{:?} off by {}", result.instrument, gap);
            assert!((result.final_balance() - result.maturity_value).abs() < 0.01);
            assert!(result.schedule.iter().all(|r| r.rollforward_error() < 1e-6));
        }
    }

    #[test]
    fn test_schedule_length_matches_tenure() {
        let lengths: Vec<usize> = accumulation_projections(7.0).iter().map(|r| r.schedule.len()).collect();
        // SIP and RD in months, lumpsum in years, FD in quarters
        assert_eq!(lengths, vec![36, 36, 3, 12]);
    }

    #[test]
    fn test_repeat_calls_are_identical() {
        assert_eq!(accumulation_projections(11.0), accumulation_projections(11.0));
    }
}
