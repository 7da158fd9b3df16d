//! National Pension System: monthly contributions until retirement, then an
//! annuity/lump-sum split of the corpus

use log::debug;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::{InputIssue, ProjectionError, Result};
use crate::projection::{Instrument, ProjectionResult};
use super::monthly_rate;
use super::sip::{accumulate, sip_growth_factor};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpsInput {
    pub monthly_contribution: f64,

    /// Expected annual return during accumulation
    pub annual_rate_percent: f64,

    pub current_age: u32,

    /// Defaults to the scheme's normal exit age
    #[serde(default)]
    pub retirement_age: Option<u32>,

    /// Share of the corpus used to buy an annuity (0.4 = 40%)
    pub annuity_ratio: f64,

    /// Defaults to the configured annuity rate
    #[serde(default)]
    pub annuity_rate_percent: Option<f64>,
}

/// Corpus at exit and how it is paid out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpsProjection {
    pub accumulation: ProjectionResult,
    pub corpus: f64,
    pub annuity_ratio: f64,
    /// Part of the corpus that buys the annuity
    pub annuity_purchase: f64,
    /// Part of the corpus withdrawn at exit
    pub lump_sum: f64,
    pub monthly_pension: f64,
}

pub fn project_nps(input: &NpsInput, assumptions: &Assumptions) -> Result<NpsProjection> {
    let rules = &assumptions.nps;
    let limits = &assumptions.limits;

    let contribution = limits.positive_amount("monthly_contribution", input.monthly_contribution)?;
    let rate = limits.annual_rate("annual_rate_percent", input.annual_rate_percent)?;
    let annuity_rate = limits.annual_rate(
        "annuity_rate_percent",
        input.annuity_rate_percent.unwrap_or(rules.default_annuity_rate_percent),
    )?;

    if input.current_age < rules.min_entry_age || input.current_age > rules.max_entry_age {
        return Err(ProjectionError::invalid(
            "current_age",
            InputIssue::OutOfRange { min: rules.min_entry_age as f64, max: rules.max_entry_age as f64 },
        ));
    }

    let retirement_age = input.retirement_age.unwrap_or(rules.retirement_age);
    if retirement_age <= input.current_age {
        return Err(ProjectionError::invalid(
            "retirement_age",
            InputIssue::Inconsistent("must be later than current_age".into()),
        ));
    }

    let ratio = input.annuity_ratio;
    if !ratio.is_finite() || ratio < rules.min_annuity_ratio || ratio > 1.0 {
        return Err(ProjectionError::invalid(
            "annuity_ratio",
            InputIssue::OutOfRange { min: rules.min_annuity_ratio, max: 1.0 },
        ));
    }

    let years = limits.tenure_years("retirement_age", retirement_age - input.current_age)?;
    let months = years * 12;
    let i = monthly_rate(rate);
    let corpus = contribution * sip_growth_factor(i, months);
    let accumulation = accumulate(Instrument::Nps, 0.0, contribution, i, months, corpus)?;

    let annuity_purchase = corpus * ratio;
    let monthly_pension = annuity_purchase * annuity_rate / 100.0 / 12.0;

    debug!(
        "NPS corpus {:.2} at age {}: pension {:.2}/month",
        corpus, retirement_age, monthly_pension
    );

    Ok(NpsProjection {
        accumulation,
        corpus,
        annuity_ratio: ratio,
        annuity_purchase,
        lump_sum: corpus - annuity_purchase,
        monthly_pension,
    })
}
