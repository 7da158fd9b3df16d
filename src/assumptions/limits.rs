//! Input ceilings and field validators shared by every projector

use serde::{Deserialize, Serialize};

use crate::error::{InputIssue, ProjectionError, Result};

/// Largest `max_tenure_years` a configuration may set
pub const TENURE_YEARS_CEILING: u32 = 100;

/// Upper bounds applied to user-entered fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    /// Highest annual rate (percent) any projector accepts
    pub max_annual_rate_percent: f64,

    /// Longest accumulation tenure in years
    pub max_tenure_years: u32,

    /// Withdrawal schedules stop here even if the corpus survives
    pub max_withdrawal_months: u32,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_annual_rate_percent: 50.0,
            max_tenure_years: 50,
            max_withdrawal_months: 600,
        }
    }
}

impl InputLimits {
    pub fn max_tenure_months(&self) -> u32 {
        self.max_tenure_years.saturating_mul(12)
    }

    /// Amount that must be strictly positive (principal, deposit, corpus)
    pub fn positive_amount(&self, field: &'static str, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(ProjectionError::invalid(field, InputIssue::NotFinite));
        }
        if value <= 0.0 {
            return Err(ProjectionError::invalid(field, InputIssue::NotPositive));
        }
        Ok(value)
    }

    /// Amount that may be zero (existing savings, step-up)
    pub fn non_negative_amount(&self, field: &'static str, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(ProjectionError::invalid(field, InputIssue::NotFinite));
        }
        if value < 0.0 {
            return Err(ProjectionError::invalid(field, InputIssue::Negative));
        }
        Ok(value)
    }

    /// Annual rate in percent: zero allowed, negative and above-ceiling rejected
    pub fn annual_rate(&self, field: &'static str, percent: f64) -> Result<f64> {
        let percent = self.non_negative_amount(field, percent)?;
        if percent > self.max_annual_rate_percent {
            return Err(ProjectionError::invalid(
                field,
                InputIssue::OutOfRange { min: 0.0, max: self.max_annual_rate_percent },
            ));
        }
        Ok(percent)
    }

    pub fn tenure_months(&self, field: &'static str, months: u32) -> Result<u32> {
        self.counted(field, months, self.max_tenure_months())
    }

    pub fn tenure_years(&self, field: &'static str, years: u32) -> Result<u32> {
        self.counted(field, years, self.max_tenure_years)
    }

    fn counted(&self, field: &'static str, value: u32, max: u32) -> Result<u32> {
        if value == 0 {
            return Err(ProjectionError::invalid(field, InputIssue::NotPositive));
        }
        if value > max {
            return Err(ProjectionError::invalid(
                field,
                InputIssue::OutOfRange { min: 1.0, max: max as f64 },
            ));
        }
        Ok(value)
    }
}
