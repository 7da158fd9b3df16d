//! Schedule rows and projection results

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::assumptions::DisplayRules;
use crate::error::{ProjectionError, Result};
use crate::inputs::CompoundingFrequency;
use super::irr::calculate_irr;

/// Which calculator produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instrument {
    Sip,
    StepUpSip,
    Lumpsum,
    RecurringDeposit,
    FixedDeposit,
    Ppf,
    Nps,
    Retirement,
    Goal,
    Swp,
}

impl Instrument {
    pub fn as_str(&self) -> &'static str {
        match self {
            Instrument::Sip => "SIP",
            Instrument::StepUpSip => "Step-up SIP",
            Instrument::Lumpsum => "Lumpsum",
            Instrument::RecurringDeposit => "RD",
            Instrument::FixedDeposit => "FD",
            Instrument::Ppf => "PPF",
            Instrument::Nps => "NPS",
            Instrument::Retirement => "Retirement",
            Instrument::Goal => "Goal",
            Instrument::Swp => "SWP",
        }
    }
}

/// Length of one schedule row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodUnit {
    Month,
    Quarter,
    HalfYear,
    Year,
}

impl PeriodUnit {
    pub fn months(&self) -> u32 {
        match self {
            PeriodUnit::Month => 1,
            PeriodUnit::Quarter => 3,
            PeriodUnit::HalfYear => 6,
            PeriodUnit::Year => 12,
        }
    }

    pub fn periods_per_year(&self) -> u32 {
        12 / self.months()
    }
}

impl From<CompoundingFrequency> for PeriodUnit {
    fn from(frequency: CompoundingFrequency) -> Self {
        match frequency {
            CompoundingFrequency::Annual => PeriodUnit::Year,
            CompoundingFrequency::SemiAnnual => PeriodUnit::HalfYear,
            CompoundingFrequency::Quarterly => PeriodUnit::Quarter,
            CompoundingFrequency::Monthly => PeriodUnit::Month,
        }
    }
}

/// One row of a projection schedule
///
/// `closing_balance = opening_balance + contribution - withdrawal + interest_accrued`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodBreakdown {
    /// 1-indexed period number
    pub period_index: u32,
    pub opening_balance: f64,
    pub contribution: f64,
    pub withdrawal: f64,
    /// Interest added to the balance in this period
    pub interest_accrued: f64,
    pub closing_balance: f64,
}

impl PeriodBreakdown {
    /// Difference between the stated closing balance and the roll-forward
    pub fn rollforward_error(&self) -> f64 {
        let expected = self.opening_balance + self.contribution - self.withdrawal + self.interest_accrued;
        (self.closing_balance - expected).abs()
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub instrument: Instrument,

    /// Length of each schedule row
    pub period_unit: PeriodUnit,

    /// Calendar length of the projection (shorter than requested if a SWP runs dry)
    pub tenure_months: u32,

    /// Balance at the end of the projection
    pub maturity_value: f64,

    /// Money put in by the investor (corpus for withdrawal plans)
    pub total_invested: f64,

    pub total_interest_earned: f64,

    /// Money taken out over the projection (zero for accumulation plans)
    pub total_withdrawn: f64,

    /// Chronological schedule rows
    pub schedule: Vec<PeriodBreakdown>,
}

impl ProjectionResult {
    pub fn new(instrument: Instrument, period_unit: PeriodUnit) -> Self {
        Self {
            instrument,
            period_unit,
            tenure_months: 0,
            maturity_value: 0.0,
            total_invested: 0.0,
            total_interest_earned: 0.0,
            total_withdrawn: 0.0,
            schedule: Vec::new(),
        }
    }

    /// Add a schedule row
    pub fn add_row(&mut self, row: PeriodBreakdown) {
        self.schedule.push(row);
    }

    /// Fix the headline figures once the schedule is complete
    ///
    /// Interest is derived so that
    /// `maturity_value = total_invested + total_interest_earned - total_withdrawn`.
    pub fn finish(mut self, tenure_months: u32, total_invested: f64, maturity_value: f64) -> Result<Self> {
        self.tenure_months = tenure_months;
        self.total_invested = total_invested;
        self.maturity_value = maturity_value;
        self.total_withdrawn = self.schedule.iter().map(|r| r.withdrawal).sum();
        self.total_interest_earned = maturity_value - total_invested + self.total_withdrawn;

        if !self.maturity_value.is_finite() {
            return Err(ProjectionError::NonFinite("maturity_value"));
        }
        if !self.total_interest_earned.is_finite() {
            return Err(ProjectionError::NonFinite("total_interest_earned"));
        }
        Ok(self)
    }

    /// Closing balance of the last schedule row
    pub fn final_balance(&self) -> f64 {
        self.schedule.last().map(|r| r.closing_balance).unwrap_or(0.0)
    }

    /// Date the projection ends, given the date of the first contribution
    pub fn maturity_date(&self, start: NaiveDate) -> Option<NaiveDate> {
        start.checked_add_months(Months::new(self.tenure_months))
    }

    /// Effective annual yield implied by the schedule's cashflows
    ///
    /// Contributions are outflows at the start of their period, withdrawals are
    /// inflows at the start of their period, and the final balance is an inflow
    /// at the end of the last period.
    pub fn annualized_return(&self) -> Option<f64> {
        if self.schedule.is_empty() {
            return None;
        }

        let mut cashflows = vec![0.0; self.schedule.len() + 1];
        for (t, row) in self.schedule.iter().enumerate() {
            cashflows[t] += row.withdrawal - row.contribution;
        }
        if let Some(first) = self.schedule.first() {
            // A schedule that opens with a balance (not a contribution) still cost that balance
            cashflows[0] -= first.opening_balance;
        }
        cashflows[self.schedule.len()] += self.final_balance();

        calculate_irr(&cashflows, self.period_unit.periods_per_year())
    }

    /// Headline figures rounded for display
    pub fn summary(&self, display: &DisplayRules) -> ProjectionSummary {
        let maturity_value = display.round(self.maturity_value);
        let total_invested = display.round(self.total_invested);
        let total_withdrawn = display.round(self.total_withdrawn);

        ProjectionSummary {
            instrument: self.instrument,
            periods: self.schedule.len() as u32,
            tenure_months: self.tenure_months,
            maturity_value,
            total_invested,
            total_withdrawn,
            // Derived from rounded parts so the displayed figures add up exactly
            total_interest_earned: display.round(maturity_value - total_invested + total_withdrawn),
        }
    }
}

/// Rounded headline figures of a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub instrument: Instrument,
    pub periods: u32,
    pub tenure_months: u32,
    pub maturity_value: f64,
    pub total_invested: f64,
    pub total_withdrawn: f64,
    pub total_interest_earned: f64,
}
