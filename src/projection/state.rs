//! Running balance for period-by-period projections

use super::cashflows::PeriodBreakdown;

/// Balance carried from one schedule row to the next
#[derive(Debug, Clone)]
pub struct BalanceState {
    /// Index of the last completed period (0 before the first)
    pub period_index: u32,

    /// Balance at the end of the last completed period
    pub balance: f64,
}

impl BalanceState {
    /// Start from an empty account
    pub fn new() -> Self {
        Self::with_opening(0.0)
    }

    /// Start from an existing balance (SWP corpus)
    pub fn with_opening(balance: f64) -> Self {
        Self {
            period_index: 0,
            balance,
        }
    }

    /// Advance one period with interest earned on the post-flow balance
    ///
    /// Contribution and withdrawal both happen at the start of the period,
    /// then `growth_rate` applies to what remains.
    pub fn advance(&mut self, contribution: f64, withdrawal: f64, growth_rate: f64) -> PeriodBreakdown {
        let invested = self.balance + contribution - withdrawal;
        let interest = invested * growth_rate;
        self.close(contribution, withdrawal, interest)
    }

    /// Advance one period with an already-computed interest credit
    pub fn advance_with_credit(&mut self, contribution: f64, interest_credited: f64) -> PeriodBreakdown {
        self.close(contribution, 0.0, interest_credited)
    }

    fn close(&mut self, contribution: f64, withdrawal: f64, interest: f64) -> PeriodBreakdown {
        self.period_index += 1;
        let opening_balance = self.balance;
        self.balance = opening_balance + contribution - withdrawal + interest;

        PeriodBreakdown {
            period_index: self.period_index,
            opening_balance,
            contribution,
            withdrawal,
            interest_accrued: interest,
            closing_balance: self.balance,
        }
    }
}

impl Default for BalanceState {
    fn default() -> Self {
        Self::new()
    }
}
