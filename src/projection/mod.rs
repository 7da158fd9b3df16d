//! Projection schedules, results, and yield analytics

mod state;
mod cashflows;
mod irr;

pub use state::BalanceState;
pub use cashflows::{Instrument, PeriodBreakdown, PeriodUnit, ProjectionResult, ProjectionSummary};
pub use irr::calculate_irr;
