//! Financial Projection Engine - pure projectors behind retail investment calculators
//!
//! This library provides:
//! - SIP, step-up SIP, lumpsum, RD, FD and PPF maturity projections
//! - NPS corpus with annuity/lump-sum split and pension estimate
//! - Retirement and goal planning (required corpus, SIP, lumpsum)
//! - SWP depletion schedules with explicit terminal states
//! - Period-by-period schedules, display rounding, and effective yields

pub mod error;
pub mod assumptions;
pub mod inputs;
pub mod projection;
pub mod calculators;
pub mod scenario;

// Re-export commonly used types
pub use error::{InputIssue, ProjectionError};
pub use assumptions::Assumptions;
pub use inputs::{CompoundingFrequency, InvestmentInput, Tenure};
pub use projection::{PeriodBreakdown, ProjectionResult, ProjectionSummary};
pub use scenario::Calculator;
