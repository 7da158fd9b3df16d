//! Calculator inputs and batch scenario loading

mod data;
pub mod loader;

pub use data::{parse_amount, parse_count, CompoundingFrequency, InvestmentInput, Tenure};
pub use loader::{load_scenarios, load_scenarios_from_reader, CalculatorKind, LoadedScenario, Scenario};
