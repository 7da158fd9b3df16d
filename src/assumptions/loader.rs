//! JSON-based assumption loader
//!
//! Loads rate ceilings and scheme rules from config/assumptions.json. Any
//! section or field missing from the file keeps its built-in default.

use std::error::Error;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::Assumptions;

/// Default path to the assumptions file
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "config/assumptions.json";

/// Load assumptions from a JSON file
pub fn load_assumptions(path: &Path) -> Result<Assumptions, Box<dyn Error>> {
    let file = File::open(path)?;
    load_assumptions_from_reader(BufReader::new(file))
}

/// Load assumptions from any JSON reader
pub fn load_assumptions_from_reader<R: Read>(reader: R) -> Result<Assumptions, Box<dyn Error>> {
    let assumptions: Assumptions = serde_json::from_reader(reader)?;
    assumptions.check()?;
    log::debug!(
        "Loaded assumptions: max rate {}%, PPF rate {}%",
        assumptions.limits.max_annual_rate_percent,
        assumptions.ppf.annual_rate_percent
    );
    Ok(assumptions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_file() {
        let result = load_assumptions(Path::new(DEFAULT_ASSUMPTIONS_PATH));
        assert!(result.is_ok(), "Failed to load assumptions: {:?}", result.err());

        let assumptions = result.unwrap();
        assert_eq!(assumptions.ppf.lock_in_years, 15);
        assert_eq!(assumptions.limits.max_withdrawal_months, 600);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let json = r#"{ "ppf": { "annual_rate_percent": 7.6 } }"#;
        let assumptions = load_assumptions_from_reader(json.as_bytes()).unwrap();

        assert_eq!(assumptions.ppf.annual_rate_percent, 7.6);
        assert_eq!(assumptions.ppf.max_annual_deposit, 150_000.0);
        assert_eq!(assumptions.nps.retirement_age, 60);
    }

    #[test]
    fn test_rejects_inverted_deposit_bounds() {
        let json = r#"{ "ppf": { "min_annual_deposit": 5000, "max_annual_deposit": 500 } }"#;
        assert!(load_assumptions_from_reader(json.as_bytes()).is_err());
    }
}
