//! Scheme rules for government-backed instruments (PPF, NPS)
//!
//! Rates and deposit bounds change by notification, so they live here as
//! data rather than inside the projectors.

use serde::{Deserialize, Serialize};

/// Public Provident Fund rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PpfRules {
    /// Notified annual rate (percent), compounded yearly
    pub annual_rate_percent: f64,

    pub min_annual_deposit: f64,

    pub max_annual_deposit: f64,

    /// Mandatory account life in years
    pub lock_in_years: u32,

    /// Extensions after lock-in come in blocks of this many years
    pub extension_block_years: u32,
}

impl Default for PpfRules {
    fn default() -> Self {
        Self {
            annual_rate_percent: 7.1,
            min_annual_deposit: 500.0,
            max_annual_deposit: 150_000.0,
            lock_in_years: 15,
            extension_block_years: 5,
        }
    }
}

impl PpfRules {
    /// Whether `years` is the lock-in plus a whole number of extension blocks
    pub fn is_valid_tenure(&self, years: u32) -> bool {
        if years < self.lock_in_years {
            return false;
        }
        let extra = years - self.lock_in_years;
        match self.extension_block_years {
            0 => extra == 0,
            block => extra % block == 0,
        }
    }
}

/// National Pension System rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NpsRules {
    /// Normal exit age
    pub retirement_age: u32,

    pub min_entry_age: u32,

    pub max_entry_age: u32,

    /// Minimum share of the corpus that must buy an annuity at exit
    pub min_annuity_ratio: f64,

    /// Annuity rate (percent) used when the caller does not give one
    pub default_annuity_rate_percent: f64,
}

impl Default for NpsRules {
    fn default() -> Self {
        Self {
            retirement_age: 60,
            min_entry_age: 18,
            max_entry_age: 70,
            min_annuity_ratio: 0.40,
            default_annuity_rate_percent: 6.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ppf_tenure_blocks() {
        let rules = PpfRules::default();
        assert!(!rules.is_valid_tenure(10));
        assert!(rules.is_valid_tenure(15));
        assert!(!rules.is_valid_tenure(17));
        assert!(rules.is_valid_tenure(20));
        assert!(rules.is_valid_tenure(25));
    }
}
