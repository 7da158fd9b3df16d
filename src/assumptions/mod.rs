//! Projection assumptions: input ceilings, scheme rules, and display precision
//!
//! Nothing here is global. Callers build an `Assumptions` value (defaults or
//! loaded from JSON) and pass it into each projector explicitly.

mod limits;
mod schemes;
pub mod loader;

pub use limits::{InputLimits, TENURE_YEARS_CEILING};
pub use schemes::{NpsRules, PpfRules};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rounding applied when results are shown, never during computation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayRules {
    /// Decimal places of the smallest currency unit (2 = paise)
    pub currency_decimals: u32,
}

impl Default for DisplayRules {
    fn default() -> Self {
        Self { currency_decimals: 2 }
    }
}

impl DisplayRules {
    /// Round an amount to the display precision
    ///
    /// Halves round away from zero on the binary value, so an amount such as
    /// 1.005, stored as 1.00499..., rounds down to 1.00.
    pub fn round(&self, amount: f64) -> f64 {
        let scale = 10f64.powi(self.currency_decimals as i32);
        (amount * scale).round() / scale
    }
}

/// Container for everything a projector may need beyond its own inputs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    pub limits: InputLimits,
    pub ppf: PpfRules,
    pub nps: NpsRules,
    pub display: DisplayRules,
}

impl Assumptions {
    /// Built-in defaults (current PPF rate, NPS 40% annuity floor, 600-month SWP cap)
    pub fn standard() -> Self {
        Self::default()
    }

    /// Load assumptions from the default location (config/assumptions.json)
    pub fn from_json() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_json_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load assumptions from a specific JSON file
    pub fn from_json_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        loader::load_assumptions(path)
    }

    /// Reject configurations no projector could run against
    pub fn check(&self) -> Result<(), String> {
        let max_rate = self.limits.max_annual_rate_percent;
        if !max_rate.is_finite() || max_rate <= 0.0 {
            return Err("limits.max_annual_rate_percent must be positive".into());
        }
        if self.limits.max_tenure_years == 0 || self.limits.max_withdrawal_months == 0 {
            return Err("limits tenure ceilings must be at least 1".into());
        }
        if self.limits.max_tenure_years > TENURE_YEARS_CEILING {
            return Err(format!("limits.max_tenure_years may not exceed {}", TENURE_YEARS_CEILING));
        }
        if self.ppf.min_annual_deposit <= 0.0
            || self.ppf.max_annual_deposit < self.ppf.min_annual_deposit
        {
            return Err(format!(
                "ppf deposit bounds are inconsistent: {} to {}",
                self.ppf.min_annual_deposit, self.ppf.max_annual_deposit
            ));
        }
        if !(0.0..=1.0).contains(&self.nps.min_annuity_ratio) {
            return Err("nps.min_annuity_ratio must lie in [0, 1]".into());
        }
        if self.nps.min_entry_age >= self.nps.retirement_age {
            return Err("nps.min_entry_age must be below nps.retirement_age".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_is_consistent() {
        assert!(Assumptions::standard().check().is_ok());
    }

    #[test]
    fn test_display_rounding() {
        let display = DisplayRules::default();
        assert_eq!(display.round(146_932.8077), 146_932.81);
        assert_eq!(display.round(0.004), 0.0);

        let rupees = DisplayRules { currency_decimals: 0 };
        assert_eq!(rupees.round(63_412.48), 63_412.0);
        assert_eq!(display.round(1.005), 1.0);
    }

    #[test]
    fn test_oversized_tenure_ceiling_rejected() {
        let mut assumptions = Assumptions::standard();
        assumptions.limits.max_tenure_years = u32::MAX;
        assert!(assumptions.check().is_err());

        assumptions.limits.max_tenure_years = TENURE_YEARS_CEILING;
        assert!(assumptions.check().is_ok());
    }
}
