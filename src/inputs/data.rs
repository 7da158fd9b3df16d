//! Input value objects populated from calculator form fields

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{InputIssue, ProjectionError, Result};

/// How often interest is compounded within a year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompoundingFrequency {
    #[default]
    Annual,
    SemiAnnual,
    Quarterly,
    Monthly,
}

impl CompoundingFrequency {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Annual => 1,
            CompoundingFrequency::SemiAnnual => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
        }
    }

    /// Months covered by one compounding period
    pub fn months_per_period(&self) -> u32 {
        12 / self.periods_per_year()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompoundingFrequency::Annual => "annual",
            CompoundingFrequency::SemiAnnual => "semiannual",
            CompoundingFrequency::Quarterly => "quarterly",
            CompoundingFrequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for CompoundingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompoundingFrequency {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annual" | "annually" | "yearly" | "1" => Ok(CompoundingFrequency::Annual),
            "semiannual" | "semi-annual" | "half-yearly" | "2" => Ok(CompoundingFrequency::SemiAnnual),
            "quarterly" | "4" => Ok(CompoundingFrequency::Quarterly),
            "monthly" | "12" => Ok(CompoundingFrequency::Monthly),
            other => Err(ProjectionError::invalid(
                "compounding",
                InputIssue::Inconsistent(format!("unknown compounding frequency '{}'", other)),
            )),
        }
    }
}

/// Investment horizon as entered on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tenure {
    Months(u32),
    Years(u32),
}

impl Tenure {
    pub fn in_months(&self) -> u32 {
        match *self {
            Tenure::Months(months) => months,
            Tenure::Years(years) => years.saturating_mul(12),
        }
    }

    /// Whole years, or an error for month tenures that do not divide evenly
    pub fn whole_years(&self, field: &'static str) -> Result<u32> {
        match *self {
            Tenure::Years(years) => Ok(years),
            Tenure::Months(months) if months % 12 == 0 => Ok(months / 12),
            Tenure::Months(months) => Err(ProjectionError::invalid(
                field,
                InputIssue::Inconsistent(format!("{} months is not a whole number of years", months)),
            )),
        }
    }
}

/// Generic single-instrument input: principal or periodic amount, rate, tenure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentInput {
    /// Principal (lumpsum, FD) or periodic amount (SIP, RD)
    pub amount: f64,

    /// Annual rate in percent (12.0 = 12%)
    pub annual_rate_percent: f64,

    pub tenure: Tenure,

    #[serde(default)]
    pub compounding: CompoundingFrequency,
}

impl InvestmentInput {
    pub fn new(amount: f64, annual_rate_percent: f64, tenure: Tenure) -> Self {
        Self {
            amount,
            annual_rate_percent,
            tenure,
            compounding: CompoundingFrequency::default(),
        }
    }

    pub fn with_compounding(mut self, compounding: CompoundingFrequency) -> Self {
        self.compounding = compounding;
        self
    }
}

/// Parse a money or rate field as typed by a user ("1,50,000", "₹ 5000", "7.1")
pub fn parse_amount(field: &'static str, text: &str) -> Result<f64> {
    let cleaned: String = text
        .trim()
        .trim_start_matches('₹')
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Err(ProjectionError::invalid(field, InputIssue::NotNumeric));
    }

    let value: f64 = cleaned
        .parse()
        .map_err(|_| ProjectionError::invalid(field, InputIssue::NotNumeric))?;

    if !value.is_finite() {
        return Err(ProjectionError::invalid(field, InputIssue::NotFinite));
    }
    Ok(value)
}

/// Parse a whole-number field such as a tenure or an age
pub fn parse_count(field: &'static str, text: &str) -> Result<u32> {
    let trimmed = text.trim();
    if let Some(stripped) = trimmed.strip_prefix('-') {
        if stripped.parse::<u32>().is_ok() {
            return Err(ProjectionError::invalid(field, InputIssue::Negative));
        }
    }
    trimmed
        .parse()
        .map_err(|_| ProjectionError::invalid(field, InputIssue::NotNumeric))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_accepts_grouped_rupees() {
        assert_eq!(parse_amount("amount", "1,50,000"), Ok(150_000.0));
        assert_eq!(parse_amount("amount", " ₹ 5000 "), Ok(5000.0));
        assert_eq!(parse_amount("rate", "7.1%"), Ok(7.1));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(
            parse_amount("amount", "12abc"),
            Err(ProjectionError::invalid("amount", InputIssue::NotNumeric))
        );
        assert_eq!(
            parse_amount("amount", ""),
            Err(ProjectionError::invalid("amount", InputIssue::NotNumeric))
        );
        assert_eq!(
            parse_amount("amount", "NaN"),
            Err(ProjectionError::invalid("amount", InputIssue::NotFinite))
        );
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("tenure_months", " 36 "), Ok(36));
        assert_eq!(
            parse_count("tenure_months", "-3"),
            Err(ProjectionError::invalid("tenure_months", InputIssue::Negative))
        );
        assert!(parse_count("tenure_months", "3.5").is_err());
    }

    #[test]
    fn test_tenure_conversions() {
        assert_eq!(Tenure::Years(5).in_months(), 60);
        assert_eq!(Tenure::Months(24).whole_years("tenure"), Ok(2));
        assert!(Tenure::Months(18).whole_years("tenure").is_err());
    }

    #[test]
    fn test_frequency_parsing() {
        assert_eq!("Quarterly".parse::<CompoundingFrequency>(), Ok(CompoundingFrequency::Quarterly));
        assert_eq!("half-yearly".parse::<CompoundingFrequency>(), Ok(CompoundingFrequency::SemiAnnual));
        assert!("weekly".parse::<CompoundingFrequency>().is_err());
        assert_eq!(CompoundingFrequency::Quarterly.months_per_period(), 3);
    }
}
