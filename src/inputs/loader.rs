//! Load batch scenarios from CSV
//!
//! Every field is read as text and parsed the same way a form field is, so a
//! bad cell becomes a per-row validation error instead of aborting the file.

use std::error::Error;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::Reader;
use serde::{Deserialize, Serialize};

use super::{parse_amount, parse_count, CompoundingFrequency, InvestmentInput, Tenure};
use crate::error::{InputIssue, ProjectionError, Result};

/// Calculators that take a plain `InvestmentInput`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculatorKind {
    Sip,
    Lumpsum,
    Rd,
    Fd,
    Ppf,
}

impl CalculatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculatorKind::Sip => "sip",
            CalculatorKind::Lumpsum => "lumpsum",
            CalculatorKind::Rd => "rd",
            CalculatorKind::Fd => "fd",
            CalculatorKind::Ppf => "ppf",
        }
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculatorKind {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sip" => Ok(CalculatorKind::Sip),
            "lumpsum" | "lump-sum" => Ok(CalculatorKind::Lumpsum),
            "rd" => Ok(CalculatorKind::Rd),
            "fd" => Ok(CalculatorKind::Fd),
            "ppf" => Ok(CalculatorKind::Ppf),
            other => Err(ProjectionError::invalid(
                "calculator",
                InputIssue::Inconsistent(format!("unknown calculator '{}'", other)),
            )),
        }
    }
}

/// One calculator run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub kind: CalculatorKind,
    pub input: InvestmentInput,
}

/// A CSV row after parsing, valid or not
#[derive(Debug, Clone)]
pub struct LoadedScenario {
    pub id: String,
    pub scenario: Result<Scenario>,
}

/// Raw CSV row; every cell kept as text
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "ScenarioID")]
    id: String,
    #[serde(rename = "Calculator")]
    calculator: String,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "RatePct")]
    rate: String,
    #[serde(rename = "TenureMonths")]
    tenure_months: String,
    #[serde(rename = "Compounding", default)]
    compounding: String,
}

impl CsvRow {
    fn to_scenario(&self) -> Result<Scenario> {
        let kind: CalculatorKind = self.calculator.parse()?;
        let amount = parse_amount("amount", &self.amount)?;
        let rate = parse_amount("annual_rate_percent", &self.rate)?;
        let months = parse_count("tenure_months", &self.tenure_months)?;

        let compounding = if self.compounding.trim().is_empty() {
            match kind {
                CalculatorKind::Fd => CompoundingFrequency::Quarterly,
                _ => CompoundingFrequency::Annual,
            }
        } else {
            self.compounding.parse()?
        };

        Ok(Scenario {
            kind,
            input: InvestmentInput::new(amount, rate, Tenure::Months(months)).with_compounding(compounding),
        })
    }
}

/// Load scenarios from a CSV file
pub fn load_scenarios(path: &Path) -> std::result::Result<Vec<LoadedScenario>, Box<dyn Error>> {
    let reader = Reader::from_path(path)?;
    read_scenarios(reader)
}

/// Load scenarios from any reader (for testing)
pub fn load_scenarios_from_reader<R: Read>(reader: R) -> std::result::Result<Vec<LoadedScenario>, Box<dyn Error>> {
    read_scenarios(Reader::from_reader(reader))
}

fn read_scenarios<R: Read>(mut reader: Reader<R>) -> std::result::Result<Vec<LoadedScenario>, Box<dyn Error>> {
    let mut scenarios = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(LoadedScenario {
            id: row.id.clone(),
            scenario: row.to_scenario(),
        });
    }

    Ok(scenarios)
}
