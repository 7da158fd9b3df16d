//! Financial projection CLI
//!
//! Runs one calculator from the command line and prints the summary and schedule

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use financial_projection::{
    assumptions::DisplayRules,
    calculators::{
        FdInput, GoalInput, LumpsumInput, NpsInput, PpfInput, RdInput, RetirementInput, SipInput,
        StepUpSipInput, SwpInput, SwpOutcome,
    },
    Assumptions, Calculator, CompoundingFrequency, ProjectionResult,
};

/// Rows printed to the console unless --full-schedule is given
const PREVIEW_ROWS: usize = 24;

#[derive(Debug, Parser)]
#[command(name = "finproj", version, about = "Investment calculator projections")]
struct Cli {
    /// Assumptions JSON file (built-in defaults if omitted)
    #[arg(long, global = true)]
    assumptions: Option<PathBuf>,

    /// Print every schedule row
    #[arg(long, global = true)]
    full_schedule: bool,

    /// Also write the schedule to this CSV file
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    /// Date of the first investment (YYYY-MM-DD), used for the maturity date
    #[arg(long, global = true)]
    start_date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Monthly SIP
    Sip {
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        months: u32,
    },
    /// Monthly SIP raised every year
    StepUpSip {
        #[arg(long)]
        amount: f64,
        /// Yearly raise in percent
        #[arg(long)]
        step_up: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        months: u32,
    },
    /// One-time investment
    Lumpsum {
        #[arg(long)]
        principal: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        years: u32,
        #[arg(long, default_value = "annual")]
        compounding: CompoundingFrequency,
    },
    /// Recurring deposit
    Rd {
        #[arg(long)]
        deposit: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        months: u32,
    },
    /// Fixed deposit
    Fd {
        #[arg(long)]
        principal: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        months: u32,
        #[arg(long, default_value = "quarterly")]
        compounding: CompoundingFrequency,
    },
    /// Public Provident Fund
    Ppf {
        #[arg(long)]
        deposit: f64,
        #[arg(long)]
        years: Option<u32>,
        #[arg(long)]
        rate: Option<f64>,
    },
    /// National Pension System
    Nps {
        #[arg(long)]
        contribution: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        age: u32,
        #[arg(long)]
        retirement_age: Option<u32>,
        #[arg(long, default_value_t = 0.4)]
        annuity_ratio: f64,
        #[arg(long)]
        annuity_rate: Option<f64>,
    },
    /// Retirement corpus and required SIP
    Retirement {
        #[arg(long)]
        age: u32,
        #[arg(long)]
        retirement_age: u32,
        #[arg(long)]
        life_expectancy: u32,
        #[arg(long)]
        monthly_expense: f64,
        #[arg(long)]
        inflation: f64,
        #[arg(long)]
        pre_return: f64,
        #[arg(long)]
        post_return: f64,
        #[arg(long, default_value_t = 0.0)]
        savings: f64,
    },
    /// Savings needed for a future goal
    Goal {
        #[arg(long)]
        target: f64,
        #[arg(long)]
        years: u32,
        #[arg(long)]
        inflation: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long, default_value_t = 0.0)]
        savings: f64,
    },
    /// Systematic withdrawal plan
    Swp {
        #[arg(long)]
        corpus: f64,
        #[arg(long)]
        withdrawal: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        months: Option<u32>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let assumptions = match &cli.assumptions {
        Some(path) => Assumptions::from_json_path(path)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("loading assumptions from {}", path.display()))?,
        None => Assumptions::standard(),
    };
    let display = assumptions.display.clone();
    let calculator = Calculator::with_assumptions(assumptions);

    let result = match cli.command {
        Command::Sip { amount, rate, months } => calculator.sip(&SipInput {
            monthly_amount: amount,
            annual_rate_percent: rate,
            tenure_months: months,
        })?,
        Command::StepUpSip { amount, step_up, rate, months } => calculator.step_up_sip(&StepUpSipInput {
            monthly_amount: amount,
            annual_step_up_percent: step_up,
            annual_rate_percent: rate,
            tenure_months: months,
        })?,
        Command::Lumpsum { principal, rate, years, compounding } => calculator.lumpsum(&LumpsumInput {
            principal,
            annual_rate_percent: rate,
            tenure_years: years,
            compounding,
        })?,
        Command::Rd { deposit, rate, months } => calculator.rd(&RdInput {
            monthly_deposit: deposit,
            annual_rate_percent: rate,
            tenure_months: months,
        })?,
        Command::Fd { principal, rate, months, compounding } => calculator.fd(&FdInput {
            principal,
            annual_rate_percent: rate,
            tenure_months: months,
            compounding,
        })?,
        Command::Ppf { deposit, years, rate } => calculator.ppf(&PpfInput {
            annual_deposit: deposit,
            tenure_years: years,
            annual_rate_percent: rate,
        })?,
        Command::Nps { contribution, rate, age, retirement_age, annuity_ratio, annuity_rate } => {
            let nps = calculator.nps(&NpsInput {
                monthly_contribution: contribution,
                annual_rate_percent: rate,
                current_age: age,
                retirement_age,
                annuity_ratio,
                annuity_rate_percent: annuity_rate,
            })?;
            println!("NPS at exit:");
            println!("  Corpus:           {:>16.2}", display.round(nps.corpus));
            println!("  Annuity purchase: {:>16.2} ({:.0}%)", display.round(nps.annuity_purchase), nps.annuity_ratio * 100.0);
            println!("  Lump sum:         {:>16.2}", display.round(nps.lump_sum));
            println!("  Monthly pension:  {:>16.2}", display.round(nps.monthly_pension));
            println!();
            nps.accumulation
        }
        Command::Retirement {
            age,
            retirement_age,
            life_expectancy,
            monthly_expense,
            inflation,
            pre_return,
            post_return,
            savings,
        } => {
            let plan = calculator.retirement(&RetirementInput {
                current_age: age,
                retirement_age,
                life_expectancy,
                monthly_expense,
                inflation_percent: inflation,
                pre_retirement_return_percent: pre_return,
                post_retirement_return_percent: post_return,
                existing_savings: savings,
            })?;
            println!("Retirement plan:");
            println!("  Monthly expense at retirement: {:>16.2}", display.round(plan.future_monthly_expense));
            println!("  Corpus required:               {:>16.2}", display.round(plan.corpus_required));
            println!("  Savings at retirement:         {:>16.2}", display.round(plan.savings_future_value));
            println!("  Shortfall:                     {:>16.2}", display.round(plan.shortfall));
            println!("  Required monthly SIP:          {:>16.2}", display.round(plan.required_monthly_sip));
            println!();
            plan.accumulation
        }
        Command::Goal { target, years, inflation, rate, savings } => {
            let plan = calculator.goal(&GoalInput {
                target_amount: target,
                years,
                inflation_percent: inflation,
                annual_rate_percent: rate,
                existing_savings: savings,
            })?;
            println!("Goal plan:");
            println!("  Cost when due:        {:>16.2}", display.round(plan.inflated_target));
            println!("  Savings when due:     {:>16.2}", display.round(plan.savings_future_value));
            println!("  Required monthly SIP: {:>16.2}", display.round(plan.required_monthly_sip));
            println!("  Or lumpsum today:     {:>16.2}", display.round(plan.required_lumpsum));
            println!();
            plan.accumulation
        }
        Command::Swp { corpus, withdrawal, rate, months } => {
            let plan = calculator.swp(&SwpInput {
                corpus,
                monthly_withdrawal: withdrawal,
                annual_rate_percent: rate,
                tenure_months: months,
            })?;
            match &plan.outcome {
                SwpOutcome::Exhausted { period, last_withdrawal } => println!(
                    "Corpus exhausted in month {} (final withdrawal {:.2})\n",
                    period,
                    display.round(*last_withdrawal)
                ),
                SwpOutcome::Completed { remaining_corpus } => println!(
                    "Plan completed with {:.2} remaining\n",
                    display.round(*remaining_corpus)
                ),
            }
            plan.schedule
        }
    };

    print_result(&result, &display, cli.full_schedule, cli.start_date);

    if let Some(path) = &cli.csv {
        write_schedule_csv(&result, path)?;
        println!("\nFull schedule written to: {}", path.display());
    }

    Ok(())
}

fn print_result(result: &ProjectionResult, display: &DisplayRules, full: bool, start: Option<NaiveDate>) {
    let summary = result.summary(display);

    println!("{} projection ({} periods):", result.instrument.as_str(), summary.periods);
    println!("{:>6} {:>16} {:>14} {:>14} {:>14} {:>16}",
        "Period", "Opening", "Contribution", "Withdrawal", "Interest", "Closing");
    println!("{}", "-".repeat(85));

    let shown = if full { result.schedule.len() } else { PREVIEW_ROWS };
    for row in result.schedule.iter().take(shown) {
        println!("{:>6} {:>16.2} {:>14.2} {:>14.2} {:>14.2} {:>16.2}",
            row.period_index,
            display.round(row.opening_balance),
            display.round(row.contribution),
            display.round(row.withdrawal),
            display.round(row.interest_accrued),
            display.round(row.closing_balance),
        );
    }
    if result.schedule.len() > shown {
        println!("... ({} more periods)", result.schedule.len() - shown);
    }

    println!("\nSummary:");
    println!("  Total invested:  {:>16.2}", summary.total_invested);
    if summary.total_withdrawn > 0.0 {
        println!("  Total withdrawn: {:>16.2}", summary.total_withdrawn);
    }
    println!("  Interest earned: {:>16.2}", summary.total_interest_earned);
    println!("  Maturity value:  {:>16.2}", summary.maturity_value);
    if let Some(yield_rate) = result.annualized_return() {
        println!("  Effective yield: {:>15.2}%", yield_rate * 100.0);
    }
    if let Some(date) = start.and_then(|s| result.maturity_date(s)) {
        println!("  Maturity date:   {:>16}", date);
    }
}

fn write_schedule_csv(result: &ProjectionResult, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in &result.schedule {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
