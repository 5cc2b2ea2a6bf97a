//! Pension LSV CLI
//!
//! Values a single case and prints the report (or the JSON result).
//! With no arguments it values the reference case against data/assumptions/.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use pension_lsv::assumptions::loader::{DEFAULT_ASSUMPTIONS_PATH, DEFAULT_MORTALITY_FILE, DEFAULT_RATES_FILE};
use pension_lsv::case::{load_case, CaseRequest, DEFAULT_DE_MINIMIS_THRESHOLD};
use pension_lsv::report::render_report;
use pension_lsv::{Assumptions, ValuationEngine};

#[derive(Debug, Parser)]
#[command(name = "pension_lsv", version, about = "Segmented-rate lump-sum valuation of a pension benefit")]
struct Cli {
    /// JSON case file; overrides the individual case flags
    #[arg(long)]
    case: Option<PathBuf>,

    /// Directory holding segment_rates.csv and the mortality table
    #[arg(long, default_value = DEFAULT_ASSUMPTIONS_PATH)]
    assumptions: PathBuf,

    /// Segment rate file (CSV or JSON); defaults to the assumptions directory
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Mortality file (CSV or JSON); defaults to the assumptions directory
    #[arg(long)]
    mortality: Option<PathBuf>,

    /// Date of birth
    #[arg(long, default_value = "1959-12-05")]
    dob: String,

    /// Termination of employment date
    #[arg(long, default_value = "2024-05-31")]
    dote: String,

    /// Benefit freeze date
    #[arg(long, default_value = "2020-07-31")]
    freeze_date: String,

    /// Normal retirement date
    #[arg(long, default_value = "2025-01-01")]
    nrd: String,

    /// Requested retirement date (annuity start date)
    #[arg(long, default_value = "2026-04-01")]
    dor: String,

    /// Plan termination date; selects the segment rates month
    #[arg(long, default_value = "2024-06-30")]
    dopt: String,

    /// Monthly benefit at normal retirement date
    #[arg(long, default_value_t = 73.79)]
    benefit: f64,

    /// LIFE_DUE_MTHLY, CERTAIN_N_CONTINUOUS or CERTAIN_N_AND_LIFE_DUE_MTHLY
    #[arg(long, default_value = "CERTAIN_N_AND_LIFE_DUE_MTHLY")]
    form: String,

    /// Certain period in years (may be 0)
    #[arg(long, default_value_t = 3.0)]
    n: f64,

    /// Skip the late retirement (PV ratio) adjustment
    #[arg(long)]
    no_late_retirement_adjustment: bool,

    /// De minimis threshold
    #[arg(long, default_value_t = DEFAULT_DE_MINIMIS_THRESHOLD)]
    threshold: f64,

    /// Print the result as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn case_request(&self) -> Result<CaseRequest> {
        if let Some(path) = &self.case {
            return load_case(path).with_context(|| format!("Failed to load case {}", path.display()));
        }

        Ok(CaseRequest {
            dob: self.dob.clone(),
            termination_of_employment: self.dote.clone(),
            benefit_freeze: self.freeze_date.clone(),
            normal_retirement: self.nrd.clone(),
            requested_retirement: self.dor.clone(),
            plan_termination: self.dopt.clone(),
            benefit_at_normal_retirement: self.benefit,
            form: self.form.clone(),
            n: Some(self.n),
            apply_late_retirement_adjustment: !self.no_late_retirement_adjustment,
            de_minimis_threshold: self.threshold,
        })
    }

    fn load_assumptions(&self) -> Result<Assumptions> {
        let rates_path = self
            .rates
            .clone()
            .unwrap_or_else(|| self.assumptions.join(DEFAULT_RATES_FILE));
        let mortality_path = self
            .mortality
            .clone()
            .unwrap_or_else(|| self.assumptions.join(DEFAULT_MORTALITY_FILE));

        Assumptions::from_files(&rates_path, &mortality_path).with_context(|| {
            format!(
                "Failed to load assumptions from {} and {}",
                rates_path.display(),
                mortality_path.display()
            )
        })
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let assumptions = cli.load_assumptions()?;
    let request = cli.case_request()?;

    let inputs = request
        .validate(&assumptions.rates, &assumptions.mortality)
        .context("Case rejected")?;
    info!("Valuing {} case, DOPT {}", inputs.form.tag(), inputs.dates.plan_termination);

    let result = ValuationEngine::default().compute_case(&inputs)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_report(&result));
    }

    Ok(())
}
