//! Valuation assumptions: segment interest rates and mortality

mod mortality;
mod rates;
pub mod loader;

pub use mortality::{MortalityTable, MAX_TABLE_AGE};
pub use rates::{SegmentRateTable, SegmentRates, FIRST_SEGMENT_END, SECOND_SEGMENT_END};

use std::path::Path;

use crate::error::Result;

/// Container for the tables a valuation reads
///
/// Both tables are immutable once loaded and are passed to the engine by reference.
#[derive(Debug, Clone)]
pub struct Assumptions {
    pub rates: SegmentRateTable,
    pub mortality: MortalityTable,
}

impl Assumptions {
    pub fn new(rates: SegmentRateTable, mortality: MortalityTable) -> Self {
        Self { rates, mortality }
    }

    /// Load assumptions from the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load the default rate and mortality files from a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Self::from_files(
            &path.join(loader::DEFAULT_RATES_FILE),
            &path.join(loader::DEFAULT_MORTALITY_FILE),
        )
    }

    /// Load from explicit rate and mortality files (CSV or JSON)
    pub fn from_files(rates_path: &Path, mortality_path: &Path) -> Result<Self> {
        Ok(Self {
            rates: loader::load_segment_rates(rates_path)?,
            mortality: loader::load_mortality(mortality_path)?,
        })
    }
}
