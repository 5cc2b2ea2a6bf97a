//! File-based assumption loader
//!
//! Loads segment rate tables and mortality tables from CSV (default, in
//! data/assumptions/) or JSON files.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;
use serde::Deserialize;

use super::mortality::{MortalityTable, MAX_TABLE_AGE};
use super::rates::{SegmentRateTable, SegmentRates};
use crate::error::{LsvError, Result};

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// Default segment rate file inside the assumptions directory
pub const DEFAULT_RATES_FILE: &str = "segment_rates.csv";

/// Default mortality file inside the assumptions directory
pub const DEFAULT_MORTALITY_FILE: &str = "mortality_417e_2024_unisex.csv";

/// Raw CSV row of segment_rates.csv
#[derive(Debug, Deserialize)]
struct RateRow {
    year_month: String,
    i1: f64,
    i2: f64,
    i3: f64,
}

/// Raw CSV row of a mortality table
#[derive(Debug, Deserialize)]
struct QxRow {
    age: u32,
    qx: f64,
}

/// JSON mortality document: `{"basisId": "...", "qx": [...]}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MortalityDocument {
    basis_id: String,
    qx: QxValues,
}

/// qx either as a dense array (index = age, null = missing) or keyed by age
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QxValues {
    Dense(Vec<Option<f64>>),
    ByAge(BTreeMap<String, f64>),
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

fn validate_rates(year_month: &str, rates: &SegmentRates) -> Result<()> {
    rates.check().map_err(|reason| LsvError::InvalidSegmentRates {
        year_month: year_month.to_string(),
        reason,
    })
}

fn validate_qx(age: u32, qx: f64) -> Result<()> {
    if age > MAX_TABLE_AGE {
        return Err(LsvError::InvalidTable(format!(
            "age {} is beyond the table limit of {}",
            age, MAX_TABLE_AGE
        )));
    }
    if !qx.is_finite() {
        return Err(LsvError::InvalidTable(format!("qx at age {} is not a finite number", age)));
    }
    Ok(())
}

/// Load a segment rate table from CSV with columns `year_month,i1,i2,i3`
pub fn load_segment_rates_csv<R: Read>(reader: R) -> Result<SegmentRateTable> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut table = SegmentRateTable::new();

    for result in reader.deserialize() {
        let row: RateRow = result?;
        let rates = SegmentRates::new(row.i1, row.i2, row.i3);
        validate_rates(&row.year_month, &rates)?;
        table.insert(row.year_month, rates);
    }

    Ok(table)
}

/// Load a segment rate table from JSON: `{"2024-06": {"i1": .., "i2": .., "i3": ..}}`
pub fn load_segment_rates_json<R: Read>(reader: R) -> Result<SegmentRateTable> {
    let by_month: BTreeMap<String, SegmentRates> = serde_json::from_reader(reader)?;
    for (year_month, rates) in &by_month {
        validate_rates(year_month, rates)?;
    }
    Ok(by_month.into_iter().collect())
}

/// Load a mortality table from CSV with columns `age,qx`
pub fn load_mortality_csv<R: Read>(basis_id: &str, reader: R) -> Result<MortalityTable> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut qx = BTreeMap::new();

    for result in reader.deserialize() {
        let row: QxRow = result?;
        validate_qx(row.age, row.qx)?;
        qx.insert(row.age, row.qx);
    }

    Ok(MortalityTable::new(basis_id, qx))
}

/// Load a mortality table from a JSON mortality document
pub fn load_mortality_json<R: Read>(reader: R) -> Result<MortalityTable> {
    let doc: MortalityDocument = serde_json::from_reader(reader)?;

    let mut qx = BTreeMap::new();
    match doc.qx {
        QxValues::Dense(values) => {
            for (age, value) in values.into_iter().enumerate() {
                if let Some(q) = value {
                    validate_qx(age as u32, q)?;
                    qx.insert(age as u32, q);
                }
            }
        }
        QxValues::ByAge(values) => {
            for (age, q) in values {
                let age: u32 = age
                    .trim()
                    .parse()
                    .map_err(|_| LsvError::InvalidTable(format!("age key {:?} is not an integer", age)))?;
                validate_qx(age, q)?;
                qx.insert(age, q);
            }
        }
    }

    Ok(MortalityTable::new(doc.basis_id, qx))
}

/// Load a segment rate table, choosing the format from the file extension
pub fn load_segment_rates(path: &Path) -> Result<SegmentRateTable> {
    let file = File::open(path)?;
    let table = if is_json(path) {
        load_segment_rates_json(file)?
    } else {
        load_segment_rates_csv(file)?
    };
    info!("Loaded segment rates for {} months from {}", table.len(), path.display());
    Ok(table)
}

/// Load a mortality table, choosing the format from the file extension
///
/// CSV tables carry no basis identifier, so the file stem is used.
pub fn load_mortality(path: &Path) -> Result<MortalityTable> {
    let file = File::open(path)?;
    let table = if is_json(path) {
        load_mortality_json(file)?
    } else {
        let basis_id = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("unnamed")
            .trim_start_matches("mortality_")
            .to_string();
        load_mortality_csv(&basis_id, file)?
    };
    info!(
        "Loaded mortality basis {} ({} ages) from {}",
        table.basis_id(),
        table.len(),
        path.display()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_assumption_files() {
        let dir = Path::new(DEFAULT_ASSUMPTIONS_PATH);

        let rates = load_segment_rates(&dir.join(DEFAULT_RATES_FILE)).expect("Failed to load rates");
        assert_eq!(rates.len(), 24);
        assert_eq!(rates.get("2024-06"), Some(SegmentRates::new(0.0493, 0.0532, 0.0554)));

        let mortality = load_mortality(&dir.join(DEFAULT_MORTALITY_FILE)).expect("Failed to load mortality");
        assert_eq!(mortality.basis_id(), "417e_2024_unisex");
        assert_eq!(mortality.age_range(), Some((0, 120)));
        assert_eq!(mortality.qx(65), Some(0.009169));
        assert_eq!(mortality.qx(120), Some(1.0));
    }

    #[test]
    fn test_rates_csv_rejects_rate_at_minus_one() {
        let data = "year_month,i1,i2,i3\n2024-06,0.05,-1.0,0.05\n";
        let err = load_segment_rates_csv(data.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), "InvalidSegmentRates");
        assert!(err.to_string().contains("2024-06"));
    }

    #[test]
    fn test_rates_json() {
        let data = r#"{"2024-06": {"i1": 0.05, "i2": 0.052, "i3": 0.054},
                       "2024-07": {"i1": 0.051, "i2": 0.053, "i3": 0.055}}"#;
        let table = load_segment_rates_json(data.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("2024-07").unwrap().i3, 0.055);
    }

    #[test]
    fn test_mortality_json_dense_and_keyed() {
        let dense = r#"{"basisId": "dense", "qx": [0.01, null, 0.03]}"#;
        let table = load_mortality_json(dense.as_bytes()).unwrap();
        assert_eq!(table.basis_id(), "dense");
        assert_eq!(table.qx(0), Some(0.01));
        assert_eq!(table.qx(1), None);
        assert_eq!(table.qx(2), Some(0.03));

        let keyed = r#"{"basisId": "keyed", "qx": {"65": 0.009, "66": 0.010}}"#;
        let table = load_mortality_json(keyed.as_bytes()).unwrap();
        assert_eq!(table.qx(66), Some(0.010));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_mortality_rejects_out_of_range_age() {
        let data = "age,qx\n121,1.0\n";
        let err = load_mortality_csv("bad", data.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), "InvalidTable");

        let keyed = r#"{"basisId": "bad", "qx": {"sixty": 0.01}}"#;
        assert!(load_mortality_json(keyed.as_bytes()).is_err());
    }
}
