//! Load case requests from JSON

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::CaseRequest;
use crate::error::Result;

/// Load a case request from a JSON file
pub fn load_case<P: AsRef<Path>>(path: P) -> Result<CaseRequest> {
    let file = File::open(path)?;
    load_case_from_reader(file)
}

/// Load a case request from any reader (e.g., string buffer, stdin)
pub fn load_case_from_reader<R: Read>(reader: R) -> Result<CaseRequest> {
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_case_with_short_names_and_defaults() {
        let json = r#"{
            "dob": "1959-12-05",
            "dote": "2024-05-31",
            "freeze_date": "2020-07-31",
            "nrd": "2025-01-01",
            "dor": "2026-04-01",
            "dopt": "2024-06-30",
            "benefit_at_nrd": 73.79,
            "form": "CERTAIN_N_AND_LIFE_DUE_MTHLY",
            "n": 3
        }"#;
        let request = load_case_from_reader(json.as_bytes()).unwrap();
        assert_eq!(request, CaseRequest::worked_example());
    }

    #[test]
    fn test_load_case_rejects_malformed_json() {
        let err = load_case_from_reader("{\"dob\": ".as_bytes()).unwrap_err();
        assert_eq!(err.kind(), "Json");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_case("does/not/exist.json").unwrap_err();
        assert_eq!(err.kind(), "Io");
    }
}
