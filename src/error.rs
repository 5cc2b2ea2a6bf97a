//! Error taxonomy for lump-sum valuation
//!
//! Engine errors (`UnsupportedPaymentFrequency`, `UnknownBenefitForm`) are raised by
//! the annuity factor calculator and propagate unchanged through the engine.
//! The remaining kinds belong to the caller side: request validation and table loading.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LsvError {
    #[error("unsupported payment frequency: {frequency} payments per year (only 12 is supported)")]
    UnsupportedPaymentFrequency { frequency: u32 },

    #[error("unknown benefit form: {0}")]
    UnknownBenefitForm(String),

    #[error("invalid date input for {field}: {value:?}")]
    InvalidDateInput { field: &'static str, value: String },

    #[error("no segment rates found for plan termination month {0}")]
    MissingRateTableForMonth(String),

    #[error("benefit at normal retirement must be a nonnegative number, got {0}")]
    InvalidBenefitAmount(f64),

    #[error("certain period n must be >= 0 for this form, got {0}")]
    InvalidCertainPeriod(f64),

    #[error("invalid segment rates for {year_month}: {reason}")]
    InvalidSegmentRates { year_month: String, reason: String },

    #[error("de minimis threshold must be a finite number, got {0}")]
    InvalidThreshold(f64),

    #[error("invalid table: {0}")]
    InvalidTable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LsvError {
    /// Stable identifier of the error kind, for callers that branch on failure
    pub fn kind(&self) -> &'static str {
        match self {
            LsvError::UnsupportedPaymentFrequency { .. } => "UnsupportedPaymentFrequency",
            LsvError::UnknownBenefitForm(_) => "UnknownBenefitForm",
            LsvError::InvalidDateInput { .. } => "InvalidDateInput",
            LsvError::MissingRateTableForMonth(_) => "MissingRateTableForMonth",
            LsvError::InvalidBenefitAmount(_) => "InvalidBenefitAmount",
            LsvError::InvalidCertainPeriod(_) => "InvalidCertainPeriod",
            LsvError::InvalidSegmentRates { .. } => "InvalidSegmentRates",
            LsvError::InvalidThreshold(_) => "InvalidThreshold",
            LsvError::InvalidTable(_) => "InvalidTable",
            LsvError::Io(_) => "Io",
            LsvError::Csv(_) => "Csv",
            LsvError::Json(_) => "Json",
        }
    }

    /// True for the errors raised inside the valuation engine itself
    pub fn is_engine_error(&self) -> bool {
        matches!(
            self,
            LsvError::UnsupportedPaymentFrequency { .. } | LsvError::UnknownBenefitForm(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LsvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_message() {
        let err = LsvError::UnsupportedPaymentFrequency { frequency: 4 };
        assert_eq!(err.kind(), "UnsupportedPaymentFrequency");
        assert!(err.is_engine_error());
        assert!(err.to_string().contains("4 payments per year"));

        let err = LsvError::MissingRateTableForMonth("2031-02".to_string());
        assert_eq!(err.kind(), "MissingRateTableForMonth");
        assert!(!err.is_engine_error());
        assert!(err.to_string().ends_with("2031-02"));
    }
}
