/// Errors raised by the checked report API and by state parsing.
///
/// The reporting helpers never produce these; they store whatever they are given.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProgressError {
    #[error("Progress {field} is not a finite number: {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("Progress {field} is negative: {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("Progress value {value} exceeds maximum {maximum}")]
    ValueExceedsMaximum { value: f64, maximum: f64 },

    #[error("Unknown progress state: {0}")]
    UnknownState(String),
}
