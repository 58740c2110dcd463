use thiserror::Error;

/// Error types for the EWI economic model.
///
/// Computations on validated inputs never fail; these errors are raised only
/// where raw numbers enter the model.
#[derive(Debug, Error, PartialEq)]
pub enum EwiError {
    /// A raw input value (height, supply, reserve, peg rate) is out of range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A protocol parameter set is internally inconsistent.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EwiError {
    fn from(e: serde_json::Error) -> Self {
        EwiError::Serialization(e.to_string())
    }
}
