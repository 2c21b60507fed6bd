//! Error taxonomy for the TaxGlide core

/// Errors returned by core operations.
///
/// The kernel never recovers locally from any of these; it returns the
/// first one it encounters. "No beneficial deduction found" is deliberately
/// *not* a variant here: `optimise` reports that as a successful result
/// with `sweet_spot.deduction == 0` (see `optimise::Optimiser`).
#[derive(Debug, Clone, thiserror::Error)]
pub enum TaxGlideError {
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("no configuration for year {year}")]
    ConfigurationMissing { year: u32 },

    #[error("configuration invalid: {}", .issues.join("; "))]
    ConfigurationInvalid { issues: Vec<String> },

    #[error("calculation error: {message}")]
    CalculationError { message: String },

    #[error("schema mismatch: expected {expected}, found {found}")]
    SchemaMismatch { expected: String, found: String },
}

impl TaxGlideError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn calculation(message: impl Into<String>) -> Self {
        Self::CalculationError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TaxGlideError>;
