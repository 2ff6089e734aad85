//! Error types for the loader adapter.

use pricer_core::types::PricingError;
use pricer_models::analytical::AnalyticalError;
use pricer_models::lattice::LatticeError;
use thiserror::Error;

/// Loader errors.
///
/// Model-level failures are carried as the workspace-wide [`PricingError`].
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Underlying I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read or write failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// A required header row or column is absent
    #[error("Missing header: {expected}")]
    MissingHeader {
        /// Header row prefix or column name that was expected
        expected: String,
    },

    /// Configured parameters rejected by a model
    #[error("Model error: {0}")]
    Model(#[from] PricingError),
}

impl LoaderError {
    pub(crate) fn missing_header(expected: impl Into<String>) -> Self {
        Self::MissingHeader {
            expected: expected.into(),
        }
    }
}

impl From<AnalyticalError> for LoaderError {
    fn from(err: AnalyticalError) -> Self {
        LoaderError::Model(err.into())
    }
}

impl From<LatticeError> for LoaderError {
    fn from(err: LatticeError) -> Self {
        LoaderError::Model(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_errors_convert() {
        let err: LoaderError = AnalyticalError::InvalidModelParameter {
            name: "spot",
            value: -1.0,
        }
        .into();
        assert!(matches!(
            err,
            LoaderError::Model(PricingError::InvalidInput(_))
        ));

        let err: LoaderError = LatticeError::EnumerationTooLarge { steps: 30, max: 20 }.into();
        assert!(matches!(
            err,
            LoaderError::Model(PricingError::ModelFailure(_))
        ));
    }

    #[test]
    fn test_display() {
        let err = LoaderError::missing_header("Strike_Price");
        assert_eq!(err.to_string(), "Missing header: Strike_Price");
    }
}
