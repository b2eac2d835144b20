//! Error types for hydraulic calculations.

use pf_core::CoreError;
use thiserror::Error;

/// Errors that can occur during pipe calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HydraulicsError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Convergence failed: {what} after {iterations} iterations")]
    ConvergenceFailed {
        what: &'static str,
        iterations: usize,
    },
}

pub type HydraulicsResult<T> = Result<T, HydraulicsError>;

impl From<CoreError> for HydraulicsError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NonFinite { what, .. } => HydraulicsError::NonPhysical { what },
            CoreError::InvalidArg { what } => HydraulicsError::InvalidArg { what },
        }
    }
}
