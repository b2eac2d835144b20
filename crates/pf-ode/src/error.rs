//! Error types for integration.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OdeError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    Dimension { expected: usize, actual: usize },

    #[error("Non-finite {what} at t = {t}")]
    NonFinite { what: &'static str, t: f64 },

    #[error("Step size underflow at t = {t} (h = {h:e})")]
    StepUnderflow { t: f64, h: f64 },

    #[error("Maximum number of steps ({max_steps}) reached at t = {t}")]
    MaxSteps { max_steps: usize, t: f64 },
}

pub type OdeResult<T> = Result<T, OdeError>;
