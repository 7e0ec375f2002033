//! Error taxonomy shared by the whole workspace.

use crate::state::BallState;
use thiserror::Error;

/// Everything a simulation or validation run can fail with.
///
/// Metric mismatches during validation are *not* errors; they are part of
/// the `ValidationResult`. A bisection that hits its iteration cap is a
/// warning (the midpoint is accepted), also not an error.
#[derive(Debug, Error)]
pub enum FlightError {
    /// Rejected before the first integration step: non-physical or
    /// non-finite inputs.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A state component became non-finite mid-flight. Carries the last
    /// finite state so callers can inspect where it went wrong.
    #[error("integration diverged at t = {time} s")]
    IntegrationDivergence { time: f64, last: Box<BallState> },
}

impl FlightError {
    /// Shorthand used by the input validators.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput { reason: reason.into() }
    }
}
