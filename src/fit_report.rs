//! Fit outcome reporting for the Baum-Welch driver.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a Baum-Welch run terminated.
///
/// Hitting the iteration cap is a normal outcome, not an error; callers
/// distinguish it from convergence here or by inspecting the log-likelihood
/// history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FitStatus {
    /// Successive log-likelihoods came within tolerance of each other.
    Converged,
    /// The iteration cap was reached before convergence.
    MaxIterationsReached,
}

/// Summary of one Baum-Welch run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FitReport {
    /// Termination state of the run.
    pub status: FitStatus,
    /// Number of EM iterations performed.
    pub iterations: usize,
    /// Final total sequence log-likelihood.
    pub log_likelihood: f64,
    /// Log-likelihood after each iteration, in order.
    pub history: Vec<f64>,
}

impl FitReport {
    /// Whether the run converged within tolerance.
    pub fn converged(&self) -> bool {
        self.status == FitStatus::Converged
    }
}
