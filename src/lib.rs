//! # Sequence Models
//!
//! EM-fitted probabilistic sequence models built around a Hidden Markov Model
//! engine with pluggable emission distributions.
//!
//! The engine treats per-state observation distributions as opaque
//! implementations of the [`EmissionModel`] contract: anything that can
//! validate itself, score observations in log space, sample, and refit from
//! weighted data plugs into construction, Baum-Welch fitting, Viterbi
//! decoding, and ancestral sampling without the engine knowing its parametric
//! form. Multivariate Gaussian and independent Poisson emissions ship with
//! the crate.
//!
//! ## Key Features
//!
//! - **Log-space inference**: forward-backward recursions, posteriors, and
//!   the M-step all run in log space; exact zeros propagate as `-inf`
//!   instead of being clamped
//! - **Pluggable emissions**: one trait boundary between the chain and the
//!   observation model, with deep-cloning template construction
//! - **Baum-Welch EM**: closed-form transition and initial-state updates
//!   plus weighted per-state emission refits, with a convergence report
//! - **Viterbi decoding** and **ancestral sampling** against the same
//!   emission contract
//! - **Reproducibility**: an optional global seed drives per-thread ChaCha20
//!   generators for deterministic runs
//!
//! ## Quick Start
//!
//! ```rust
//! use sequence_models::{GaussianEmission, HiddenMarkovModel};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     sequence_models::global_seed(42);
//!
//!     // Two well-separated univariate states.
//!     let calm = GaussianEmission::isotropic(vec![-3.0], 1.0)?;
//!     let volatile = GaussianEmission::isotropic(vec![3.0], 1.0)?;
//!     let generator = HiddenMarkovModel::with_parameters(
//!         vec![0.5, 0.5],
//!         vec![vec![0.9, 0.1], vec![0.2, 0.8]],
//!         vec![Box::new(calm), Box::new(volatile)],
//!     )?;
//!     let (_states, observations) = generator.sample(200)?;
//!
//!     // Recover the structure from the observations alone.
//!     let template = GaussianEmission::isotropic(vec![0.0], 1.0)?;
//!     let mut model = HiddenMarkovModel::from_template(2, &template)?;
//!     model.weighted_initialization(&observations)?;
//!     let report = model.fit(&observations)?;
//!     println!(
//!         "{:?} after {} iterations, log-likelihood {:.3}",
//!         report.status, report.iterations, report.log_likelihood
//!     );
//!
//!     let path = model.decode(&observations)?;
//!     assert_eq!(path.len(), observations.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! [`HiddenMarkovModel`] orchestrates everything: it owns the initial
//! distribution, the transition matrix, and one boxed [`EmissionModel`] per
//! state. The forward-backward machinery lives in
//! [`forward_backward`](mod@forward_backward) and is usable directly with
//! precomputed log-likelihood matrices. All
//! randomness flows through [`secure_rng`], which the [`global_seed`] /
//! [`clear_global_seed`] pair makes reproducible across threads.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod emission_models;
pub mod errors;
pub mod fit_report;
pub mod forward_backward;
pub mod hmm_core;
pub mod math_utils;
pub mod secure_rng;

// Re-exports for convenience - main public API
pub use emission_models::{EmissionModel, GaussianEmission, PoissonEmission};
pub use errors::{ModelError, ModelResult};
pub use fit_report::{FitReport, FitStatus};
pub use forward_backward::{backward, forward, forward_backward, ForwardBackward};
pub use hmm_core::{
    initialize_state_distribution, initialize_transition_matrix, HiddenMarkovModel,
};
pub use secure_rng::{clear_global_seed, global_seed, SecureRng};
