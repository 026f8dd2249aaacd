//! Hidden Markov Model engine: construction, Baum-Welch fitting, Viterbi
//! decoding, and ancestral sampling.
//!
//! The model holds K emission-model instances behind the [`EmissionModel`]
//! contract and never looks inside them: fitting precomputes a K×T
//! log-likelihood matrix (states in parallel), runs the forward-backward
//! engine, closes the transition and initial-state updates in log space, and
//! delegates per-state refits to `weighted_fit`.

use crate::emission_models::EmissionModel;
use crate::errors::{
    validate_data_length, validate_probability_vector, ModelError, ModelResult,
};
use crate::fit_report::{FitReport, FitStatus};
use crate::forward_backward::{forward, forward_backward, ForwardBackward};
use crate::math_utils::{log_sum_exp_slice, maybe_par_for_each_mut, maybe_par_map};
use crate::secure_rng::with_thread_local_rng;
use rand_distr::Dirichlet;

/// Draw a length-`num_states` vector uniformly from the probability simplex
/// (a Dirichlet(1, …, 1) draw).
pub fn initialize_state_distribution(num_states: usize) -> ModelResult<Vec<f64>> {
    if num_states == 0 {
        return Err(ModelError::InvalidConfiguration {
            reason: "number of states must be at least 1".to_string(),
        });
    }
    if num_states == 1 {
        return Ok(vec![1.0]);
    }
    let dirichlet =
        Dirichlet::new_with_size(1.0, num_states).map_err(|e| ModelError::NumericalError {
            reason: format!("Dirichlet initialization failed: {}", e),
        })?;
    Ok(with_thread_local_rng(|rng| rng.sample(&dirichlet)))
}

/// Draw a K×K row-stochastic matrix with independent Dirichlet(1, …, 1) rows.
pub fn initialize_transition_matrix(num_states: usize) -> ModelResult<Vec<Vec<f64>>> {
    (0..num_states)
        .map(|_| initialize_state_distribution(num_states))
        .collect()
}

/// Draw a categorical index from `probs` given a uniform variate `u`.
fn sample_categorical(probs: &[f64], u: f64) -> usize {
    let mut cumulative = 0.0;
    for (i, &p) in probs.iter().enumerate() {
        cumulative += p;
        // Strict comparison so u = 0 can never land on a zero-probability
        // leading entry.
        if u < cumulative {
            return i;
        }
    }
    // Cumulative sums can fall short of 1 by floating error.
    probs.len() - 1
}

/// Hidden Markov Model with pluggable per-state emission distributions.
///
/// Invariants maintained across construction and every fit: the transition
/// matrix is K×K row-stochastic, the initial distribution sums to 1, and
/// exactly K emission instances are held, each individually valid. The model
/// is validated after construction and re-validated after fitting; a failed
/// re-check indicates parameter corruption during the M-step and is fatal.
#[derive(Debug, Clone)]
pub struct HiddenMarkovModel {
    num_states: usize,
    initial_probs: Vec<f64>,
    transition_matrix: Vec<Vec<f64>>,
    emissions: Vec<Box<dyn EmissionModel>>,
    /// Convergence tolerance on the absolute change in log-likelihood
    /// between successive EM iterations.
    pub convergence_tolerance: f64,
    /// Maximum number of EM iterations before giving up (not an error).
    pub max_iterations: usize,
}

impl HiddenMarkovModel {
    /// Default convergence tolerance for [`fit`](Self::fit).
    pub const DEFAULT_TOLERANCE: f64 = 1e-6;
    /// Default iteration cap for [`fit`](Self::fit).
    pub const DEFAULT_MAX_ITERATIONS: usize = 100;

    /// Create a model from one emission instance per state.
    ///
    /// The transition matrix and initial distribution are drawn from
    /// Dirichlet(1, …, 1), so the model is valid without seeing any data.
    pub fn new(emissions: Vec<Box<dyn EmissionModel>>) -> ModelResult<Self> {
        let num_states = emissions.len();
        let initial_probs = initialize_state_distribution(num_states)?;
        let transition_matrix = initialize_transition_matrix(num_states)?;
        Self::with_parameters(initial_probs, transition_matrix, emissions)
    }

    /// Create a model by deep-copying one template emission K times.
    ///
    /// Each state receives an independent clone; no parameter storage is
    /// shared between states.
    pub fn from_template(num_states: usize, template: &dyn EmissionModel) -> ModelResult<Self> {
        if num_states == 0 {
            return Err(ModelError::InvalidConfiguration {
                reason: "number of states must be at least 1".to_string(),
            });
        }
        let emissions = (0..num_states).map(|_| template.clone_model()).collect();
        Self::new(emissions)
    }

    /// Create a model with explicit parameters.
    pub fn with_parameters(
        initial_probs: Vec<f64>,
        transition_matrix: Vec<Vec<f64>>,
        emissions: Vec<Box<dyn EmissionModel>>,
    ) -> ModelResult<Self> {
        let model = Self {
            num_states: emissions.len(),
            initial_probs,
            transition_matrix,
            emissions,
            convergence_tolerance: Self::DEFAULT_TOLERANCE,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        };
        model.validate()?;
        Ok(model)
    }

    /// Number of hidden states.
    pub fn num_states(&self) -> usize {
        self.num_states
    }

    /// Initial state distribution π.
    pub fn initial_probs(&self) -> &[f64] {
        &self.initial_probs
    }

    /// Row-stochastic transition matrix A.
    pub fn transition_matrix(&self) -> &[Vec<f64>] {
        &self.transition_matrix
    }

    /// The emission model for state `k`.
    pub fn emission(&self, k: usize) -> &dyn EmissionModel {
        self.emissions[k].as_ref()
    }

    /// Validate shapes, stochasticity, and every emission instance.
    ///
    /// Side-effect free and idempotent: repeated calls on an unmodified
    /// model return the same result.
    pub fn validate(&self) -> ModelResult<()> {
        if self.num_states == 0 {
            return Err(ModelError::InvalidConfiguration {
                reason: "number of states must be at least 1".to_string(),
            });
        }
        if self.emissions.len() != self.num_states {
            return Err(ModelError::InvalidConfiguration {
                reason: format!(
                    "expected {} emission models, got {}",
                    self.num_states,
                    self.emissions.len()
                ),
            });
        }
        if self.initial_probs.len() != self.num_states {
            return Err(ModelError::DimensionMismatch {
                parameter: "initial distribution".to_string(),
                expected: self.num_states,
                actual: self.initial_probs.len(),
            });
        }
        validate_probability_vector(&self.initial_probs, "initial distribution")?;

        if self.transition_matrix.len() != self.num_states {
            return Err(ModelError::DimensionMismatch {
                parameter: "transition matrix rows".to_string(),
                expected: self.num_states,
                actual: self.transition_matrix.len(),
            });
        }
        for (i, row) in self.transition_matrix.iter().enumerate() {
            if row.len() != self.num_states {
                return Err(ModelError::DimensionMismatch {
                    parameter: format!("transition matrix row {}", i),
                    expected: self.num_states,
                    actual: row.len(),
                });
            }
            validate_probability_vector(row, &format!("transition matrix row {}", i))?;
        }

        let dimension = self.emissions[0].dimension();
        for (k, emission) in self.emissions.iter().enumerate() {
            if emission.dimension() != dimension {
                return Err(ModelError::InvalidConfiguration {
                    reason: format!(
                        "emission {} has dimension {}, state 0 has {}",
                        k,
                        emission.dimension(),
                        dimension
                    ),
                });
            }
            emission.validate()?;
        }

        if !(self.convergence_tolerance > 0.0) || !self.convergence_tolerance.is_finite() {
            return Err(ModelError::InvalidParameter {
                parameter: "convergence_tolerance".to_string(),
                value: self.convergence_tolerance,
                constraint: "> 0 and finite".to_string(),
            });
        }
        if self.max_iterations == 0 {
            return Err(ModelError::InvalidParameter {
                parameter: "max_iterations".to_string(),
                value: 0.0,
                constraint: ">= 1".to_string(),
            });
        }
        Ok(())
    }

    /// Check observation data against every state's emission model.
    pub fn validate_data(&self, observations: &[Vec<f64>]) -> ModelResult<()> {
        validate_data_length(observations.len(), 1, "observations")?;
        for emission in &self.emissions {
            emission.validate_data(observations)?;
        }
        Ok(())
    }

    /// Randomized warm start that avoids degenerate all-mass-on-one-state
    /// initializations.
    ///
    /// Assigns each observation a random responsibility vector (one Dirichlet
    /// row per time step), fits every emission model to its responsibility
    /// column, and resets the transition matrix and initial distribution to
    /// uniform.
    pub fn weighted_initialization(&mut self, observations: &[Vec<f64>]) -> ModelResult<()> {
        self.validate()?;
        self.validate_data(observations)?;

        let t_len = observations.len();
        let responsibilities: ModelResult<Vec<Vec<f64>>> = (0..t_len)
            .map(|_| initialize_state_distribution(self.num_states))
            .collect();
        let responsibilities = responsibilities?;

        let columns: Vec<Vec<f64>> = (0..self.num_states)
            .map(|k| responsibilities.iter().map(|row| row[k]).collect())
            .collect();
        maybe_par_for_each_mut(&mut self.emissions, |k, emission| {
            emission.weighted_fit(observations, &columns[k])
        })?;

        let uniform = 1.0 / self.num_states as f64;
        self.initial_probs = vec![uniform; self.num_states];
        self.transition_matrix = vec![vec![uniform; self.num_states]; self.num_states];
        Ok(())
    }

    /// Initial distribution in log space. Exact zeros map to -inf and flow
    /// through log-sum-exp as zero posterior mass.
    fn log_initial(&self) -> Vec<f64> {
        self.initial_probs.iter().map(|&p| p.ln()).collect()
    }

    /// Transition matrix in log space.
    fn log_transition(&self) -> Vec<Vec<f64>> {
        self.transition_matrix
            .iter()
            .map(|row| row.iter().map(|&p| p.ln()).collect())
            .collect()
    }

    /// The K×T per-state observation log-likelihood matrix, computed in
    /// parallel over states.
    fn log_likelihood_matrix(&self, observations: &[Vec<f64>]) -> ModelResult<Vec<Vec<f64>>> {
        maybe_par_map(self.num_states, |k| {
            self.emissions[k].log_likelihood(observations)
        })
        .into_iter()
        .collect()
    }

    /// Total sequence log-likelihood under the current parameters.
    pub fn log_likelihood(&self, observations: &[Vec<f64>]) -> ModelResult<f64> {
        self.validate()?;
        self.validate_data(observations)?;
        let log_lik = self.log_likelihood_matrix(observations)?;
        let (_, ll) = forward(&log_lik, &self.log_initial(), &self.log_transition())?;
        Ok(ll)
    }

    /// Smoothed state posteriors in probability space, T×K.
    ///
    /// Row `t` gives P(state k at t | entire sequence) and sums to 1.
    pub fn state_posteriors(&self, observations: &[Vec<f64>]) -> ModelResult<Vec<Vec<f64>>> {
        self.validate()?;
        self.validate_data(observations)?;
        let log_lik = self.log_likelihood_matrix(observations)?;
        let fb = forward_backward(&log_lik, &self.log_initial(), &self.log_transition())?;
        Ok(fb
            .log_gamma
            .iter()
            .map(|row| row.iter().map(|&lg| lg.exp()).collect())
            .collect())
    }

    /// Fit the model to an observation sequence with Baum-Welch EM.
    ///
    /// Each iteration recomputes the emission log-likelihood matrix, runs
    /// the forward-backward E-step, and applies the closed-form M-step plus
    /// per-state weighted emission refits. Convergence is declared when the
    /// absolute change in log-likelihood falls below
    /// `convergence_tolerance`; a transient numerical decrease therefore
    /// also terminates the loop. Reaching `max_iterations` is reported as
    /// [`FitStatus::MaxIterationsReached`], not an error.
    pub fn fit(&mut self, observations: &[Vec<f64>]) -> ModelResult<FitReport> {
        self.validate()?;
        self.validate_data(observations)?;

        let mut history = Vec::with_capacity(self.max_iterations.min(64));
        let mut prev_log_likelihood = f64::NEG_INFINITY;
        let mut status = FitStatus::MaxIterationsReached;
        let mut iterations = 0;

        for iteration in 0..self.max_iterations {
            let log_lik = self.log_likelihood_matrix(observations)?;
            let fb = forward_backward(&log_lik, &self.log_initial(), &self.log_transition())?;

            iterations = iteration + 1;
            history.push(fb.log_likelihood);
            log::debug!(
                "Baum-Welch iteration {}: log-likelihood = {:.6}",
                iteration,
                fb.log_likelihood
            );

            if iteration > 0
                && (fb.log_likelihood - prev_log_likelihood).abs() < self.convergence_tolerance
            {
                status = FitStatus::Converged;
                prev_log_likelihood = fb.log_likelihood;
                break;
            }
            prev_log_likelihood = fb.log_likelihood;

            self.update_parameters(observations, &fb)?;
        }

        // A failed re-check here means the M-step corrupted a parameter.
        self.validate().map_err(|e| {
            log::warn!("model failed validation after fitting: {}", e);
            ModelError::InvalidConfiguration {
                reason: format!("model invalid after M-step: {}", e),
            }
        })?;

        Ok(FitReport {
            status,
            iterations,
            log_likelihood: prev_log_likelihood,
            history,
        })
    }

    /// Closed-form M-step: π from γ[0], A from ξ/γ ratios in log space,
    /// then per-state weighted emission refits in parallel.
    fn update_parameters(
        &mut self,
        observations: &[Vec<f64>],
        fb: &ForwardBackward,
    ) -> ModelResult<()> {
        let num_states = self.num_states;
        let t_len = fb.log_gamma.len();

        for k in 0..num_states {
            self.initial_probs[k] = fb.log_gamma[0][k].exp();
        }

        if t_len > 1 {
            let new_rows = maybe_par_map(num_states, |i| {
                let denom_terms: Vec<f64> =
                    (0..t_len - 1).map(|t| fb.log_gamma[t][i]).collect();
                let denom = log_sum_exp_slice(&denom_terms);
                if denom == f64::NEG_INFINITY {
                    // State never visited in posterior: no evidence to
                    // update its outgoing row.
                    return self.transition_matrix[i].clone();
                }
                (0..num_states)
                    .map(|j| {
                        let numer_terms: Vec<f64> = (0..t_len - 1)
                            .map(|t| fb.log_xi[t][i * num_states + j])
                            .collect();
                        (log_sum_exp_slice(&numer_terms) - denom).exp()
                    })
                    .collect()
            });
            self.transition_matrix = new_rows;
        }

        let gamma_columns: Vec<Vec<f64>> = (0..num_states)
            .map(|k| fb.log_gamma.iter().map(|row| row[k].exp()).collect())
            .collect();
        maybe_par_for_each_mut(&mut self.emissions, |k, emission| {
            emission.weighted_fit(observations, &gamma_columns[k])
        })
    }

    /// Viterbi decoding: the single most probable state path.
    ///
    /// Returns 0-based state indices, one per observation. Argmax ties
    /// resolve to the first-encountered state index.
    pub fn decode(&self, observations: &[Vec<f64>]) -> ModelResult<Vec<usize>> {
        self.validate()?;
        self.validate_data(observations)?;

        let log_lik = self.log_likelihood_matrix(observations)?;
        let log_initial = self.log_initial();
        let log_transition = self.log_transition();

        let num_states = self.num_states;
        let t_len = observations.len();
        let mut delta = vec![vec![f64::NEG_INFINITY; num_states]; t_len];
        let mut psi = vec![vec![0usize; num_states]; t_len];

        for j in 0..num_states {
            delta[0][j] = log_initial[j] + log_lik[j][0];
        }

        for t in 1..t_len {
            for j in 0..num_states {
                let mut best_val = f64::NEG_INFINITY;
                let mut best_state = 0;
                for i in 0..num_states {
                    let v = delta[t - 1][i] + log_transition[i][j];
                    if v > best_val {
                        best_val = v;
                        best_state = i;
                    }
                }
                delta[t][j] = best_val + log_lik[j][t];
                psi[t][j] = best_state;
            }
        }

        let mut best_final = 0;
        let mut best_score = f64::NEG_INFINITY;
        for j in 0..num_states {
            if delta[t_len - 1][j] > best_score {
                best_score = delta[t_len - 1][j];
                best_final = j;
            }
        }

        let mut path = vec![0usize; t_len];
        path[t_len - 1] = best_final;
        for t in (0..t_len - 1).rev() {
            path[t] = psi[t + 1][path[t + 1]];
        }
        Ok(path)
    }

    /// Ancestral sampling of `n` time steps.
    ///
    /// Draws the initial state from Categorical(π), each following state
    /// from the previous state's transition row, and one observation per
    /// sampled state through the emission contract. Returns the paired
    /// (state sequence, observation sequence).
    pub fn sample(&self, n: usize) -> ModelResult<(Vec<usize>, Vec<Vec<f64>>)> {
        self.validate()?;
        if n == 0 {
            return Err(ModelError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }

        let mut states = Vec::with_capacity(n);
        let mut observations = Vec::with_capacity(n);

        let mut state = with_thread_local_rng(|rng| sample_categorical(&self.initial_probs, rng.f64()));
        for _ in 0..n {
            states.push(state);
            let mut draw = self.emissions[state].sample(&observations, 1)?;
            observations.push(draw.pop().ok_or_else(|| ModelError::NumericalError {
                reason: "emission model returned no sample".to_string(),
            })?);
            state = with_thread_local_rng(|rng| {
                sample_categorical(&self.transition_matrix[state], rng.f64())
            });
        }
        Ok((states, observations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emission_models::GaussianEmission;
    use crate::secure_rng::{clear_global_seed, global_seed};
    use assert_approx_eq::assert_approx_eq;

    fn gaussian_template() -> GaussianEmission {
        GaussianEmission::isotropic(vec![0.0], 1.0).unwrap()
    }

    fn two_state_model() -> HiddenMarkovModel {
        let low = GaussianEmission::isotropic(vec![-5.0], 1.0).unwrap();
        let high = GaussianEmission::isotropic(vec![5.0], 1.0).unwrap();
        HiddenMarkovModel::with_parameters(
            vec![0.5, 0.5],
            vec![vec![0.9, 0.1], vec![0.2, 0.8]],
            vec![Box::new(low), Box::new(high)],
        )
        .unwrap()
    }

    #[test]
    fn test_random_initialization_is_stochastic() {
        global_seed(42);
        let model = HiddenMarkovModel::from_template(3, &gaussian_template()).unwrap();
        assert_eq!(model.num_states(), 3);

        let pi_sum: f64 = model.initial_probs().iter().sum();
        assert_approx_eq!(pi_sum, 1.0, 1e-10);
        for row in model.transition_matrix() {
            let row_sum: f64 = row.iter().sum();
            assert_approx_eq!(row_sum, 1.0, 1e-10);
            for &p in row {
                assert!((0.0..=1.0).contains(&p));
            }
        }
        clear_global_seed();
    }

    #[test]
    fn test_single_state_model() {
        let model = HiddenMarkovModel::from_template(1, &gaussian_template()).unwrap();
        assert_eq!(model.initial_probs(), &[1.0]);
        assert_eq!(model.transition_matrix(), &[vec![1.0]]);

        let path = model.decode(&[vec![0.3], vec![-0.1]]).unwrap();
        assert_eq!(path, vec![0, 0]);
    }

    #[test]
    fn test_with_parameters_rejects_bad_shapes() {
        let e = || Box::new(gaussian_template()) as Box<dyn EmissionModel>;

        // Non-stochastic transition row
        assert!(HiddenMarkovModel::with_parameters(
            vec![0.5, 0.5],
            vec![vec![0.9, 0.2], vec![0.2, 0.8]],
            vec![e(), e()],
        )
        .is_err());

        // Initial distribution length mismatch
        assert!(HiddenMarkovModel::with_parameters(
            vec![1.0],
            vec![vec![0.5, 0.5], vec![0.5, 0.5]],
            vec![e(), e()],
        )
        .is_err());

        // Zero states
        assert!(HiddenMarkovModel::with_parameters(vec![], vec![], vec![]).is_err());
    }

    #[test]
    fn test_mismatched_emission_dimensions_rejected() {
        let one_d = Box::new(gaussian_template()) as Box<dyn EmissionModel>;
        let two_d =
            Box::new(GaussianEmission::isotropic(vec![0.0, 0.0], 1.0).unwrap()) as Box<dyn EmissionModel>;
        let result = HiddenMarkovModel::with_parameters(
            vec![0.5, 0.5],
            vec![vec![0.5, 0.5], vec![0.5, 0.5]],
            vec![one_d, two_d],
        );
        assert!(matches!(result, Err(ModelError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_from_template_clones_are_independent() {
        global_seed(7);
        let mut model = HiddenMarkovModel::from_template(2, &gaussian_template()).unwrap();
        // Fitting state 0 hard toward 10 must not move state 1.
        let observations = vec![vec![10.0], vec![10.0], vec![10.0]];
        model.emissions[0]
            .weighted_fit(&observations, &[1.0, 1.0, 1.0])
            .unwrap();
        let ll0 = model.emissions[0].log_likelihood(&observations).unwrap()[0];
        let ll1 = model.emissions[1].log_likelihood(&observations).unwrap()[0];
        assert!(ll0 > ll1);
        clear_global_seed();
    }

    #[test]
    fn test_sample_shapes_and_state_range() {
        global_seed(11);
        let model = two_state_model();
        let (states, observations) = model.sample(50).unwrap();
        assert_eq!(states.len(), 50);
        assert_eq!(observations.len(), 50);
        for (&s, obs) in states.iter().zip(&observations) {
            assert!(s < 2);
            assert_eq!(obs.len(), 1);
        }
        assert!(model.sample(0).is_err());
        clear_global_seed();
    }

    #[test]
    fn test_weighted_initialization_resets_to_uniform() {
        global_seed(13);
        let mut model = two_state_model();
        let observations: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64 * 0.1]).collect();
        model.weighted_initialization(&observations).unwrap();

        assert_eq!(model.initial_probs(), &[0.5, 0.5]);
        for row in model.transition_matrix() {
            assert_eq!(row, &vec![0.5, 0.5]);
        }
        model.validate().unwrap();
        clear_global_seed();
    }

    #[test]
    fn test_fit_on_single_observation_keeps_transitions() {
        global_seed(17);
        let mut model = two_state_model();
        let before = model.transition_matrix().to_vec();
        let report = model.fit(&[vec![4.8]]).unwrap();
        assert!(report.iterations >= 1);
        // With T = 1 there are no transitions to learn.
        assert_eq!(model.transition_matrix(), &before[..]);
        clear_global_seed();
    }

    #[test]
    fn test_decode_follows_separated_emissions() {
        let model = two_state_model();
        let observations = vec![vec![-5.1], vec![-4.9], vec![5.2], vec![4.7]];
        let path = model.decode(&observations).unwrap();
        assert_eq!(path, vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_log_likelihood_is_finite_and_negative() {
        let model = two_state_model();
        let ll = model.log_likelihood(&[vec![-5.0], vec![5.0]]).unwrap();
        assert!(ll.is_finite());
        assert!(ll < 0.0);
    }

    #[test]
    fn test_state_posteriors_rows_sum_to_one() {
        let model = two_state_model();
        let gamma = model
            .state_posteriors(&[vec![-5.0], vec![0.4], vec![5.0]])
            .unwrap();
        for row in &gamma {
            let total: f64 = row.iter().sum();
            assert_approx_eq!(total, 1.0, 1e-9);
        }
        // First observation sits on state 0's mean.
        assert!(gamma[0][0] > 0.99);
    }

    #[test]
    fn test_empty_observations_rejected() {
        let model = two_state_model();
        assert!(model.decode(&[]).is_err());
        assert!(model.log_likelihood(&[]).is_err());
        let mut model = model;
        assert!(model.fit(&[]).is_err());
    }

    #[test]
    fn test_sample_categorical_boundaries() {
        let probs = [0.2, 0.3, 0.5];
        assert_eq!(sample_categorical(&probs, 0.0), 0);
        assert_eq!(sample_categorical(&probs, 0.25), 1);
        assert_eq!(sample_categorical(&probs, 0.99), 2);
        // Degenerate distribution always picks its atom.
        assert_eq!(sample_categorical(&[0.0, 1.0], 0.7), 1);
        // u = 0 must skip zero-probability leading entries.
        assert_eq!(sample_categorical(&[0.0, 1.0], 0.0), 1);
        assert_eq!(sample_categorical(&[0.0, 0.0, 0.4, 0.6], 0.0), 2);
    }
}
