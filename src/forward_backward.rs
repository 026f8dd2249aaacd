//! Log-space forward-backward engine.
//!
//! Computes forward (α) and backward (β) variables, state posteriors (γ),
//! and pairwise transition posteriors (ξ) from a precomputed K×T matrix of
//! per-state, per-time observation log-likelihoods. Every reduction goes
//! through log-sum-exp; raw log-likelihoods are never exponentiated, so long
//! sequences cannot underflow.
//!
//! Time steps are strictly sequential (α[t] depends on α[t-1]); the
//! per-state work inside one step is independent and fans out through
//! [`maybe_par_map`].

use crate::errors::{ModelError, ModelResult};
use crate::math_utils::{log_sum_exp, log_sum_exp_slice, maybe_par_map};

/// Posteriors and likelihood produced by one E-step.
///
/// All quantities are in log space. Rows of `log_gamma` log-sum to 0; each
/// (T-1) block of `log_xi` is a row-major K×K slice normalized over all
/// (i, j) pairs at that time step.
#[derive(Debug, Clone)]
pub struct ForwardBackward {
    /// Forward variables, T×K: log P(o_0..o_t, state k at t).
    pub log_alpha: Vec<Vec<f64>>,
    /// Backward variables, T×K: log P(o_{t+1}..o_{T-1} | state k at t).
    pub log_beta: Vec<Vec<f64>>,
    /// State posteriors, T×K: log P(state k at t | o_0..o_{T-1}).
    pub log_gamma: Vec<Vec<f64>>,
    /// Pairwise posteriors, (T-1)×(K·K) row-major:
    /// log P(state i at t, state j at t+1 | o_0..o_{T-1}).
    pub log_xi: Vec<Vec<f64>>,
    /// Total sequence log-likelihood, logsumexp over α[T-1, ·].
    pub log_likelihood: f64,
}

/// Check the K×T log-likelihood matrix and parameter shapes.
fn validate_inputs(
    log_likelihoods: &[Vec<f64>],
    log_initial: &[f64],
    log_transition: &[Vec<f64>],
) -> ModelResult<usize> {
    let num_states = log_initial.len();
    if log_likelihoods.len() != num_states {
        return Err(ModelError::DimensionMismatch {
            parameter: "log-likelihood matrix rows".to_string(),
            expected: num_states,
            actual: log_likelihoods.len(),
        });
    }
    if log_transition.len() != num_states {
        return Err(ModelError::DimensionMismatch {
            parameter: "transition matrix rows".to_string(),
            expected: num_states,
            actual: log_transition.len(),
        });
    }
    for (i, row) in log_transition.iter().enumerate() {
        if row.len() != num_states {
            return Err(ModelError::DimensionMismatch {
                parameter: format!("transition matrix row {}", i),
                expected: num_states,
                actual: row.len(),
            });
        }
    }
    let t_len = log_likelihoods.first().map_or(0, |row| row.len());
    if t_len == 0 {
        return Err(ModelError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    for (k, row) in log_likelihoods.iter().enumerate() {
        if row.len() != t_len {
            return Err(ModelError::DimensionMismatch {
                parameter: format!("log-likelihood row {}", k),
                expected: t_len,
                actual: row.len(),
            });
        }
    }
    Ok(t_len)
}

/// Forward pass: returns the T×K α matrix and the sequence log-likelihood.
pub fn forward(
    log_likelihoods: &[Vec<f64>],
    log_initial: &[f64],
    log_transition: &[Vec<f64>],
) -> ModelResult<(Vec<Vec<f64>>, f64)> {
    let t_len = validate_inputs(log_likelihoods, log_initial, log_transition)?;
    let num_states = log_initial.len();

    let mut log_alpha: Vec<Vec<f64>> = Vec::with_capacity(t_len);
    log_alpha.push(maybe_par_map(num_states, |k| {
        log_initial[k] + log_likelihoods[k][0]
    }));

    for t in 1..t_len {
        let prev = &log_alpha[t - 1];
        let row = maybe_par_map(num_states, |j| {
            let mut acc = f64::NEG_INFINITY;
            for i in 0..num_states {
                acc = log_sum_exp(acc, prev[i] + log_transition[i][j]);
            }
            acc + log_likelihoods[j][t]
        });
        log_alpha.push(row);
    }

    let log_likelihood = log_sum_exp_slice(&log_alpha[t_len - 1]);
    Ok((log_alpha, log_likelihood))
}

/// Backward pass: returns the T×K β matrix.
pub fn backward(
    log_likelihoods: &[Vec<f64>],
    log_initial: &[f64],
    log_transition: &[Vec<f64>],
) -> ModelResult<Vec<Vec<f64>>> {
    let t_len = validate_inputs(log_likelihoods, log_initial, log_transition)?;
    let num_states = log_initial.len();

    let mut log_beta = vec![vec![0.0; num_states]; t_len];
    for t in (0..t_len - 1).rev() {
        let next = log_beta[t + 1].clone();
        log_beta[t] = maybe_par_map(num_states, |i| {
            let mut acc = f64::NEG_INFINITY;
            for j in 0..num_states {
                acc = log_sum_exp(
                    acc,
                    log_transition[i][j] + log_likelihoods[j][t + 1] + next[j],
                );
            }
            acc
        });
    }
    Ok(log_beta)
}

/// Full E-step: forward, backward, γ, and ξ in one call.
pub fn forward_backward(
    log_likelihoods: &[Vec<f64>],
    log_initial: &[f64],
    log_transition: &[Vec<f64>],
) -> ModelResult<ForwardBackward> {
    let (log_alpha, log_likelihood) = forward(log_likelihoods, log_initial, log_transition)?;
    let log_beta = backward(log_likelihoods, log_initial, log_transition)?;

    let t_len = log_alpha.len();
    let num_states = log_initial.len();

    // State posteriors: row-normalized in log space, independent per t.
    let log_gamma = maybe_par_map(t_len, |t| {
        let joint: Vec<f64> = (0..num_states)
            .map(|k| log_alpha[t][k] + log_beta[t][k])
            .collect();
        let norm = log_sum_exp_slice(&joint);
        joint.into_iter().map(|v| v - norm).collect::<Vec<f64>>()
    });

    // Pairwise posteriors: normalized over all (i, j) per t, independent per t.
    let log_xi = maybe_par_map(t_len.saturating_sub(1), |t| {
        let mut block = vec![f64::NEG_INFINITY; num_states * num_states];
        for i in 0..num_states {
            for j in 0..num_states {
                block[i * num_states + j] = log_alpha[t][i]
                    + log_transition[i][j]
                    + log_likelihoods[j][t + 1]
                    + log_beta[t + 1][j];
            }
        }
        let norm = log_sum_exp_slice(&block);
        for v in block.iter_mut() {
            *v -= norm;
        }
        block
    });

    Ok(ForwardBackward {
        log_alpha,
        log_beta,
        log_gamma,
        log_xi,
        log_likelihood,
    })
}
