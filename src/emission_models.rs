//! Emission model contract and concrete state-conditional distributions.
//!
//! The HMM engine is emission-agnostic: it only ever talks to the
//! [`EmissionModel`] trait, so Gaussian, Poisson, and covariate-conditioned
//! variants all share one Baum-Welch implementation. Observations are plain
//! `&[Vec<f64>]` rows whose interpretation belongs entirely to the emission
//! model.

use crate::errors::{
    validate_all_finite, validate_finite, ModelError, ModelResult,
};
use crate::math_utils::LN_2PI;
use crate::secure_rng::with_thread_local_rng;
use nalgebra::{Cholesky, DMatrix, DVector};
use rand_distr::Poisson;
use statrs::function::gamma::ln_gamma;

/// Diagonal regularization applied before Cholesky factorization.
const COVARIANCE_REGULARIZATION: f64 = 1e-6;

/// Lower bound for Poisson rates after a weighted refit.
const RATE_FLOOR: f64 = 1e-10;

/// State-conditional distribution usable as an HMM emission.
///
/// Implementations own their parameters exclusively; the engine deep-copies
/// them per state via [`clone_model`](EmissionModel::clone_model) so no
/// mutable state is shared between states.
pub trait EmissionModel: Send + Sync + std::fmt::Debug {
    /// Number of features per observation this model expects.
    fn dimension(&self) -> usize;

    /// Check internal parameters for well-formedness.
    ///
    /// Must be side-effect free: calling it twice on an unmodified model
    /// produces the same result.
    fn validate(&self) -> ModelResult<()>;

    /// Check that observation rows match the model's dimensionality and are
    /// numerically usable. Runs before any likelihood work.
    fn validate_data(&self, observations: &[Vec<f64>]) -> ModelResult<()>;

    /// Per-observation log-likelihoods, one value per row, not summed.
    fn log_likelihood(&self, observations: &[Vec<f64>]) -> ModelResult<Vec<f64>>;

    /// Draw `n` synthetic observations in the same layout as the data.
    ///
    /// `data` carries context rows for conditional distributions: a
    /// covariate-conditioned implementation reads its regressors from them.
    /// Unconditional distributions ignore the argument; passing an empty
    /// slice is valid for those.
    fn sample(&self, data: &[Vec<f64>], n: usize) -> ModelResult<Vec<Vec<f64>>>;

    /// Re-estimate parameters in place to maximize the weighted
    /// log-likelihood `sum_t weights[t] * log p(observations[t])`.
    ///
    /// Weights are nonnegative and need not sum to 1. A weight mass too
    /// small to support estimation leaves the parameters unchanged.
    fn weighted_fit(&mut self, observations: &[Vec<f64>], weights: &[f64]) -> ModelResult<()>;

    /// Deep copy with fully independent parameter storage.
    fn clone_model(&self) -> Box<dyn EmissionModel>;
}

impl Clone for Box<dyn EmissionModel> {
    fn clone(&self) -> Self {
        self.clone_model()
    }
}

/// Shared pre-fit checks for `weighted_fit` implementations.
fn validate_weights(observations: &[Vec<f64>], weights: &[f64]) -> ModelResult<()> {
    if observations.len() != weights.len() {
        return Err(ModelError::DimensionMismatch {
            parameter: "weights".to_string(),
            expected: observations.len(),
            actual: weights.len(),
        });
    }
    validate_all_finite(weights, "weights")?;
    if let Some((i, &w)) = weights.iter().enumerate().find(|(_, &w)| w < 0.0) {
        return Err(ModelError::InvalidParameter {
            parameter: format!("weights[{}]", i),
            value: w,
            constraint: ">= 0".to_string(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Gaussian emission
// ---------------------------------------------------------------------------

/// Multivariate Gaussian emission with full covariance.
///
/// The precision matrix, Cholesky factor, and log-determinant are cached and
/// refreshed whenever the covariance changes, so per-observation likelihood
/// evaluation is a Mahalanobis form without any factorization.
#[derive(Debug, Clone)]
pub struct GaussianEmission {
    mean: DVector<f64>,
    covariance: DMatrix<f64>,
    precision: DMatrix<f64>,
    cholesky_l: DMatrix<f64>,
    log_det_cov: f64,
}

impl GaussianEmission {
    /// Create a Gaussian emission from a mean vector and covariance matrix.
    ///
    /// The covariance must be square with the mean's dimension and positive
    /// definite after diagonal regularization.
    pub fn new(mean: Vec<f64>, covariance: Vec<Vec<f64>>) -> ModelResult<Self> {
        let dim = mean.len();
        if dim == 0 {
            return Err(ModelError::InvalidConfiguration {
                reason: "Gaussian emission requires at least one dimension".to_string(),
            });
        }
        validate_all_finite(&mean, "mean")?;
        if covariance.len() != dim {
            return Err(ModelError::DimensionMismatch {
                parameter: "covariance rows".to_string(),
                expected: dim,
                actual: covariance.len(),
            });
        }
        for (i, row) in covariance.iter().enumerate() {
            if row.len() != dim {
                return Err(ModelError::DimensionMismatch {
                    parameter: format!("covariance row {}", i),
                    expected: dim,
                    actual: row.len(),
                });
            }
            validate_all_finite(row, "covariance")?;
        }

        let mut model = Self {
            mean: DVector::from_vec(mean),
            covariance: DMatrix::from_fn(dim, dim, |i, j| covariance[i][j]),
            precision: DMatrix::zeros(dim, dim),
            cholesky_l: DMatrix::zeros(dim, dim),
            log_det_cov: 0.0,
        };
        model.update_cached_values()?;
        Ok(model)
    }

    /// Isotropic Gaussian: shared variance on every dimension.
    pub fn isotropic(mean: Vec<f64>, variance: f64) -> ModelResult<Self> {
        if variance <= 0.0 || !variance.is_finite() {
            return Err(ModelError::InvalidParameter {
                parameter: "variance".to_string(),
                value: variance,
                constraint: "> 0".to_string(),
            });
        }
        let dim = mean.len();
        let covariance = (0..dim)
            .map(|i| (0..dim).map(|j| if i == j { variance } else { 0.0 }).collect())
            .collect();
        Self::new(mean, covariance)
    }

    /// The mean vector.
    pub fn mean(&self) -> &[f64] {
        self.mean.as_slice()
    }

    /// The covariance matrix entry (i, j).
    pub fn covariance(&self, i: usize, j: usize) -> f64 {
        self.covariance[(i, j)]
    }

    /// Refresh the precision matrix, Cholesky factor, and log-determinant
    /// from the covariance.
    ///
    /// A small diagonal regularization is applied first; if factorization
    /// still fails, progressively stronger regularization is tried before
    /// giving up.
    fn update_cached_values(&mut self) -> ModelResult<()> {
        let dim = self.covariance.nrows();
        for i in 0..dim {
            self.covariance[(i, i)] += COVARIANCE_REGULARIZATION;
        }

        let cholesky = match Cholesky::new(self.covariance.clone()) {
            Some(chol) => chol,
            None => {
                let regularization_levels = [1e-5, 1e-4, 1e-3];
                let mut recovered = None;
                for &level in &regularization_levels {
                    let regularized =
                        &self.covariance + DMatrix::identity(dim, dim) * level;
                    if let Some(chol) = Cholesky::new(regularized.clone()) {
                        self.covariance = regularized;
                        recovered = Some(chol);
                        break;
                    }
                }
                recovered.ok_or_else(|| ModelError::NumericalError {
                    reason: "covariance matrix is not positive definite even after regularization"
                        .to_string(),
                })?
            }
        };

        self.precision = cholesky.inverse();
        self.cholesky_l = cholesky.l();
        self.log_det_cov = 2.0
            * self
                .cholesky_l
                .diagonal()
                .iter()
                .map(|x| x.ln())
                .sum::<f64>();
        validate_finite(self.log_det_cov, "log determinant of covariance")
    }

    /// Log-density of a single observation.
    fn log_density(&self, x: &[f64]) -> f64 {
        let dim = self.mean.len();
        let diff = DVector::from_fn(dim, |i, _| x[i] - self.mean[i]);
        let mahalanobis = (&diff.transpose() * &self.precision * &diff)[(0, 0)];
        -0.5 * (dim as f64 * LN_2PI + self.log_det_cov + mahalanobis)
    }
}

impl EmissionModel for GaussianEmission {
    fn dimension(&self) -> usize {
        self.mean.len()
    }

    fn validate(&self) -> ModelResult<()> {
        let dim = self.mean.len();
        validate_all_finite(self.mean.as_slice(), "mean")?;
        if self.covariance.nrows() != dim || self.covariance.ncols() != dim {
            return Err(ModelError::InvalidConfiguration {
                reason: format!(
                    "covariance is {}x{}, expected {}x{}",
                    self.covariance.nrows(),
                    self.covariance.ncols(),
                    dim,
                    dim
                ),
            });
        }
        for i in 0..dim {
            if self.covariance[(i, i)] <= 0.0 {
                return Err(ModelError::InvalidConfiguration {
                    reason: format!(
                        "covariance[{}][{}] = {} is not positive",
                        i,
                        i,
                        self.covariance[(i, i)]
                    ),
                });
            }
        }
        // Positive definiteness, checked on a copy so validation stays
        // side-effect free.
        if Cholesky::new(self.covariance.clone()).is_none() {
            return Err(ModelError::InvalidConfiguration {
                reason: "covariance matrix is not positive definite".to_string(),
            });
        }
        validate_finite(self.log_det_cov, "log determinant of covariance")
    }

    fn validate_data(&self, observations: &[Vec<f64>]) -> ModelResult<()> {
        let dim = self.mean.len();
        for (t, row) in observations.iter().enumerate() {
            if row.len() != dim {
                return Err(ModelError::DimensionMismatch {
                    parameter: format!("observation {}", t),
                    expected: dim,
                    actual: row.len(),
                });
            }
            validate_all_finite(row, "observation")?;
        }
        Ok(())
    }

    fn log_likelihood(&self, observations: &[Vec<f64>]) -> ModelResult<Vec<f64>> {
        self.validate_data(observations)?;
        Ok(observations.iter().map(|x| self.log_density(x)).collect())
    }

    fn sample(&self, _data: &[Vec<f64>], n: usize) -> ModelResult<Vec<Vec<f64>>> {
        let dim = self.mean.len();
        let mut draws = Vec::with_capacity(n);
        with_thread_local_rng(|rng| {
            for _ in 0..n {
                let z = DVector::from_fn(dim, |_, _| rng.normal());
                let x = &self.mean + &self.cholesky_l * z;
                draws.push(x.as_slice().to_vec());
            }
        });
        Ok(draws)
    }

    fn weighted_fit(&mut self, observations: &[Vec<f64>], weights: &[f64]) -> ModelResult<()> {
        self.validate_data(observations)?;
        validate_weights(observations, weights)?;

        let dim = self.mean.len();
        let weight_sum: f64 = weights.iter().sum();
        if weight_sum < 1e-10 {
            // No effective mass assigned to this state; keep parameters.
            return Ok(());
        }
        let inv_weight_sum = 1.0 / weight_sum;

        let mut new_mean = DVector::zeros(dim);
        for (x, &w) in observations.iter().zip(weights) {
            for d in 0..dim {
                new_mean[d] += w * x[d];
            }
        }
        new_mean *= inv_weight_sum;

        let mut new_cov = DMatrix::zeros(dim, dim);
        for (x, &w) in observations.iter().zip(weights) {
            for p in 0..dim {
                let dp = x[p] - new_mean[p];
                // Upper triangle, mirrored for symmetry.
                for q in p..dim {
                    let contribution = w * dp * (x[q] - new_mean[q]);
                    new_cov[(p, q)] += contribution;
                    if p != q {
                        new_cov[(q, p)] += contribution;
                    }
                }
            }
        }
        new_cov *= inv_weight_sum;
        for d in 0..dim {
            new_cov[(d, d)] = new_cov[(d, d)].max(COVARIANCE_REGULARIZATION);
        }

        self.mean = new_mean;
        self.covariance = new_cov;
        self.update_cached_values()
    }

    fn clone_model(&self) -> Box<dyn EmissionModel> {
        Box::new(self.clone())
    }
}

// ---------------------------------------------------------------------------
// Poisson emission
// ---------------------------------------------------------------------------

/// Independent per-dimension Poisson emission for count-valued observations.
#[derive(Debug, Clone)]
pub struct PoissonEmission {
    rates: Vec<f64>,
}

impl PoissonEmission {
    /// Create a Poisson emission from per-dimension rates.
    pub fn new(rates: Vec<f64>) -> ModelResult<Self> {
        if rates.is_empty() {
            return Err(ModelError::InvalidConfiguration {
                reason: "Poisson emission requires at least one dimension".to_string(),
            });
        }
        let model = Self { rates };
        model.validate()?;
        Ok(model)
    }

    /// The per-dimension rates.
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }
}

impl EmissionModel for PoissonEmission {
    fn dimension(&self) -> usize {
        self.rates.len()
    }

    fn validate(&self) -> ModelResult<()> {
        for (d, &rate) in self.rates.iter().enumerate() {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(ModelError::InvalidParameter {
                    parameter: format!("rates[{}]", d),
                    value: rate,
                    constraint: "> 0 and finite".to_string(),
                });
            }
        }
        Ok(())
    }

    fn validate_data(&self, observations: &[Vec<f64>]) -> ModelResult<()> {
        let dim = self.rates.len();
        for (t, row) in observations.iter().enumerate() {
            if row.len() != dim {
                return Err(ModelError::DimensionMismatch {
                    parameter: format!("observation {}", t),
                    expected: dim,
                    actual: row.len(),
                });
            }
            validate_all_finite(row, "observation")?;
            if let Some(&x) = row.iter().find(|&&x| x < 0.0) {
                return Err(ModelError::InvalidParameter {
                    parameter: format!("observation {}", t),
                    value: x,
                    constraint: ">= 0 (count data)".to_string(),
                });
            }
        }
        Ok(())
    }

    fn log_likelihood(&self, observations: &[Vec<f64>]) -> ModelResult<Vec<f64>> {
        self.validate_data(observations)?;
        Ok(observations
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&self.rates)
                    .map(|(&x, &rate)| x * rate.ln() - rate - ln_gamma(x + 1.0))
                    .sum()
            })
            .collect())
    }

    fn sample(&self, _data: &[Vec<f64>], n: usize) -> ModelResult<Vec<Vec<f64>>> {
        let mut distributions = Vec::with_capacity(self.rates.len());
        for (d, &rate) in self.rates.iter().enumerate() {
            let dist = Poisson::new(rate).map_err(|_| ModelError::InvalidParameter {
                parameter: format!("rates[{}]", d),
                value: rate,
                constraint: "> 0".to_string(),
            })?;
            distributions.push(dist);
        }
        let mut draws = Vec::with_capacity(n);
        with_thread_local_rng(|rng| {
            for _ in 0..n {
                let row: Vec<f64> = distributions.iter().map(|d| rng.sample(*d)).collect();
                draws.push(row);
            }
        });
        Ok(draws)
    }

    fn weighted_fit(&mut self, observations: &[Vec<f64>], weights: &[f64]) -> ModelResult<()> {
        self.validate_data(observations)?;
        validate_weights(observations, weights)?;

        let weight_sum: f64 = weights.iter().sum();
        if weight_sum < 1e-10 {
            return Ok(());
        }

        let dim = self.rates.len();
        let mut new_rates = vec![0.0; dim];
        for (x, &w) in observations.iter().zip(weights) {
            for d in 0..dim {
                new_rates[d] += w * x[d];
            }
        }
        for rate in new_rates.iter_mut() {
            *rate = (*rate / weight_sum).max(RATE_FLOOR);
        }
        self.rates = new_rates;
        Ok(())
    }

    fn clone_model(&self) -> Box<dyn EmissionModel> {
        Box::new(self.clone())
    }
}
