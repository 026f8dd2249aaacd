//! Numerical utilities shared by the model-fitting kernels.
//!
//! Log-sum-exp reductions, floating-point constants, and the parallel-map
//! helpers that fan independent per-state work out to a rayon pool when the
//! `parallel` feature is enabled.

/// ln(2π), the normalizing constant of the Gaussian log-density.
pub const LN_2PI: f64 = 1.8378770664093453;

/// Numerically stable computation of `log(exp(a) + exp(b))`.
///
/// Negative infinity is the additive identity: combining with `-inf` returns
/// the other argument unchanged, so zero-probability transitions drop out of
/// the sum instead of producing NaN.
pub fn log_sum_exp(a: f64, b: f64) -> f64 {
    if a == f64::NEG_INFINITY {
        return b;
    }
    if b == f64::NEG_INFINITY {
        return a;
    }
    let max = a.max(b);
    max + ((a - max).exp() + (b - max).exp()).ln()
}

/// Log-sum-exp over a slice.
///
/// Returns `-inf` for an empty slice or a slice of all `-inf`.
pub fn log_sum_exp_slice(xs: &[f64]) -> f64 {
    let max = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    let sum: f64 = xs.iter().map(|&x| (x - max).exp()).sum();
    max + sum.ln()
}

/// Map `f` over `0..n`, in parallel when the `parallel` feature is enabled.
///
/// Used for work that is independent per index: the K rows of the emission
/// log-likelihood matrix, the per-state inner loop of a forward or backward
/// step, per-row transition updates. Callers guarantee `f` is pure with
/// respect to shared state; each output cell is written by exactly one task.
#[cfg(feature = "parallel")]
pub fn maybe_par_map<R, F>(n: usize, f: F) -> Vec<R>
where
    R: Send,
    F: Fn(usize) -> R + Sync + Send,
{
    use rayon::prelude::*;
    (0..n).into_par_iter().map(f).collect()
}

/// Sequential fallback when rayon is not available.
#[cfg(not(feature = "parallel"))]
pub fn maybe_par_map<R, F>(n: usize, f: F) -> Vec<R>
where
    R: Send,
    F: Fn(usize) -> R + Sync + Send,
{
    (0..n).map(f).collect()
}

/// Apply `f` to every element of `items` with its index, in parallel when the
/// `parallel` feature is enabled.
///
/// Each task holds an exclusive mutable borrow of its element, so per-state
/// emission refits run without locking.
#[cfg(feature = "parallel")]
pub fn maybe_par_for_each_mut<T, E, F>(items: &mut [T], f: F) -> Result<(), E>
where
    T: Send,
    E: Send,
    F: Fn(usize, &mut T) -> Result<(), E> + Sync + Send,
{
    use rayon::prelude::*;
    items
        .par_iter_mut()
        .enumerate()
        .map(|(i, item)| f(i, item))
        .collect()
}

/// Sequential fallback when rayon is not available.
#[cfg(not(feature = "parallel"))]
pub fn maybe_par_for_each_mut<T, E, F>(items: &mut [T], f: F) -> Result<(), E>
where
    T: Send,
    E: Send,
    F: Fn(usize, &mut T) -> Result<(), E> + Sync + Send,
{
    for (i, item) in items.iter_mut().enumerate() {
        f(i, item)?;
    }
    Ok(())
}
