//! Seedable random number generation with global deterministic mode.
//!
//! All stochastic operations in this crate (Dirichlet parameter
//! initialization, ancestral sampling, randomized responsibilities) draw from
//! thread-local ChaCha20 generators. In production each thread seeds from OS
//! entropy; for reproducible runs [`global_seed`] switches every thread-local
//! generator into deterministic mode.

use once_cell::sync::Lazy;
use rand::distributions::Distribution;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::StandardNormal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Global seed for deterministic mode (None means use OS entropy).
static GLOBAL_SEED: Lazy<RwLock<Option<u64>>> = Lazy::new(|| RwLock::new(None));

/// Incremented whenever the global seed changes, forcing thread-local
/// generators to reinitialize.
static SEED_GENERATION: AtomicU64 = AtomicU64::new(0);

/// Counter handing out deterministic per-thread identifiers.
static THREAD_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// ChaCha20-backed random number generator.
///
/// ChaCha20 gives high-quality, portable, seedable randomness; the same seed
/// reproduces the same stream on every platform, which the test suite relies
/// on.
#[derive(Clone, Debug)]
pub struct SecureRng {
    rng: ChaCha20Rng,
}

impl SecureRng {
    /// Create a new RNG seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    /// Create a new RNG with a specific seed for reproducibility.
    ///
    /// `seed_from_u64` cryptographically expands the u64 into a full
    /// 256-bit ChaCha seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Generate a random f64 in [0, 1).
    pub fn f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Draw from the standard normal distribution.
    pub fn normal(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }

    /// Draw from an arbitrary `rand_distr` distribution.
    pub fn sample<T, D: Distribution<T>>(&mut self, dist: D) -> T {
        dist.sample(&mut self.rng)
    }
}

impl Default for SecureRng {
    fn default() -> Self {
        Self::new()
    }
}

/// Set a global seed for deterministic behavior.
///
/// Intended for tests and reproducible experiments. Every thread-local RNG
/// reinitializes from `seed + thread_id` the next time it is used, so
/// parallel runs stay reproducible per-thread. Calling with the same seed
/// twice resets the streams.
pub fn global_seed(seed: u64) {
    if let Ok(mut global) = GLOBAL_SEED.write() {
        *global = Some(seed);
        // Always bump the generation so repeated calls with an identical
        // seed still reset thread-local state.
        SEED_GENERATION.fetch_add(1, Ordering::SeqCst);
    }
    THREAD_ID_COUNTER.store(0, Ordering::SeqCst);
}

/// Clear the global seed, returning to OS entropy mode.
pub fn clear_global_seed() {
    if let Ok(mut global) = GLOBAL_SEED.write() {
        *global = None;
        SEED_GENERATION.fetch_add(1, Ordering::SeqCst);
    }
}

/// Execute a function with the thread-local RNG.
///
/// The generator lives in thread-local storage and is reused across calls,
/// so sequential draws on one thread form a single stream. A change of the
/// global seed generation reinitializes the generator on next use.
pub fn with_thread_local_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SecureRng) -> R,
{
    thread_local! {
        static RNG: std::cell::RefCell<Option<SecureRng>> = std::cell::RefCell::new(None);
        static THREAD_ID: std::cell::Cell<u64> = std::cell::Cell::new(0);
        static LAST_GENERATION: std::cell::Cell<u64> = std::cell::Cell::new(0);
    }

    RNG.with(|rng_cell| {
        let mut rng_opt = rng_cell.borrow_mut();

        let current_generation = SEED_GENERATION.load(Ordering::SeqCst);
        let needs_reinit = LAST_GENERATION.with(|gen| {
            if gen.get() != current_generation {
                gen.set(current_generation);
                // Reset the thread id so seed changes reproduce identically.
                THREAD_ID.with(|id| id.set(0));
                true
            } else {
                false
            }
        });

        if rng_opt.is_none() || needs_reinit {
            let rng = match GLOBAL_SEED.read().ok().and_then(|g| *g) {
                Some(seed) => THREAD_ID.with(|id| {
                    let tid = if id.get() == 0 {
                        let new_id = THREAD_ID_COUNTER.fetch_add(1, Ordering::SeqCst);
                        id.set(new_id);
                        new_id
                    } else {
                        id.get()
                    };
                    SecureRng::with_seed(seed.wrapping_add(tid))
                }),
                None => SecureRng::new(),
            };
            *rng_opt = Some(rng);
        }

        f(rng_opt.as_mut().expect("thread-local RNG initialized above"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = SecureRng::with_seed(42);
        let mut b = SecureRng::with_seed(42);
        for _ in 0..100 {
            assert_eq!(a.f64(), b.f64());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = SecureRng::with_seed(1);
        let mut b = SecureRng::with_seed(2);
        let xs: Vec<f64> = (0..10).map(|_| a.f64()).collect();
        let ys: Vec<f64> = (0..10).map(|_| b.f64()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn test_f64_in_unit_interval() {
        let mut rng = SecureRng::with_seed(7);
        for _ in 0..1000 {
            let x = rng.f64();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_normal_draws_are_finite() {
        let mut rng = SecureRng::with_seed(11);
        let mut sum = 0.0;
        for _ in 0..1000 {
            let z = rng.normal();
            assert!(z.is_finite());
            sum += z;
        }
        // Sample mean of 1000 standard normals should be near zero.
        assert!((sum / 1000.0).abs() < 0.2);
    }

    #[test]
    fn test_global_seed_resets_thread_local_stream() {
        global_seed(1234);
        let first: Vec<f64> = (0..5).map(|_| with_thread_local_rng(|r| r.f64())).collect();
        global_seed(1234);
        let second: Vec<f64> = (0..5).map(|_| with_thread_local_rng(|r| r.f64())).collect();
        assert_eq!(first, second);
        clear_global_seed();
    }
}
