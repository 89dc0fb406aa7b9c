//! A reusable, shareable sequence generator.

use parking_lot::Mutex;

use crate::error::Result;
use crate::request::GenerationRequest;
use crate::search::{SearchOutcome, search};
use crate::skewed::SkewedRequestBuilder;
use crate::uniform::UniformRequestBuilder;

/// Runs searches against an owned random source.
///
/// The generator keeps its RNG behind a mutex, so it is `Send + Sync` and can
/// be shared between threads. Each search holds the lock for its whole
/// duration: concurrent searches run one after another and never interleave
/// draws. For lock-free use, give every thread its own generator or call
/// [`search`](crate::search()) with a thread-local `fastrand::Rng`.
///
/// # Examples
///
/// ```
/// use experiment_tools::JitterGenerator;
///
/// // Same seed, same sequences.
/// let a = JitterGenerator::with_seed(7);
/// let b = JitterGenerator::with_seed(7);
///
/// let first = a.generate_skewed(50, 4.0, |r| r.min_value(2.0)).unwrap();
/// let second = b.generate_skewed(50, 4.0, |r| r.min_value(2.0)).unwrap();
/// assert_eq!(first, second);
/// ```
pub struct JitterGenerator {
    rng: Mutex<fastrand::Rng>,
}

impl JitterGenerator {
    /// Creates a generator seeded from system entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::new()),
        }
    }

    /// Creates a generator with a fixed seed for reproducibility.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }

    /// Search for a sequence satisfying an already-built request.
    #[must_use]
    pub fn generate(&self, request: &GenerationRequest) -> SearchOutcome {
        let mut rng = self.rng.lock();
        search(request, &mut rng)
    }

    /// Build a geometric/exponential request and search for it.
    ///
    /// `configure` adjusts the builder's defaults (min 1, unbounded,
    /// discrete, tolerance 0.05, 20000 attempts).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`](crate::Error::InvalidParameter)
    /// if the configured request is invalid.
    pub fn generate_skewed(
        &self,
        trial_count: usize,
        desired_mean: f64,
        configure: impl FnOnce(SkewedRequestBuilder) -> SkewedRequestBuilder,
    ) -> Result<SearchOutcome> {
        let request = configure(GenerationRequest::skewed(trial_count, desired_mean)).build()?;
        Ok(self.generate(&request))
    }

    /// Build a uniform request and search for it.
    ///
    /// `configure` must set exactly two of mean, min and max.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`](crate::Error::InvalidParameter)
    /// if the configured request is invalid.
    pub fn generate_uniform(
        &self,
        trial_count: usize,
        configure: impl FnOnce(UniformRequestBuilder) -> UniformRequestBuilder,
    ) -> Result<SearchOutcome> {
        let request = configure(GenerationRequest::uniform(trial_count)).build()?;
        Ok(self.generate(&request))
    }
}

impl Default for JitterGenerator {
    fn default() -> Self {
        Self::new()
    }
}
