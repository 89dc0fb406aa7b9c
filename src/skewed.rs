//! Geometric and exponential duration sampling.
//!
//! Skewed families favour many short durations and a few long ones. The floor
//! is enforced by construction: every draw is shifted so its support starts
//! at `min_value`, and the shift is taken off the distribution's own mean so
//! the expected sample mean is still `desired_mean`. The ceiling is only a
//! rejection criterion, checked on the whole candidate by the search loop.
//!
//! A tight `max_value` cuts the acceptance rate sharply because of the long
//! tail; expect more attempts, or no convergence at all.

use crate::error::{Error, Result};
use crate::request::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_SKEWED_MIN, DEFAULT_TOLERANCE, DistributionFamily,
    GenerationRequest, require_finite, require_integer, require_mean_above_min, validate_common,
};
use crate::rng_util;
use crate::sequence::Sequence;

/// Builder for geometric / exponential [`GenerationRequest`]s.
///
/// Created via [`GenerationRequest::skewed`].
///
/// # Examples
///
/// ```
/// use experiment_tools::GenerationRequest;
///
/// let request = GenerationRequest::skewed(60, 4.5)
///     .min_value(2.0)
///     .max_value(12.0)
///     .discrete(false)
///     .tolerance(0.1)
///     .build()
///     .unwrap();
/// assert_eq!(request.max_value(), Some(12.0));
///
/// // The mean has to sit above the floor.
/// assert!(GenerationRequest::skewed(60, 2.0).min_value(2.0).build().is_err());
/// ```
#[derive(Clone, Debug)]
pub struct SkewedRequestBuilder {
    trial_count: usize,
    desired_mean: f64,
    min_value: f64,
    max_value: Option<f64>,
    discrete: bool,
    tolerance: f64,
    max_attempts: usize,
}

impl SkewedRequestBuilder {
    pub(crate) fn new(trial_count: usize, desired_mean: f64) -> Self {
        Self {
            trial_count,
            desired_mean,
            min_value: DEFAULT_SKEWED_MIN,
            max_value: None,
            discrete: true,
            tolerance: DEFAULT_TOLERANCE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Set the guaranteed minimum duration (default 1).
    #[must_use]
    pub fn min_value(mut self, min_value: f64) -> Self {
        self.min_value = min_value;
        self
    }

    /// Set the maximum duration a sequence may contain. Sequences whose
    /// largest value exceeds it are rejected.
    #[must_use]
    pub fn max_value(mut self, max_value: f64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    /// Set or clear the ceiling.
    #[must_use]
    pub fn max_value_opt(mut self, max_value: Option<f64>) -> Self {
        self.max_value = max_value;
        self
    }

    /// Integer durations from a geometric distribution (`true`, the default)
    /// or real durations from an exponential one (`false`).
    #[must_use]
    pub fn discrete(mut self, discrete: bool) -> Self {
        self.discrete = discrete;
        self
    }

    /// Set the acceptable absolute distance from the desired mean.
    #[must_use]
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the number of candidates drawn before giving up.
    #[must_use]
    pub fn max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Validate the settings and build the request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`](crate::Error::InvalidParameter) if
    /// the trial count, tolerance or attempt budget is out of range, if any
    /// value is not finite, if `desired_mean <= min_value`, or if a discrete
    /// request has a fractional `min_value` or `max_value`.
    pub fn build(self) -> Result<GenerationRequest> {
        validate_common(self.trial_count, self.tolerance, self.max_attempts)?;
        require_finite("desired_mean", self.desired_mean)?;
        require_finite("min_value", self.min_value)?;
        if self.discrete {
            require_integer("min_value", self.min_value)?;
        }
        if let Some(max) = self.max_value {
            if max.is_nan() {
                return Err(Error::invalid("max_value", "must be a number, got NaN"));
            }
            // An infinite ceiling is the same as none.
            if self.discrete && max.is_finite() {
                require_integer("max_value", max)?;
            }
        }
        require_mean_above_min(self.desired_mean, self.min_value)?;

        Ok(GenerationRequest {
            trial_count: self.trial_count,
            family: DistributionFamily::skewed(self.discrete),
            desired_mean: self.desired_mean,
            min_value: self.min_value,
            max_value: self.max_value.filter(|m| m.is_finite()),
            tolerance: self.tolerance,
            max_attempts: self.max_attempts,
        })
    }
}

/// Draw one skewed candidate for a validated request.
///
/// Every value is at least `min_value`; the ceiling is left to the caller.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn draw(request: &GenerationRequest, rng: &mut fastrand::Rng) -> Sequence {
    let n = request.trial_count;

    if request.is_discrete() {
        // Geometric support starts at 1, so shifting by `min - 1` lands on `min`.
        let shift = request.min_value - 1.0;
        let p = 1.0 / (request.desired_mean - shift);
        // `min_value` is validated to be integral.
        let offset = shift as i64;
        Sequence::Discrete(
            (0..n)
                .map(|_| rng_util::geometric(rng, p).saturating_add(offset))
                .collect(),
        )
    } else {
        // Exponential support starts at 0, so the shift is the floor itself.
        let shift = request.min_value;
        let adjusted_mean = request.desired_mean - shift;
        Sequence::Continuous(
            (0..n)
                .map(|_| rng_util::exponential(rng, adjusted_mean) + shift)
                .collect(),
        )
    }
}
