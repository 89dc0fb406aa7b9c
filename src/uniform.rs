//! Uniform duration sampling.
//!
//! For a uniform distribution `mean = (min + max) / 2`, so any two of the
//! three pin down the third. Both bounds are hard: every draw lies in the
//! closed interval `[min, max]`, and the search only has to check the mean.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::request::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_TOLERANCE, DistributionFamily, GenerationRequest,
    require_finite, require_integer, require_mean_above_min, validate_common,
};
use crate::rng_util;
use crate::sequence::Sequence;

/// A fully determined uniform range.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UniformBounds {
    /// Mean of the range.
    pub mean: f64,
    /// Lower bound (inclusive).
    pub min: f64,
    /// Upper bound (inclusive).
    pub max: f64,
}

impl UniformBounds {
    /// Derive the missing one of mean, min and max.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] unless exactly two values are
    /// given, all given values are finite, and the resulting mean lies
    /// strictly above the minimum.
    ///
    /// # Examples
    ///
    /// ```
    /// use experiment_tools::UniformBounds;
    ///
    /// let b = UniformBounds::derive(None, Some(2.0), Some(10.0)).unwrap();
    /// assert_eq!(b.mean, 6.0);
    ///
    /// let b = UniformBounds::derive(Some(6.0), Some(2.0), None).unwrap();
    /// assert_eq!(b.max, 10.0);
    ///
    /// assert!(UniformBounds::derive(Some(6.0), Some(2.0), Some(10.0)).is_err());
    /// ```
    pub fn derive(mean: Option<f64>, min: Option<f64>, max: Option<f64>) -> Result<Self> {
        for (name, value) in [("desired_mean", mean), ("min_value", min), ("max_value", max)] {
            if let Some(v) = value {
                require_finite(name, v)?;
            }
        }

        let bounds = match (mean, min, max) {
            (Some(mean), Some(min), None) => Self {
                mean,
                min,
                max: 2.0 * mean - min,
            },
            (Some(mean), None, Some(max)) => Self {
                mean,
                min: 2.0 * mean - max,
                max,
            },
            (None, Some(min), Some(max)) => Self {
                mean: f64::midpoint(min, max),
                min,
                max,
            },
            (Some(_), Some(_), Some(_)) => {
                return Err(Error::invalid(
                    "constraints",
                    "over-specified: provide only 2 of desired_mean, min_value, max_value",
                ));
            }
            _ => {
                return Err(Error::invalid(
                    "constraints",
                    "under-specified: provide 2 of desired_mean, min_value, max_value",
                ));
            }
        };

        require_mean_above_min(bounds.mean, bounds.min)?;
        Ok(bounds)
    }
}

/// Builder for uniform [`GenerationRequest`]s.
///
/// Created via [`GenerationRequest::uniform`]. Set exactly two of
/// [`desired_mean`](Self::desired_mean), [`min_value`](Self::min_value) and
/// [`max_value`](Self::max_value).
///
/// # Examples
///
/// ```
/// use experiment_tools::GenerationRequest;
///
/// let request = GenerationRequest::uniform(30)
///     .desired_mean(6.0)
///     .max_value(9.0)
///     .build()
///     .unwrap();
/// assert_eq!(request.min_value(), 3.0);
/// assert_eq!(request.max_value(), Some(9.0));
/// ```
#[derive(Clone, Debug)]
pub struct UniformRequestBuilder {
    trial_count: usize,
    desired_mean: Option<f64>,
    min_value: Option<f64>,
    max_value: Option<f64>,
    discrete: bool,
    tolerance: f64,
    max_attempts: usize,
}

impl UniformRequestBuilder {
    pub(crate) fn new(trial_count: usize) -> Self {
        Self {
            trial_count,
            desired_mean: None,
            min_value: None,
            max_value: None,
            discrete: true,
            tolerance: DEFAULT_TOLERANCE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Set the desired mean.
    #[must_use]
    pub fn desired_mean(mut self, desired_mean: f64) -> Self {
        self.desired_mean = Some(desired_mean);
        self
    }

    /// Set the guaranteed minimum duration.
    #[must_use]
    pub fn min_value(mut self, min_value: f64) -> Self {
        self.min_value = Some(min_value);
        self
    }

    /// Set the guaranteed maximum duration.
    #[must_use]
    pub fn max_value(mut self, max_value: f64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    /// Set all three constraints at once, any of which may be absent.
    #[must_use]
    pub fn constraints(
        mut self,
        desired_mean: Option<f64>,
        min_value: Option<f64>,
        max_value: Option<f64>,
    ) -> Self {
        self.desired_mean = desired_mean;
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }

    /// Integer durations (`true`, the default) or real durations (`false`).
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

    /// Derive the missing constraint, validate, and build the request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the trial count, tolerance or
    /// attempt budget is out of range, if other than two constraints are
    /// set, if the mean does not exceed the minimum, or if a discrete
    /// request would need a fractional bound.
    pub fn build(self) -> Result<GenerationRequest> {
        validate_common(self.trial_count, self.tolerance, self.max_attempts)?;
        let bounds = UniformBounds::derive(self.desired_mean, self.min_value, self.max_value)?;
        if self.discrete {
            // Integer sampling needs integer endpoints, whether given or derived.
            require_integer("min_value", bounds.min)?;
            require_integer("max_value", bounds.max)?;
        }

        Ok(GenerationRequest {
            trial_count: self.trial_count,
            family: DistributionFamily::uniform(self.discrete),
            desired_mean: bounds.mean,
            min_value: bounds.min,
            max_value: Some(bounds.max),
            tolerance: self.tolerance,
            max_attempts: self.max_attempts,
        })
    }
}

/// Draw one uniform candidate for a validated request.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn draw(request: &GenerationRequest, rng: &mut fastrand::Rng) -> Sequence {
    let min = request.min_value;
    let max = request.max_value.unwrap_or(min);
    let n = request.trial_count;

    if request.is_discrete() {
        let (low, high) = (min as i64, max as i64);
        Sequence::Discrete((0..n).map(|_| rng.i64(low..=high)).collect())
    } else {
        Sequence::Continuous(
            (0..n)
                .map(|_| rng_util::f64_range_inclusive(rng, min, max))
                .collect(),
        )
    }
}
