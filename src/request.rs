//! Generation requests and the distribution families they select.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::skewed::SkewedRequestBuilder;
use crate::uniform::UniformRequestBuilder;

/// Acceptable absolute distance between the sample mean and the desired mean.
pub const DEFAULT_TOLERANCE: f64 = 0.05;

/// Number of candidate sequences drawn before a search gives up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 20_000;

/// Floor used by the skewed families when none is given.
pub const DEFAULT_SKEWED_MIN: f64 = 1.0;

/// The shape of the distribution durations are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DistributionFamily {
    /// Discrete skewed durations: many short, few long.
    #[default]
    Geometric,
    /// Continuous skewed durations: many short, few long.
    Exponential,
    /// Integer durations spread evenly over `[min, max]`.
    UniformDiscrete,
    /// Real durations spread evenly over `[min, max]`.
    UniformContinuous,
}

impl DistributionFamily {
    /// The skewed family for the given timing grid.
    #[must_use]
    pub fn skewed(discrete: bool) -> Self {
        if discrete {
            DistributionFamily::Geometric
        } else {
            DistributionFamily::Exponential
        }
    }

    /// The uniform family for the given timing grid.
    #[must_use]
    pub fn uniform(discrete: bool) -> Self {
        if discrete {
            DistributionFamily::UniformDiscrete
        } else {
            DistributionFamily::UniformContinuous
        }
    }

    /// Returns `true` if durations are integers.
    #[must_use]
    pub fn is_discrete(self) -> bool {
        matches!(
            self,
            DistributionFamily::Geometric | DistributionFamily::UniformDiscrete
        )
    }

    /// Returns `true` for the geometric and exponential families.
    #[must_use]
    pub fn is_skewed(self) -> bool {
        matches!(
            self,
            DistributionFamily::Geometric | DistributionFamily::Exponential
        )
    }
}

impl fmt::Display for DistributionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DistributionFamily::Geometric => "geometric",
            DistributionFamily::Exponential => "exponential",
            DistributionFamily::UniformDiscrete => "uniform (discrete)",
            DistributionFamily::UniformContinuous => "uniform (continuous)",
        };
        f.write_str(name)
    }
}

/// A validated, immutable description of the sequence to generate.
///
/// Build one with [`GenerationRequest::skewed`] or
/// [`GenerationRequest::uniform`]; both validate every precondition in
/// `build()`, so a `GenerationRequest` in hand is always searchable.
///
/// # Examples
///
/// ```
/// use experiment_tools::{DistributionFamily, GenerationRequest};
///
/// let request = GenerationRequest::skewed(100, 6.0)
///     .min_value(1.0)
///     .build()
///     .unwrap();
/// assert_eq!(request.family(), DistributionFamily::Geometric);
/// assert_eq!(request.max_value(), None);
///
/// let request = GenerationRequest::uniform(40)
///     .min_value(2.0)
///     .max_value(10.0)
///     .build()
///     .unwrap();
/// assert_eq!(request.desired_mean(), 6.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GenerationRequest {
    pub(crate) trial_count: usize,
    pub(crate) family: DistributionFamily,
    pub(crate) desired_mean: f64,
    pub(crate) min_value: f64,
    pub(crate) max_value: Option<f64>,
    pub(crate) tolerance: f64,
    pub(crate) max_attempts: usize,
}

impl GenerationRequest {
    /// Start a geometric (or, with `.discrete(false)`, exponential) request.
    ///
    /// Defaults: `min_value` 1, no `max_value`, discrete,
    /// tolerance [`DEFAULT_TOLERANCE`], [`DEFAULT_MAX_ATTEMPTS`] attempts.
    #[must_use]
    pub fn skewed(trial_count: usize, desired_mean: f64) -> SkewedRequestBuilder {
        SkewedRequestBuilder::new(trial_count, desired_mean)
    }

    /// Start a uniform request. Exactly two of mean, min and max must be set
    /// before `build()`.
    #[must_use]
    pub fn uniform(trial_count: usize) -> UniformRequestBuilder {
        UniformRequestBuilder::new(trial_count)
    }

    /// Number of durations to generate.
    #[must_use]
    pub fn trial_count(&self) -> usize {
        self.trial_count
    }

    /// The distribution family durations are drawn from.
    #[must_use]
    pub fn family(&self) -> DistributionFamily {
        self.family
    }

    /// Target sample mean (derived for uniform requests given min and max).
    #[must_use]
    pub fn desired_mean(&self) -> f64 {
        self.desired_mean
    }

    /// Hard floor of every duration.
    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    /// Ceiling: a rejection criterion for skewed families, a hard bound for
    /// uniform ones. `None` means unbounded.
    #[must_use]
    pub fn max_value(&self) -> Option<f64> {
        self.max_value
    }

    /// Acceptable absolute distance from the desired mean.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Maximum number of candidate sequences to draw.
    #[must_use]
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Returns `true` if durations are integers.
    #[must_use]
    pub fn is_discrete(&self) -> bool {
        self.family.is_discrete()
    }

    /// Whether a candidate with the given sample mean and maximum is accepted.
    pub(crate) fn accepts(&self, mean: f64, max: f64) -> bool {
        let within_tolerance = (mean - self.desired_mean).abs() <= self.tolerance;
        within_tolerance && self.max_value.is_none_or(|ceiling| max <= ceiling)
    }
}

/// Checks shared by every family.
pub(crate) fn validate_common(
    trial_count: usize,
    tolerance: f64,
    max_attempts: usize,
) -> Result<()> {
    if trial_count == 0 {
        return Err(Error::invalid("trial_count", "must be at least 1"));
    }
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(Error::invalid(
            "tolerance",
            format!("must be a finite non-negative number, got {tolerance}"),
        ));
    }
    if max_attempts == 0 {
        return Err(Error::invalid("max_attempts", "must be at least 1"));
    }
    Ok(())
}

/// Reject NaN and infinite values for a named parameter.
pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid(name, format!("must be finite, got {value}")))
    }
}

/// Largest magnitude a discrete bound may have (2^53). Every integer up to
/// it is exact in `f64` and converts to `i64` unchanged.
const MAX_DISCRETE_BOUND: f64 = 9_007_199_254_740_992.0;

/// Reject fractional or out-of-range values for a named parameter of a
/// discrete family.
pub(crate) fn require_integer(name: &'static str, value: f64) -> Result<()> {
    if value.fract() != 0.0 {
        return Err(Error::invalid(
            name,
            format!("must be an integer for a discrete distribution, got {value}"),
        ));
    }
    if value.abs() > MAX_DISCRETE_BOUND {
        return Err(Error::invalid(
            name,
            format!("must lie within +/-2^53 for a discrete distribution, got {value}"),
        ));
    }
    Ok(())
}

/// The floor must sit strictly below the target mean.
pub(crate) fn require_mean_above_min(desired_mean: f64, min_value: f64) -> Result<()> {
    if desired_mean > min_value {
        Ok(())
    } else {
        Err(Error::invalid(
            "desired_mean",
            format!("must be greater than min_value ({desired_mean} <= {min_value})"),
        ))
    }
}
