//! Generated duration sequences.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered list of generated durations.
///
/// Discrete families produce integer durations, continuous families produce
/// real ones. The variant is fixed by the request's
/// [`DistributionFamily`](crate::DistributionFamily).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "values", rename_all = "snake_case"))]
pub enum Sequence {
    /// Integer durations from a geometric or discrete uniform family.
    Discrete(Vec<i64>),
    /// Real durations from an exponential or continuous uniform family.
    Continuous(Vec<f64>),
}

impl Sequence {
    /// Number of durations in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Sequence::Discrete(v) => v.len(),
            Sequence::Continuous(v) => v.len(),
        }
    }

    /// Returns `true` if the sequence holds no durations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` for integer-valued sequences.
    #[must_use]
    pub fn is_discrete(&self) -> bool {
        matches!(self, Sequence::Discrete(_))
    }

    /// The integer durations, if this is a discrete sequence.
    #[must_use]
    pub fn as_discrete(&self) -> Option<&[i64]> {
        match self {
            Sequence::Discrete(v) => Some(v.as_slice()),
            Sequence::Continuous(_) => None,
        }
    }

    /// The real durations, if this is a continuous sequence.
    #[must_use]
    pub fn as_continuous(&self) -> Option<&[f64]> {
        match self {
            Sequence::Discrete(_) => None,
            Sequence::Continuous(v) => Some(v.as_slice()),
        }
    }

    /// All durations widened to `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            Sequence::Discrete(v) => v.iter().map(|&x| x as f64).collect(),
            Sequence::Continuous(v) => v.clone(),
        }
    }

    /// Sample mean, or `NaN` for an empty sequence.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        let sum: f64 = match self {
            // Summed in i128: exact, and large draws cannot overflow.
            Sequence::Discrete(v) => v.iter().map(|&x| i128::from(x)).sum::<i128>() as f64,
            Sequence::Continuous(v) => v.iter().sum(),
        };
        sum / self.len() as f64
    }

    /// Smallest duration, or `None` for an empty sequence.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn min(&self) -> Option<f64> {
        match self {
            Sequence::Discrete(v) => v.iter().min().map(|&x| x as f64),
            Sequence::Continuous(v) => v.iter().copied().reduce(f64::min),
        }
    }

    /// Largest duration, or `None` for an empty sequence.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn max(&self) -> Option<f64> {
        match self {
            Sequence::Discrete(v) => v.iter().max().map(|&x| x as f64),
            Sequence::Continuous(v) => v.iter().copied().reduce(f64::max),
        }
    }

    /// Number of distinct values, used to size histogram bins.
    #[must_use]
    pub fn distinct_count(&self) -> usize {
        match self {
            Sequence::Discrete(v) => {
                let mut sorted = v.clone();
                sorted.sort_unstable();
                sorted.dedup();
                sorted.len()
            }
            Sequence::Continuous(v) => {
                let mut sorted = v.clone();
                sorted.sort_by(f64::total_cmp);
                sorted.dedup();
                sorted.len()
            }
        }
    }
}
