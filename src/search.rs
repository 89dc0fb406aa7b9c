//! Bounded rejection search for a sequence meeting a request.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::request::GenerationRequest;
use crate::sequence::Sequence;
use crate::{skewed, uniform};

type DrawFn = fn(&GenerationRequest, &mut fastrand::Rng) -> Sequence;

/// The result of a search: the sequence plus how it was found.
///
/// A non-converged outcome is a normal result, not an error. Its sequence is
/// the last candidate drawn, which still honours every bound enforced by
/// construction but misses the mean tolerance or the skewed ceiling.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchOutcome {
    /// The accepted candidate, or the last one drawn.
    pub sequence: Sequence,
    /// Whether the sequence met the mean tolerance and ceiling.
    pub converged: bool,
    /// Number of candidates drawn, between 1 and `max_attempts`.
    pub attempts: usize,
}

impl SearchOutcome {
    /// Sample mean of the sequence.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.sequence.mean()
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.converged {
            write!(f, "solution found in {} attempts", self.attempts)
        } else {
            write!(
                f,
                "no solution found after {} attempts; try increasing tolerance",
                self.attempts
            )
        }
    }
}

/// Search for a sequence satisfying `request`, drawing from `rng`.
///
/// Each attempt draws a brand-new independent candidate and accepts it when
/// `|mean - desired_mean| <= tolerance` and, if a ceiling is set, its
/// largest value does not exceed the ceiling. After `max_attempts` rejected
/// candidates the last one is returned with `converged == false`.
///
/// The function is pure apart from `rng`: seeding the generator makes the
/// outcome reproducible.
///
/// # Examples
///
/// ```
/// use experiment_tools::{GenerationRequest, search};
///
/// let request = GenerationRequest::skewed(100, 6.0).build().unwrap();
/// let mut rng = fastrand::Rng::with_seed(42);
/// let outcome = search(&request, &mut rng);
///
/// assert!(outcome.converged);
/// assert!((outcome.mean() - 6.0).abs() <= 0.05);
/// assert!(outcome.sequence.as_discrete().unwrap().iter().all(|&v| v >= 1));
/// ```
pub fn search(request: &GenerationRequest, rng: &mut fastrand::Rng) -> SearchOutcome {
    let draw: DrawFn = if request.family.is_skewed() {
        skewed::draw
    } else {
        uniform::draw
    };

    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!(
        "search",
        trial_count = request.trial_count,
        family = %request.family,
        max_attempts = request.max_attempts
    )
    .entered();

    let mut attempts = 0;
    loop {
        attempts += 1;
        let sequence = draw(request, rng);
        let mean = sequence.mean();
        let max = sequence.max().unwrap_or(f64::NEG_INFINITY);

        if request.accepts(mean, max) {
            trace_info!(attempts, mean, "solution found");
            return SearchOutcome {
                sequence,
                converged: true,
                attempts,
            };
        }
        if attempts >= request.max_attempts {
            trace_warn!(attempts, mean, "no solution found; try increasing tolerance");
            return SearchOutcome {
                sequence,
                converged: false,
                attempts,
            };
        }
        trace_debug!(attempts, mean, max, "candidate rejected");
    }
}
