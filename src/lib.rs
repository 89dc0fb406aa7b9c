#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Helpers for building and running psychology experiments, centred on
//! inter-trial-interval (ITI) generation: produce a sequence of durations
//! whose sample mean hits a target within a tolerance while respecting hard
//! floors and ceilings.
//!
//! # Getting Started
//!
//! ```
//! use experiment_tools::prelude::*;
//!
//! // 100 integer ITIs, mean 6 s, never shorter than 1 s.
//! let request = GenerationRequest::skewed(100, 6.0).min_value(1.0).build().unwrap();
//! let outcome = search(&request, &mut fastrand::Rng::with_seed(42));
//!
//! println!("{outcome}");
//! assert!(outcome.converged);
//! assert_eq!(outcome.sequence.len(), 100);
//! ```
//!
//! # Distribution families
//!
//! | Family | Values | Floor | Ceiling | Use for |
//! |--------|--------|-------|---------|---------|
//! | [`Geometric`](DistributionFamily::Geometric) | integers | by construction | rejection | fast event-related designs on a timing grid |
//! | [`Exponential`](DistributionFamily::Exponential) | reals | by construction | rejection | fast event-related designs, continuous timing |
//! | [`UniformDiscrete`](DistributionFamily::UniformDiscrete) | integers | by construction | by construction | slow designs with some variability |
//! | [`UniformContinuous`](DistributionFamily::UniformContinuous) | reals | by construction | by construction | slow designs, continuous timing |
//!
//! Uniform requests take any two of mean, min and max and derive the third.
//!
//! # Convergence
//!
//! The search draws fresh candidates until one is accepted or `max_attempts`
//! is exhausted. Running out of attempts is not an error:
//! [`SearchOutcome::converged`] is `false` and the last candidate is
//! returned so the caller can decide whether to widen the tolerance.
//!
//! # Randomness
//!
//! [`search`] takes a caller-owned `fastrand::Rng`. [`JitterGenerator`] owns
//! one behind a mutex and is safe to share between threads.
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on public types, JSON config loading, [`SearchOutcome::save`]/[`SearchOutcome::load`] | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) during searches and shutdown | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::warn!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_warn {
    ($($arg:tt)*) => {};
}

mod config;
mod error;
mod export;
mod generator;
pub mod presentation;
mod request;
mod rng_util;
mod search;
mod sequence;
mod skewed;
mod uniform;
mod visualization;

pub use config::{DEFAULT_PLOT_PATH, JitterConfig};
pub use error::{CleanupFailure, Error, Result};
pub use generator::JitterGenerator;
pub use request::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_SKEWED_MIN, DEFAULT_TOLERANCE, DistributionFamily,
    GenerationRequest,
};
pub use search::{SearchOutcome, search};
pub use sequence::Sequence;
pub use skewed::SkewedRequestBuilder;
pub use uniform::{UniformBounds, UniformRequestBuilder};
pub use visualization::{build_histogram_html, generate_histogram_html};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use experiment_tools::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::JitterConfig;
    pub use crate::error::{Error, Result};
    pub use crate::generator::JitterGenerator;
    pub use crate::presentation::{
        ClickWaiter, Clock, Closable, CountdownTimer, MonotonicClock, Mouse, Shutdown,
    };
    pub use crate::request::{DistributionFamily, GenerationRequest};
    pub use crate::search::{SearchOutcome, search};
    pub use crate::sequence::Sequence;
    pub use crate::uniform::UniformBounds;
    pub use crate::visualization::generate_histogram_html;
}
