//! Declarative generation options.
//!
//! [`JitterConfig`] collects every recognised option in one plain struct so
//! designs can be kept in files and re-run. With the `serde` feature it can
//! be loaded from JSON; every field except `trial_count` may be omitted.
//!
//! ```
//! use experiment_tools::{DistributionFamily, JitterConfig};
//!
//! let mut config = JitterConfig::new(40);
//! config.family = DistributionFamily::UniformContinuous;
//! config.min_value = Some(2.0);
//! config.max_value = Some(6.0);
//! config.seed = Some(3);
//!
//! let outcome = config.run().unwrap();
//! assert_eq!(outcome.sequence.len(), 40);
//! ```

use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::request::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_SKEWED_MIN, DEFAULT_TOLERANCE, DistributionFamily,
    GenerationRequest,
};
use crate::search::{SearchOutcome, search};
use crate::visualization::generate_histogram_html;

/// File the histogram is written to when `plot` is set and no path is given.
pub const DEFAULT_PLOT_PATH: &str = "iti_histogram.html";

/// Every option accepted by a generation run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JitterConfig {
    /// Number of durations to generate.
    pub trial_count: usize,
    /// Distribution family.
    pub family: DistributionFamily,
    /// Target mean. Required for skewed families.
    pub desired_mean: Option<f64>,
    /// Floor. Skewed families default to 1 when absent.
    pub min_value: Option<f64>,
    /// Ceiling.
    pub max_value: Option<f64>,
    /// Acceptable absolute distance from the desired mean.
    pub tolerance: f64,
    /// Maximum number of candidates drawn.
    pub max_attempts: usize,
    /// Write an HTML histogram of the result to `plot_path`.
    pub plot: bool,
    /// Destination of the histogram.
    pub plot_path: PathBuf,
    /// Fixed RNG seed; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl JitterConfig {
    /// Creates a geometric configuration with default options.
    #[must_use]
    pub fn new(trial_count: usize) -> Self {
        Self {
            trial_count,
            ..Self::default()
        }
    }

    /// Validate the options into a [`GenerationRequest`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if a skewed family has no
    /// `desired_mean`, or if the resulting request fails validation.
    pub fn to_request(&self) -> Result<GenerationRequest> {
        let discrete = self.family.is_discrete();
        if self.family.is_skewed() {
            let desired_mean = self.desired_mean.ok_or_else(|| {
                Error::invalid("desired_mean", "required for geometric and exponential families")
            })?;
            GenerationRequest::skewed(self.trial_count, desired_mean)
                .min_value(self.min_value.unwrap_or(DEFAULT_SKEWED_MIN))
                .max_value_opt(self.max_value)
                .discrete(discrete)
                .tolerance(self.tolerance)
                .max_attempts(self.max_attempts)
                .build()
        } else {
            GenerationRequest::uniform(self.trial_count)
                .constraints(self.desired_mean, self.min_value, self.max_value)
                .discrete(discrete)
                .tolerance(self.tolerance)
                .max_attempts(self.max_attempts)
                .build()
        }
    }

    /// Run the search described by this configuration.
    ///
    /// When `plot` is set, the histogram is written after the search; the
    /// returned outcome is the same either way.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for invalid options and
    /// [`Error::Io`] if the histogram cannot be written.
    pub fn run(&self) -> Result<SearchOutcome> {
        let request = self.to_request()?;
        let mut rng = self
            .seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        let outcome = search(&request, &mut rng);

        if self.plot {
            generate_histogram_html(&request, &outcome, &self.plot_path)?;
            trace_info!(path = %self.plot_path.display(), "histogram written");
        }
        Ok(outcome)
    }
}

impl Default for JitterConfig {
    fn default() -> Self {
        Self {
            trial_count: 0,
            family: DistributionFamily::default(),
            desired_mean: None,
            min_value: None,
            max_value: None,
            tolerance: DEFAULT_TOLERANCE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            plot: false,
            plot_path: PathBuf::from(DEFAULT_PLOT_PATH),
            seed: None,
        }
    }
}

#[cfg(feature = "serde")]
impl JitterConfig {
    /// Parse a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an I/O error of kind `InvalidData` if the JSON is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use experiment_tools::{DistributionFamily, JitterConfig};
    ///
    /// let config = JitterConfig::from_json_str(
    ///     r#"{ "trial_count": 80, "family": "exponential", "desired_mean": 4.0 }"#,
    /// )
    /// .unwrap();
    /// assert_eq!(config.family, DistributionFamily::Exponential);
    /// assert_eq!(config.tolerance, 0.05);
    /// ```
    pub fn from_json_str(json: &str) -> std::io::Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let file = std::fs::File::open(path)?;
        serde_json::from_reader(std::io::BufReader::new(file))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
