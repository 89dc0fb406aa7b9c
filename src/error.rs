use core::fmt;

/// Errors returned by request validation, configuration runs, and shutdown.
///
/// A search that fails to meet its tolerance is *not* an error; it is
/// reported through [`SearchOutcome::converged`](crate::SearchOutcome::converged).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a generation parameter violates a precondition.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// The name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Returned when one or more resources failed to close during shutdown.
    ///
    /// Every resource is attempted before this is returned.
    #[error("failed to close {} resource(s): {}", .failures.len(), join_failures(.failures))]
    Cleanup {
        /// One entry per resource whose `close()` failed, in closing order.
        failures: Vec<CleanupFailure>,
    },

    /// Returned when writing a plot or export file fails.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is an [`Error::InvalidParameter`].
    #[must_use]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Error::InvalidParameter { .. })
    }
}

/// Result alias with the crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// A single resource that failed to close.
#[derive(Debug)]
pub struct CleanupFailure {
    /// Which resource failed, e.g. `"window"` or `"data file 2"`.
    pub resource: String,
    /// The error raised by the resource's `close()`.
    pub source: std::io::Error,
}

impl fmt::Display for CleanupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.resource, self.source)
    }
}

fn join_failures(failures: &[CleanupFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
