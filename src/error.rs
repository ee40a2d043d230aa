//! Crate error types
//!
//! Most lookups in this crate signal absence with `Option` rather than an
//! error. `Error` exists for the few places that deliberately raise a
//! condition: the fallback/retry pipelines (which recover from
//! `UserNotFound` themselves) and the stats generator (which skips a tick
//! on `StatsQueryUnavailable`).

/// Error type for userhub operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No user stored under the given id
    UserNotFound(String),
    /// The stats generator's store query did not complete within its timeout
    StatsQueryUnavailable,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UserNotFound(id) => write!(f, "User not found with id: {}", id),
            Error::StatsQueryUnavailable => write!(f, "Stats query timed out"),
        }
    }
}

impl std::error::Error for Error {}

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
