//! Error types for timeline construction, navigation and live insertion.

use std::fmt::Debug;

use thiserror::Error;

/// Invalid pager construction or configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot create timeline: initial fetch function is not provided")]
    MissingInitialFetch,
    #[error("cannot create timeline: page fetch function is not provided")]
    MissingFetchPage,
    #[error("cannot create timeline: key is not provided")]
    MissingKey,
    #[error("cannot create timeline: page size must be positive")]
    ZeroPageSize,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Failure of a navigation operation.
///
/// The page source's error is carried unchanged; the pager has already
/// cleared its loading flag when this is returned.
#[derive(Error, Debug)]
pub enum TimelineError<E>
where
    E: std::error::Error + 'static,
{
    #[error("page fetch failed: {0}")]
    Fetch(#[source] E),
}

impl<E> TimelineError<E>
where
    E: std::error::Error + 'static,
{
    /// The page source's own error.
    pub fn into_inner(self) -> E {
        match self {
            TimelineError::Fetch(e) => e,
        }
    }
}

/// Rejected live insertion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InsertError<K: Debug> {
    /// The viewer has paged away from the live edge.
    #[error("internal error: attempted to add latest item to non-live timeline (index {index})")]
    NotLive { index: usize },
    /// The item's key matches the current head of the window.
    #[error("internal error: attempted to add duplicate item {key:?} to timeline")]
    Duplicate { key: K },
}
