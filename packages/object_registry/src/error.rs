use thiserror::Error;

/// Errors that can occur when operating on a registry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The caller named an identifier that has no entry in the registry.
    ///
    /// This is a routine, recoverable condition - callers that cannot guarantee an entry
    /// exists are expected to handle it. It is also what repeated removal of the same
    /// identifier reports: the first [`unregister()`][crate::Registry::unregister] succeeds,
    /// every later one observes `NotFound`.
    #[error("no entry is registered under id {id}")]
    NotFound {
        /// The identifier that had no entry.
        id: i64,
    },
}

/// A specialized `Result` type for registry operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
