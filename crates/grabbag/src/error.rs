//! Error types for grabbag.

/// Errors that can occur in grabbag operations.
///
/// Rejections of a [`DeferredFuture`](crate::DeferredFuture) are not part of
/// this enum; they surface as [`DeferredError`](crate::DeferredError) when the
/// future is awaited.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An argument had a shape or type the operation does not accept.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong, including the offending value
        message: String,
    },

    /// Two key collections expected to be disjoint share a key.
    #[error("Duplicate key across partition: '{key}' (collection {collection})")]
    DuplicateKey {
        /// The key seen more than once
        key: String,
        /// Index of the collection in which the repeat was found
        collection: usize,
    },

    /// JSON serialization error while lifting a typed value into an object
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience `Result` type alias for grabbag operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new invalid-argument error.
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    /// Returns whether this error is an assertion failure rather than a
    /// malformed input.
    ///
    /// Assertion failures mean the caller's data broke an invariant it
    /// promised to uphold.
    pub fn is_assertion(&self) -> bool {
        match self {
            Error::DuplicateKey { .. } => true,
            Error::InvalidArgument { .. } => false,
            Error::Serialization(_) => false,
        }
    }
}
