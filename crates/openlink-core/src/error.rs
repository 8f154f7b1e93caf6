//! Builder error types.

use thiserror::Error;

/// Result type for strict builds.
pub type BuildResult<T> = Result<T, BuildError>;

/// A structural violation detected while building a value.
///
/// The display text is the fixed, human-readable message callers assert on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A mandatory field was never set (strict builds only).
    #[error("{0}")]
    NotSet(&'static str),

    /// An identifier was added twice to a collection that requires uniqueness.
    ///
    /// Raised in both strict and diagnostic modes.
    #[error("{0}")]
    NotUnique(&'static str),
}

impl BuildError {
    /// Returns the fixed message carried by this error.
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotSet(message) | Self::NotUnique(message) => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message() {
        let error = BuildError::NotSet("The call id has not been set");
        assert_eq!(error.to_string(), "The call id has not been set");
        assert_eq!(error.message(), "The call id has not been set");
    }

    #[test]
    fn not_unique_display() {
        let error = BuildError::NotUnique("The profile id must be unique");
        assert_eq!(format!("{}", error), "The profile id must be unique");
    }
}
