//! Subversion parse error types

use thiserror::Error;

/// Reasons a subversion string could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubVersionError {
    /// The string did not split into exactly a name part and a version part on `:`
    #[error("Expected exactly one ':' separating name and version, got {pieces} piece(s)")]
    NameSeparator { pieces: usize },

    /// The version part did not split into exactly two pieces on `(`
    #[error("Expected a single '(' comment block after the version, got {pieces} piece(s)")]
    CommentBlock { pieces: usize },

    /// The version did not have exactly three dotted components
    #[error("Expected 3 dotted version components, got {pieces}")]
    VersionComponents { pieces: usize },

    /// A version component had no leading digits
    #[error("Version component {position} is not a number: {text:?}")]
    InvalidComponent { position: usize, text: String },

    /// A version component did not fit in a 32-bit signed integer
    #[error("Version component {position} is out of range: {text:?}")]
    ComponentOutOfRange { position: usize, text: String },

    /// The combined version was negative or too large to encode
    #[error("Encoded version {value} is out of range")]
    VersionOutOfRange { value: i64 },
}

/// Type alias for subversion results
pub type Result<T> = std::result::Result<T, SubVersionError>;
