//! Error types you might see while parsing or composing image references

use thiserror::Error;

/// Errors from parsing or composing an image reference
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum ImageError {
    /// the input does not follow the image reference grammar
    #[error("parsing image {input} failed: {reason}")]
    InvalidReference {
        input: String,
        reason: ReferenceError,
    },

    /// a content digest could not be attached to an existing reference
    #[error("attaching digest {digest} to image {name} failed: {reason}")]
    InvalidDigestComposition {
        name: String,
        digest: String,
        reason: ReferenceError,
    },
}

impl ImageError {
    pub(crate) fn invalid(input: &str, reason: ReferenceError) -> Self {
        ImageError::InvalidReference {
            input: input.to_owned(),
            reason,
        }
    }

    /// The underlying grammar or validation failure
    pub fn reason(&self) -> &ReferenceError {
        match self {
            ImageError::InvalidReference { reason, .. } => reason,
            ImageError::InvalidDigestComposition { reason, .. } => reason,
        }
    }
}

/// Specific reasons a reference or one of its components was rejected
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum ReferenceError {
    #[error("invalid reference format")]
    InvalidFormat,

    #[error("invalid tag format")]
    TagInvalidFormat,

    #[error("repository name must have at least one component")]
    NameEmpty,

    #[error("invalid reference format: repository name must be lowercase")]
    NameContainsUppercase,

    #[error("repository name must not be more than {max} characters")]
    NameTooLong { max: usize },

    #[error("invalid repository name, cannot specify 64-byte hexadecimal strings")]
    IdentifierAsName,

    #[error("invalid digest format")]
    DigestInvalidFormat,

    #[error("unsupported digest algorithm {0:?}")]
    DigestUnsupported(String),

    #[error("invalid checksum digest length")]
    DigestInvalidLength,

    /// the assembled reference would be read back as different components
    #[error("reference does not parse back into the same components")]
    Ambiguous,
}
