use thiserror::Error;

/// Error type for token minting.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SigningError {
    #[error("Signing secret is empty")]
    EmptySecret,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Token validation failure.
///
/// Carries no cause: a bad signature, a forbidden algorithm, a malformed
/// token, an expired token and an unparsable subject all look the same.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Invalid token")]
pub struct InvalidTokenError;
