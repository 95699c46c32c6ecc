use thiserror::Error;

/// The entropy source could not be read; no token was produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Failed to read from entropy source: {0}")]
pub struct RandomSourceError(pub String);
