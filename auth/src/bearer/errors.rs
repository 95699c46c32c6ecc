use thiserror::Error;

/// No `Authorization` value carried a well-formed bearer credential.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("No valid bearer token in Authorization header")]
pub struct MissingCredentialError;
