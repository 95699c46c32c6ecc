use rand::rngs::OsRng;
use rand::RngCore;

use super::errors::RandomSourceError;

/// Source of cryptographically secure random bytes.
pub trait EntropySource: Send + Sync {
    /// Fill `buf` entirely, or fail without the caller using it.
    fn fill(&self, buf: &mut [u8]) -> Result<(), RandomSourceError>;
}

/// The operating system's CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, buf: &mut [u8]) -> Result<(), RandomSourceError> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| RandomSourceError(e.to_string()))
    }
}
