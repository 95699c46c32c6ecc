use super::entropy::EntropySource;
use super::entropy::OsEntropy;
use super::errors::RandomSourceError;

/// Number of random bytes behind every refresh token.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Generates opaque refresh tokens: 32 random bytes, lowercase hex encoded.
///
/// Tokens carry no expiry or linkage; persisting and expiring them is up to the caller.
pub struct RefreshTokenGenerator<E = OsEntropy> {
    entropy: E,
}

impl RefreshTokenGenerator<OsEntropy> {
    pub fn new() -> Self {
        Self { entropy: OsEntropy }
    }
}

impl Default for RefreshTokenGenerator<OsEntropy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntropySource> RefreshTokenGenerator<E> {
    pub fn with_source(entropy: E) -> Self {
        Self { entropy }
    }

    /// Generate a new 64-character refresh token.
    ///
    /// # Errors
    /// * `RandomSourceError` - The entropy source failed; nothing is returned
    pub fn generate(&self) -> Result<String, RandomSourceError> {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];

        self.entropy.fill(&mut bytes).map_err(|e| {
            tracing::error!(error = %e, "Refresh token generation aborted");
            e
        })?;

        Ok(hex::encode(bytes))
    }
}
