use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::SigningError;
use super::secret::SigningSecret;
use crate::subject::SubjectId;

/// Mints HS256-signed access tokens.
pub struct TokenIssuer {
    // None when constructed from an empty secret; minting then fails.
    encoding_key: Option<EncodingKey>,
}

impl TokenIssuer {
    /// Create a new issuer bound to `secret`.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &SigningSecret) -> Self {
        let encoding_key = if secret.is_empty() {
            None
        } else {
            Some(EncodingKey::from_secret(secret.as_bytes()))
        };

        Self { encoding_key }
    }

    /// Mint a token for `subject` that expires `ttl` from now.
    ///
    /// A zero or negative `ttl` is accepted and yields a token that is
    /// already expired; clamping is the caller's job (see `TokenTtlPolicy`).
    ///
    /// # Errors
    /// * `EmptySecret` - Issuer was built from an empty secret
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &SubjectId, ttl: Duration) -> Result<String, SigningError> {
        self.issue_at(subject, ttl, Utc::now())
    }

    /// Mint a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        subject: &SubjectId,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, SigningError> {
        let encoding_key = self.encoding_key.as_ref().ok_or_else(|| {
            tracing::error!("Refusing to sign access token with an empty secret");
            SigningError::EmptySecret
        })?;

        let claims = Claims::for_subject(subject, now, ttl);
        let header = Header::new(Algorithm::HS256);

        let token = encode(&header, &claims, encoding_key)
            .map_err(|e| SigningError::EncodingFailed(e.to_string()))?;

        tracing::debug!(
            subject = %subject,
            expires_at = claims.exp,
            "Access token issued"
        );

        Ok(token)
    }
}
