use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::ISSUER;
use super::errors::InvalidTokenError;
use super::secret::SigningSecret;
use crate::subject::SubjectId;

/// The only signing algorithm accepted, whatever the token header claims.
pub const SUPPORTED_ALGORITHM: Algorithm = Algorithm::HS256;

/// Verifies access tokens and recovers the subject they were minted for.
///
/// Stateless: the outcome depends only on the token, the secret and the clock.
pub struct TokenValidator {
    // None when constructed from an empty secret; every token is then rejected.
    decoding_key: Option<DecodingKey>,
    validation: Validation,
}

impl TokenValidator {
    /// Create a new validator bound to `secret`.
    pub fn new(secret: &SigningSecret) -> Self {
        let decoding_key = if secret.is_empty() {
            None
        } else {
            Some(DecodingKey::from_secret(secret.as_bytes()))
        };

        let mut validation = Validation::new(SUPPORTED_ALGORITHM);
        validation.algorithms = vec![SUPPORTED_ALGORITHM];
        // Expiry is checked against the caller's clock in `validate_at`
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            decoding_key,
            validation,
        }
    }

    /// Validate a token against the current time.
    ///
    /// # Returns
    /// Subject identifier bound to the token
    ///
    /// # Errors
    /// * `InvalidTokenError` - For every kind of failure
    pub fn validate(&self, token: &str) -> Result<SubjectId, InvalidTokenError> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Validate a token as if the current time were `now` (Unix seconds).
    pub fn validate_at(&self, token: &str, now: i64) -> Result<SubjectId, InvalidTokenError> {
        let decoding_key = self.decoding_key.as_ref().ok_or(InvalidTokenError)?;

        // Reject any other algorithm before the rest of the header is looked at
        let header = decode_header(token).map_err(|e| reject("malformed header", &e))?;
        if header.alg != SUPPORTED_ALGORITHM {
            tracing::warn!(
                algorithm = ?header.alg,
                "Access token rejected: unsupported algorithm"
            );
            return Err(InvalidTokenError);
        }

        let token_data = decode::<Claims>(token, decoding_key, &self.validation)
            .map_err(|e| reject("verification failed", &e))?;
        let claims = token_data.claims;

        if claims.is_expired(now) {
            tracing::warn!(expired_at = claims.exp, "Access token rejected: expired");
            return Err(InvalidTokenError);
        }

        let subject =
            SubjectId::from_string(&claims.sub).map_err(|e| reject("invalid subject", &e))?;

        tracing::debug!(subject = %subject, expires_at = claims.exp, "Access token validated");

        Ok(subject)
    }
}

fn reject(reason: &'static str, error: &dyn std::error::Error) -> InvalidTokenError {
    tracing::warn!(reason, error = %error, "Access token rejected");
    InvalidTokenError
}
