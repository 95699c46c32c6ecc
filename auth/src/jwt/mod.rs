pub mod claims;
pub mod errors;
pub mod issuer;
pub mod secret;
pub mod ttl;
pub mod validator;

use chrono::Duration;

pub use claims::Claims;
pub use claims::ISSUER;
pub use errors::InvalidTokenError;
pub use errors::SigningError;
pub use issuer::TokenIssuer;
pub use secret::SigningSecret;
pub use ttl::TokenTtlPolicy;
pub use validator::TokenValidator;

use crate::subject::SubjectId;

/// Mint an access token for `subject`, valid for `ttl` from now.
pub fn make_access_token(
    subject: &SubjectId,
    secret: &SigningSecret,
    ttl: Duration,
) -> Result<String, SigningError> {
    TokenIssuer::new(secret).issue(subject, ttl)
}

/// Validate an access token and return the subject it was minted for.
pub fn validate_access_token(
    token: &str,
    secret: &SigningSecret,
) -> Result<SubjectId, InvalidTokenError> {
    TokenValidator::new(secret).validate(token)
}
