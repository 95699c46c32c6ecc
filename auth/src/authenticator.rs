use chrono::Duration;

use crate::bearer::CredentialExtractor;
use crate::bearer::MissingCredentialError;
use crate::config::Config;
use crate::jwt::InvalidTokenError;
use crate::jwt::SigningError;
use crate::jwt::SigningSecret;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenTtlPolicy;
use crate::jwt::TokenValidator;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::refresh::RandomSourceError;
use crate::refresh::RefreshTokenGenerator;
use crate::subject::SubjectId;

/// Authentication coordinator for the registration, login and request flows.
///
/// Holds one instance of each component, all built from the same process-wide
/// configuration. Share it behind an `Arc`; it is never mutated.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_validator: TokenValidator,
    credential_extractor: CredentialExtractor,
    refresh_tokens: RefreshTokenGenerator,
    ttl_policy: TokenTtlPolicy,
}

/// Tokens handed out on a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginTokens {
    /// Signed access token
    pub access_token: String,
    /// Opaque refresh token
    pub refresh_token: String,
    /// Lifetime of the access token
    pub expires_in: Duration,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(PasswordError),

    #[error("Token signing error: {0}")]
    SigningError(#[from] SigningError),

    #[error(transparent)]
    InvalidToken(#[from] InvalidTokenError),

    #[error(transparent)]
    MissingCredential(#[from] MissingCredentialError),

    #[error("Refresh token error: {0}")]
    RandomSource(#[from] RandomSourceError),
}

impl From<PasswordError> for AuthenticationError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Mismatch => AuthenticationError::InvalidCredentials,
            other => AuthenticationError::PasswordError(other),
        }
    }
}

impl AuthenticationError {
    /// True when the failure is the client's (answer 401), false for server faults.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AuthenticationError::InvalidCredentials
                | AuthenticationError::InvalidToken(_)
                | AuthenticationError::MissingCredential(_)
        )
    }
}

impl Authenticator {
    /// Create a new authenticator with default hashing parameters and token lifetimes.
    ///
    /// # Arguments
    /// * `secret` - Secret key for access token signing
    pub fn new(secret: SigningSecret) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(&secret),
            token_validator: TokenValidator::new(&secret),
            credential_extractor: CredentialExtractor::new(),
            refresh_tokens: RefreshTokenGenerator::new(),
            ttl_policy: TokenTtlPolicy::default(),
        }
    }

    /// Create an authenticator from loaded configuration.
    ///
    /// # Errors
    /// * `InvalidParameters` - Configured hashing parameters are out of range
    pub fn from_config(config: &Config) -> Result<Self, PasswordError> {
        let secret = SigningSecret::from(config.jwt.secret.as_str());
        let password_hasher = PasswordHasher::with_params(
            config.password.memory_kib,
            config.password.iterations,
            config.password.parallelism,
        )?;

        Ok(Self {
            password_hasher,
            token_issuer: TokenIssuer::new(&secret),
            token_validator: TokenValidator::new(&secret),
            credential_extractor: CredentialExtractor::new(),
            refresh_tokens: RefreshTokenGenerator::new(),
            ttl_policy: TokenTtlPolicy::new(
                config.jwt.default_ttl_seconds,
                config.jwt.max_ttl_seconds,
            ),
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Hash a password for storage without blocking the async runtime.
    pub async fn hash_password_async(&self, password: String) -> Result<String, PasswordError> {
        self.password_hasher.hash_async(password).await
    }

    /// Verify credentials and issue an access token and a refresh token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identifier of the user logging in
    /// * `requested_ttl_seconds` - Lifetime asked for by the client, if any
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `SigningError` - Token generation failed
    /// * `RandomSource` - Refresh token generation failed
    pub fn login(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &SubjectId,
        requested_ttl_seconds: Option<i64>,
    ) -> Result<LoginTokens, AuthenticationError> {
        self.password_hasher.verify(password, stored_hash)?;
        self.issue_tokens(subject, requested_ttl_seconds)
    }

    /// Same as [`login`](Self::login), with password verification on the blocking pool.
    pub async fn login_async(
        &self,
        password: String,
        stored_hash: String,
        subject: &SubjectId,
        requested_ttl_seconds: Option<i64>,
    ) -> Result<LoginTokens, AuthenticationError> {
        self.password_hasher
            .verify_async(password, stored_hash)
            .await?;
        self.issue_tokens(subject, requested_ttl_seconds)
    }

    fn issue_tokens(
        &self,
        subject: &SubjectId,
        requested_ttl_seconds: Option<i64>,
    ) -> Result<LoginTokens, AuthenticationError> {
        let expires_in = self.ttl_policy.resolve(requested_ttl_seconds);
        let access_token = self.token_issuer.issue(subject, expires_in)?;
        let refresh_token = self.refresh_tokens.generate()?;

        Ok(LoginTokens {
            access_token,
            refresh_token,
            expires_in,
        })
    }

    /// Validate an access token and return its subject.
    ///
    /// # Errors
    /// * `InvalidTokenError` - Token validation failed
    pub fn validate_token(&self, token: &str) -> Result<SubjectId, InvalidTokenError> {
        self.token_validator.validate(token)
    }

    /// Authenticate a request from its `Authorization` header values.
    ///
    /// # Errors
    /// * `MissingCredential` - No bearer token present
    /// * `InvalidToken` - Token validation failed
    pub fn authenticate_request<I, S>(
        &self,
        header_values: I,
    ) -> Result<SubjectId, AuthenticationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let token = self.credential_extractor.extract(header_values)?;
        Ok(self.token_validator.validate(&token)?)
    }

    /// Authenticate a request from its header map.
    pub fn authenticate_headers(
        &self,
        headers: &http::HeaderMap,
    ) -> Result<SubjectId, AuthenticationError> {
        let token = self.credential_extractor.extract_from_headers(headers)?;
        Ok(self.token_validator.validate(&token)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> Authenticator {
        let config = Config {
            jwt: crate::config::JwtConfig {
                secret: "test_secret_key_at_least_32_bytes!".to_string(),
                default_ttl_seconds: 3600,
                max_ttl_seconds: 3600,
            },
            password: crate::config::PasswordConfig {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
        };

        Authenticator::from_config(&config).expect("Failed to build authenticator")
    }

    #[test]
    fn test_login_success() {
        let authenticator = authenticator();
        let subject = SubjectId::new();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let tokens = authenticator
            .login("my_password", &hash, &subject, None)
            .expect("Login failed");

        assert_eq!(tokens.expires_in, Duration::seconds(3600));
        assert_eq!(tokens.refresh_token.len(), 64);

        let validated = authenticator
            .validate_token(&tokens.access_token)
            .expect("Token validation failed");
        assert_eq!(validated, subject);
    }

    #[test]
    fn test_login_invalid_password() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("my_password").unwrap();

        let result = authenticator.login("wrong_password", &hash, &SubjectId::new(), None);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
        assert!(result.unwrap_err().is_unauthorized());
    }

    #[test]
    fn test_login_with_corrupt_hash_is_server_fault() {
        let authenticator = authenticator();

        let result = authenticator.login("my_password", "invalid_hash", &SubjectId::new(), None);
        let err = result.unwrap_err();
        assert!(matches!(err, AuthenticationError::PasswordError(_)));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_requested_ttl_is_clamped() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("pw").unwrap();

        let short = authenticator
            .login("pw", &hash, &SubjectId::new(), Some(120))
            .unwrap();
        assert_eq!(short.expires_in, Duration::seconds(120));

        let too_long = authenticator
            .login("pw", &hash, &SubjectId::new(), Some(86_400))
            .unwrap();
        assert_eq!(too_long.expires_in, Duration::seconds(3600));
    }

    #[test]
    fn test_oversized_configured_ttl_does_not_panic() {
        let config = Config {
            jwt: crate::config::JwtConfig {
                secret: "test_secret_key_at_least_32_bytes!".to_string(),
                default_ttl_seconds: i64::MAX,
                max_ttl_seconds: i64::MAX,
            },
            password: crate::config::PasswordConfig {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
        };
        let authenticator =
            Authenticator::from_config(&config).expect("Failed to build authenticator");
        let subject = SubjectId::new();
        let hash = authenticator.hash_password("pw").unwrap();

        let tokens = authenticator.login("pw", &hash, &subject, None).unwrap();
        assert_eq!(tokens.expires_in, Duration::MAX);
        assert_eq!(authenticator.validate_token(&tokens.access_token), Ok(subject));
    }

    #[test]
    fn test_authenticate_request() {
        let authenticator = authenticator();
        let subject = SubjectId::new();
        let hash = authenticator.hash_password("pw").unwrap();
        let tokens = authenticator.login("pw", &hash, &subject, None).unwrap();

        let header = format!("Bearer {}", tokens.access_token);
        assert_eq!(
            authenticator.authenticate_request([header.as_str()]).unwrap(),
            subject
        );
    }

    #[test]
    fn test_authenticate_request_without_header() {
        let authenticator = authenticator();

        let err = authenticator
            .authenticate_request(Vec::<String>::new())
            .unwrap_err();
        assert!(matches!(err, AuthenticationError::MissingCredential(_)));
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_authenticate_request_with_bad_token() {
        let authenticator = authenticator();

        let err = authenticator
            .authenticate_request(["Bearer invalid.token.here"])
            .unwrap_err();
        assert!(matches!(err, AuthenticationError::InvalidToken(_)));
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_async_flow() {
        let authenticator = authenticator();
        let subject = SubjectId::new();

        let hash = authenticator
            .hash_password_async("async_pw".to_string())
            .await
            .unwrap();
        let tokens = authenticator
            .login_async("async_pw".to_string(), hash, &subject, Some(60))
            .await
            .unwrap();

        assert_eq!(authenticator.validate_token(&tokens.access_token), Ok(subject));
    }
}
