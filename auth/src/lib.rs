//! Authentication core for the chirpy service
//!
//! Provides the stateless building blocks every request handler composes:
//! - Password hashing (Argon2id)
//! - Access token issuance and validation (HS256 JWT)
//! - Bearer credential extraction from `Authorization` headers
//! - Opaque refresh token generation
//!
//! Components share nothing but the read-only signing secret handed to them
//! at construction, so they can be called concurrently without locking.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use chirpy_auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! ```
//!
//! ## Access Tokens
//! ```
//! use chirpy_auth::{SigningSecret, SubjectId, TokenIssuer, TokenValidator};
//! use chrono::Duration;
//!
//! let secret = SigningSecret::from("secret_key_at_least_32_bytes_long!");
//! let subject = SubjectId::new();
//!
//! let token = TokenIssuer::new(&secret).issue(&subject, Duration::hours(1)).unwrap();
//! let validated = TokenValidator::new(&secret).validate(&token).unwrap();
//! assert_eq!(validated, subject);
//! ```
//!
//! ## Authenticated Requests
//! ```
//! use chirpy_auth::{get_bearer_token, make_refresh_token};
//!
//! let token = get_bearer_token(["Bearer abc123"]).unwrap();
//! assert_eq!(token, "abc123");
//!
//! let refresh = make_refresh_token().unwrap();
//! assert_eq!(refresh.len(), 64);
//! ```

pub mod authenticator;
pub mod bearer;
pub mod config;
pub mod jwt;
pub mod password;
pub mod refresh;
pub mod subject;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::LoginTokens;
pub use bearer::get_bearer_token;
pub use bearer::CredentialExtractor;
pub use bearer::MissingCredentialError;
pub use jwt::make_access_token;
pub use jwt::validate_access_token;
pub use jwt::InvalidTokenError;
pub use jwt::SigningError;
pub use jwt::SigningSecret;
pub use jwt::TokenIssuer;
pub use jwt::TokenTtlPolicy;
pub use jwt::TokenValidator;
pub use password::check_password_hash;
pub use password::hash_password;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::make_refresh_token;
pub use refresh::RandomSourceError;
pub use refresh::RefreshTokenGenerator;
pub use subject::SubjectId;
