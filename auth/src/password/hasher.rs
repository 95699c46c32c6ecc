use argon2::password_hash;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Produces Argon2id digests in PHC string format. Each digest embeds its own
/// parameters and salt, so verification keeps working after the work factor
/// is changed.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a new password hasher with the recommended Argon2id parameters.
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Create a password hasher with an explicit work factor.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB
    /// * `iterations` - Number of passes
    /// * `parallelism` - Degree of parallelism
    ///
    /// # Errors
    /// * `InvalidParameters` - Parameters are outside Argon2's accepted range
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password securely.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - The hash primitive failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing failed");
                PasswordError::HashingFailed(e.to_string())
            })
    }

    /// Verify a password against a stored hash.
    ///
    /// Uses the salt and parameters embedded in `digest`; the comparison is constant time.
    ///
    /// # Errors
    /// * `Mismatch` - Password does not match the digest
    /// * `InvalidDigest` - Digest is not a parsable Argon2 PHC string
    pub fn verify(&self, password: &str, digest: &str) -> Result<(), PasswordError> {
        let parsed_hash = PasswordHash::new(digest)
            .map_err(|e| PasswordError::InvalidDigest(e.to_string()))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(()),
            Err(password_hash::Error::Password) => Err(PasswordError::Mismatch),
            Err(e) => Err(PasswordError::InvalidDigest(e.to_string())),
        }
    }

    /// Hash on the tokio blocking pool so the calling task's worker stays free.
    pub async fn hash_async(&self, password: String) -> Result<String, PasswordError> {
        let hasher = self.clone();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?
    }

    /// Verify on the tokio blocking pool.
    pub async fn verify_async(
        &self,
        password: String,
        digest: String,
    ) -> Result<(), PasswordError> {
        let hasher = self.clone();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_params(1024, 1, 1).expect("Failed to build hasher")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert!(hash.starts_with("$argon2id$"));

        // Verify correct password
        assert!(hasher.verify(password, &hash).is_ok());

        // Verify incorrect password
        assert_eq!(
            hasher.verify("wrong_password", &hash),
            Err(PasswordError::Mismatch)
        );
    }

    #[test]
    fn test_same_password_gets_fresh_salt() {
        let hasher = fast_hasher();

        let first = hasher.hash("hunter2").unwrap();
        let second = hasher.hash("hunter2").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("hunter2", &first).is_ok());
        assert!(hasher.verify("hunter2", &second).is_ok());
    }

    #[test]
    fn test_digest_does_not_contain_password() {
        let hasher = fast_hasher();
        let hash = hasher.hash("plaintext-secret").unwrap();
        assert!(!hash.contains("plaintext-secret"));
    }

    #[test]
    fn test_verify_uses_embedded_params() {
        let hash = fast_hasher().hash("password123").unwrap();

        // A hasher configured differently still verifies older digests
        let hasher = PasswordHasher::new();
        assert!(hasher.verify("password123", &hash).is_ok());
    }

    #[test]
    fn test_empty_password() {
        let hasher = fast_hasher();
        let hash = hasher.hash("").unwrap();

        assert!(hasher.verify("", &hash).is_ok());
        assert_eq!(hasher.verify(" ", &hash), Err(PasswordError::Mismatch));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("password", "invalid_hash");
        assert!(matches!(result, Err(PasswordError::InvalidDigest(_))));
    }

    #[test]
    fn test_invalid_params() {
        let result = PasswordHasher::with_params(1024, 0, 1);
        assert!(matches!(result, Err(PasswordError::InvalidParameters(_))));
    }

    #[tokio::test]
    async fn test_hash_and_verify_async() {
        let hasher = fast_hasher();

        let hash = hasher
            .hash_async("async_password".to_string())
            .await
            .expect("Failed to hash password");

        assert!(hasher
            .verify_async("async_password".to_string(), hash.clone())
            .await
            .is_ok());
        assert_eq!(
            hasher.verify_async("other".to_string(), hash).await,
            Err(PasswordError::Mismatch)
        );
    }
}
