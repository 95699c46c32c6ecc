pub mod errors;
pub mod hasher;

pub use errors::PasswordError;
pub use hasher::PasswordHasher;

/// Hash a password with the default work factor.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    PasswordHasher::new().hash(password)
}

/// Check a password against a stored digest.
pub fn check_password_hash(password: &str, digest: &str) -> Result<(), PasswordError> {
    PasswordHasher::new().verify(password, digest)
}
