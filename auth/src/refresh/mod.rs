pub mod entropy;
pub mod errors;
pub mod generator;

pub use entropy::EntropySource;
pub use entropy::OsEntropy;
pub use errors::RandomSourceError;
pub use generator::RefreshTokenGenerator;

/// Generate a refresh token from the operating system's CSPRNG.
pub fn make_refresh_token() -> Result<String, RandomSourceError> {
    RefreshTokenGenerator::new().generate()
}
