pub mod errors;
pub mod extractor;

pub use errors::MissingCredentialError;
pub use extractor::CredentialExtractor;

/// Return the bearer token carried by the first well-formed value.
pub fn get_bearer_token<I, S>(header_values: I) -> Result<String, MissingCredentialError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    CredentialExtractor::new().extract(header_values)
}
