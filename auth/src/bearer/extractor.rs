use http::header::AUTHORIZATION;
use http::HeaderMap;

use super::errors::MissingCredentialError;

const BEARER_SCHEME: &str = "bearer";

/// Pulls a bearer token out of `Authorization` header values.
///
/// A value matches only when it splits into exactly two whitespace-separated
/// fields and the first is "bearer" in any case.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialExtractor;

impl CredentialExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Scan `header_values` in order and return the token from the first match.
    ///
    /// # Errors
    /// * `MissingCredentialError` - No value matched
    pub fn extract<I, S>(&self, header_values: I) -> Result<String, MissingCredentialError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        header_values
            .into_iter()
            .find_map(|value| parse_bearer(value.as_ref()).map(str::to_string))
            .ok_or(MissingCredentialError)
    }

    /// Same as [`extract`](Self::extract), over every `Authorization` value of a request.
    ///
    /// Values that are not visible ASCII are skipped.
    pub fn extract_from_headers(
        &self,
        headers: &HeaderMap,
    ) -> Result<String, MissingCredentialError> {
        self.extract(
            headers
                .get_all(AUTHORIZATION)
                .iter()
                .filter_map(|value| value.to_str().ok()),
        )
    }
}

fn parse_bearer(value: &str) -> Option<&str> {
    let mut fields = value.split_whitespace();

    match (fields.next(), fields.next(), fields.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => {
            Some(token)
        }
        _ => None,
    }
}
