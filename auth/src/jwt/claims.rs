use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::subject::SubjectId;

/// Issuer written into every access token.
pub const ISSUER: &str = "chirpy";

/// Access token claims.
///
/// Every field is required; a payload missing one, or carrying one of the
/// wrong type, fails to deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Subject (canonical subject identifier)
    pub sub: String,
}

impl Claims {
    /// Create claims for `subject`, issued at `now` and expiring `ttl` later.
    ///
    /// A zero or negative `ttl` produces claims that are already expired.
    /// A positive `ttl` never expires early: `exp` is the first whole second
    /// at or after `now + ttl`, so it is always later than `iat`.
    pub fn for_subject(subject: &SubjectId, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiry_timestamp(now, ttl),
            sub: subject.to_string(),
        }
    }

    /// Check if token is expired. A token is expired from `exp` onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

fn expiry_timestamp(now: DateTime<Utc>, ttl: Duration) -> i64 {
    let positive = ttl > Duration::zero();

    match now.checked_add_signed(ttl) {
        Some(expires_at) if positive && expires_at.timestamp_subsec_nanos() > 0 => {
            expires_at.timestamp() + 1
        }
        Some(expires_at) => expires_at.timestamp(),
        None if positive => i64::MAX,
        None => i64::MIN,
    }
}
