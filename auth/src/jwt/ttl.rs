use chrono::Duration;

/// Default access token lifetime, in seconds.
pub const DEFAULT_TTL_SECONDS: i64 = 3600;

/// Longest access token lifetime a caller may request, in seconds.
pub const MAX_TTL_SECONDS: i64 = 3600;

/// Resolves the lifetime of a new access token from what the client asked for.
///
/// Absent, zero or negative requests get the default, as do requests above
/// the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTtlPolicy {
    default: Duration,
    max: Duration,
}

impl TokenTtlPolicy {
    /// # Arguments
    /// * `default_seconds` - Lifetime used when the request is absent or out of range
    /// * `max_seconds` - Largest lifetime honoured
    ///
    /// Values beyond what `Duration` can hold saturate.
    pub fn new(default_seconds: i64, max_seconds: i64) -> Self {
        Self {
            default: saturating_seconds(default_seconds),
            max: saturating_seconds(max_seconds),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default
    }

    pub fn max_ttl(&self) -> Duration {
        self.max
    }

    pub fn resolve(&self, requested_seconds: Option<i64>) -> Duration {
        match requested_seconds {
            Some(seconds) if seconds > 0 && seconds <= self.max.num_seconds() => {
                Duration::seconds(seconds)
            }
            _ => self.default,
        }
    }
}

/// True when `seconds` fits in a `Duration`.
pub fn is_representable(seconds: i64) -> bool {
    Duration::try_seconds(seconds).is_some()
}

fn saturating_seconds(seconds: i64) -> Duration {
    Duration::try_seconds(seconds).unwrap_or(if seconds < 0 {
        Duration::MIN
    } else {
        Duration::MAX
    })
}

impl Default for TokenTtlPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECONDS, MAX_TTL_SECONDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_request_uses_default() {
        let policy = TokenTtlPolicy::default();
        assert_eq!(policy.resolve(None), Duration::seconds(3600));
    }

    #[test]
    fn test_in_range_request_is_honoured() {
        let policy = TokenTtlPolicy::default();
        assert_eq!(policy.resolve(Some(60)), Duration::seconds(60));
        assert_eq!(policy.resolve(Some(3600)), Duration::seconds(3600));
    }

    #[test]
    fn test_out_of_range_request_uses_default() {
        let policy = TokenTtlPolicy::new(900, 3600);

        assert_eq!(policy.resolve(Some(0)), Duration::seconds(900));
        assert_eq!(policy.resolve(Some(-5)), Duration::seconds(900));
        assert_eq!(policy.resolve(Some(3601)), Duration::seconds(900));
    }

    #[test]
    fn test_unrepresentable_lifetimes_saturate() {
        let policy = TokenTtlPolicy::new(i64::MAX, i64::MAX);

        assert_eq!(policy.default_ttl(), Duration::MAX);
        assert_eq!(policy.max_ttl(), Duration::MAX);
        assert_eq!(policy.resolve(Some(86_400)), Duration::seconds(86_400));
        assert!(!is_representable(i64::MAX));
        assert!(is_representable(3600));
    }
}
