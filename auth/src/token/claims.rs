use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Token payload: who the token was issued for and when it stops being valid.
///
/// `sub` stays optional on the wire so a token that was signed without a
/// subject decodes cleanly and can be rejected with a precise error instead
/// of a generic parse failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username the bearer claims to be)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for a subject expiring `ttl` after `issued_at`.
    pub fn for_subject(subject: &str, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: Some(subject.to_string()),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// Whether the token is expired at `now`.
    ///
    /// The inequality is closed: a token is valid strictly before `exp` and
    /// expired at the instant itself.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_for_subject_sets_exp_from_ttl() {
        let issued_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let claims = Claims::for_subject("alice", issued_at, Duration::minutes(30));

        assert_eq!(claims.sub.as_deref(), Some("alice"));
        assert_eq!(claims.exp, 1_700_000_000 + 30 * 60);
    }

    #[test]
    fn test_expiry_boundary_is_closed() {
        let issued_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let claims = Claims::for_subject("alice", issued_at, Duration::minutes(1));

        let just_before = Utc.timestamp_opt(claims.exp - 1, 0).unwrap();
        let at_expiry = Utc.timestamp_opt(claims.exp, 0).unwrap();
        let after = Utc.timestamp_opt(claims.exp + 1, 0).unwrap();

        assert!(!claims.is_expired(just_before));
        assert!(claims.is_expired(at_expiry));
        assert!(claims.is_expired(after));
    }
}
