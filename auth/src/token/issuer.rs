use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use super::errors::TokenError;
use super::signer::TokenSigner;

/// Which of the two token kinds an operation targets.
///
/// Access and refresh tokens are signed with independent secrets, so a
/// token issued for one purpose never verifies as the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPurpose {
    Access,
    Refresh,
}

/// Secrets and lifetimes for both token purposes.
///
/// Constructed explicitly from service configuration at startup and handed
/// into `TokenIssuer::new`; there is no process-global accessor.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// The two tokens handed out on a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and verifies access and refresh tokens.
///
/// Holds one signer per purpose. Completely stateless beyond the keys:
/// there is no token store and no revocation list.
pub struct TokenIssuer {
    access: TokenSigner,
    refresh: TokenSigner,
}

impl TokenIssuer {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            access: TokenSigner::new(
                config.access_secret.as_bytes(),
                Duration::minutes(config.access_ttl_minutes),
            ),
            refresh: TokenSigner::new(
                config.refresh_secret.as_bytes(),
                Duration::minutes(config.refresh_ttl_minutes),
            ),
        }
    }

    /// Issue a single token of the given purpose.
    pub fn issue(
        &self,
        subject: &str,
        purpose: TokenPurpose,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        self.signer(purpose).issue(subject, now)
    }

    /// Issue the access/refresh pair returned by a successful login.
    pub fn issue_pair(&self, subject: &str, now: DateTime<Utc>) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.access.issue(subject, now)?,
            refresh_token: self.refresh.issue(subject, now)?,
        })
    }

    /// Verify a token against the given purpose's secret, returning its
    /// subject.
    ///
    /// # Errors
    /// * `InvalidSignature` - wrong secret (including the other purpose's)
    ///   or tampering
    /// * `Expired` - past its validity window at `now`
    /// * `Malformed` - undecodable
    /// * `MissingSubject` - no subject claim
    pub fn verify(
        &self,
        token: &str,
        purpose: TokenPurpose,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        self.signer(purpose).verify(token, now)
    }

    fn signer(&self, purpose: TokenPurpose) -> &TokenSigner {
        match purpose {
            TokenPurpose::Access => &self.access,
            TokenPurpose::Refresh => &self.refresh,
        }
    }
}
