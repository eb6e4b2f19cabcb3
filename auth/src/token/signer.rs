use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Signs and verifies tokens for a single purpose (one secret, one TTL).
///
/// Uses HS256. Expiry is checked here against the caller-supplied instant
/// rather than by the jsonwebtoken crate, so the boundary is deterministic
/// under test and the closed `now >= exp` rule holds exactly.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl,
        }
    }

    /// Issue a signed token for `subject`, expiring `ttl` after `now`.
    ///
    /// # Errors
    /// * `SigningFailed` - serialization or signing failed
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims::for_subject(subject, now, self.ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token and return its subject.
    ///
    /// Checks run in order: signature, parseability, expiry at `now`,
    /// subject presence. Nothing is mutated; verification is stateless.
    ///
    /// # Errors
    /// * `InvalidSignature` - signature mismatch (wrong secret, tampering)
    /// * `Malformed` - the encoding cannot be parsed
    /// * `Expired` - `now >= exp`
    /// * `MissingSubject` - no `sub` claim
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        // Expiry is validated manually below against the injected clock.
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        claims.sub.ok_or(TokenError::MissingSubject)
    }
}
