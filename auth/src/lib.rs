//! Authentication infrastructure library
//!
//! Provides the pieces the blog service composes into its auth flow:
//! - Password hashing (Argon2id)
//! - Signed, time-bound access/refresh tokens with per-purpose secrets
//!
//! The library is stateless: token verification needs only the secrets and
//! an explicit clock instant, never a lookup table. Services own the
//! orchestration (credential lookup, audit logging, error mapping).
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenConfig, TokenIssuer, TokenPurpose};
//! use chrono::Utc;
//!
//! let issuer = TokenIssuer::new(&TokenConfig {
//!     access_secret: "access_secret_at_least_32_bytes!!".into(),
//!     refresh_secret: "refresh_secret_at_least_32_bytes!".into(),
//!     access_ttl_minutes: 30,
//!     refresh_ttl_minutes: 60 * 24 * 7,
//! });
//!
//! let now = Utc::now();
//! let pair = issuer.issue_pair("alice", now).unwrap();
//! let subject = issuer
//!     .verify(&pair.access_token, TokenPurpose::Access, now)
//!     .unwrap();
//! assert_eq!(subject, "alice");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenConfig;
pub use token::TokenError;
pub use token::TokenIssuer;
pub use token::TokenPair;
pub use token::TokenPurpose;
