use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenIssuer;
use auth::TokenPair;
use auth::TokenPurpose;
use chrono::Utc;

use crate::domain::user::errors::AuthError;
use crate::domain::user::models::Identity;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;

/// Authentication service: registration, login, and token authentication.
///
/// Composes the credential store, the password hasher, and the token
/// issuer. Holds no per-request state; all mutable state lives in storage.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: Arc<PasswordHasher>,
    token_issuer: Arc<TokenIssuer>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `token_issuer` - Issuer constructed from service configuration
    pub fn new(repository: Arc<UR>, token_issuer: Arc<TokenIssuer>) -> Self {
        Self {
            repository,
            password_hasher: Arc::new(PasswordHasher::new()),
            token_issuer,
        }
    }

    /// Run the deliberately slow hash off the async workers.
    async fn hash_password(&self, password: String) -> Result<String, AuthError> {
        let hasher = Arc::clone(&self.password_hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Unknown(format!("hashing task panicked: {e}")))?
            .map_err(|e| AuthError::PasswordHash(e.to_string()))
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AuthError> {
        let hasher = Arc::clone(&self.password_hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AuthError::Unknown(format!("verification task panicked: {e}")))?
            .map_err(|e| AuthError::PasswordHash(e.to_string()))
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AuthError> {
        let password_hash = self.hash_password(command.password).await?;

        // No pre-check here: the unique constraint in the store closes the
        // check-then-insert race and surfaces as UsernameTaken.
        self.repository
            .create(&command.username, &password_hash)
            .await
    }

    async fn login(&self, username: &Username, password: &str) -> Result<TokenPair, AuthError> {
        let user = match self.repository.find_by_username(username.as_str()).await? {
            Some(user) => user,
            None => {
                tracing::warn!(username = %username, "login rejected: unknown username");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let matches = self
            .verify_password(password.to_string(), user.password_hash.clone())
            .await?;
        if !matches {
            tracing::warn!(username = %username, "login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        self.token_issuer
            .issue_pair(user.username.as_str(), Utc::now())
            .map_err(|e| AuthError::Unknown(format!("token issuing failed: {e}")))
    }

    async fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        let subject = self
            .token_issuer
            .verify(token, TokenPurpose::Access, Utc::now())
            .map_err(|e| {
                tracing::warn!(reason = %e, "access token rejected");
                AuthError::InvalidCredentials
            })?;

        let user = match self.repository.find_by_username(&subject).await? {
            Some(user) => user,
            None => {
                tracing::warn!(subject = %subject, "access token subject no longer exists");
                return Err(AuthError::InvalidCredentials);
            }
        };

        Ok(Identity {
            user_id: user.id,
            username: user.username.as_str().to_string(),
        })
    }
}
