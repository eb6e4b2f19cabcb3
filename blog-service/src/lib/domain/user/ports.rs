use async_trait::async_trait;
use auth::TokenPair;

use crate::domain::user::errors::AuthError;
use crate::domain::user::models::Identity;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Port for the authentication service.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user, storing only the password hash.
    ///
    /// # Errors
    /// * `UsernameTaken` - username already registered
    /// * `PasswordHash` - hashing failed
    /// * `DatabaseError` - storage operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AuthError>;

    /// Verify credentials and issue the access/refresh token pair.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller.
    ///
    /// # Errors
    /// * `InvalidCredentials` - no such user or password mismatch
    /// * `DatabaseError` - storage operation failed
    async fn login(&self, username: &Username, password: &str) -> Result<TokenPair, AuthError>;

    /// Resolve a bearer access token to the identity it asserts.
    ///
    /// # Errors
    /// * `InvalidCredentials` - invalid, expired, or malformed token, or a
    ///   subject that no longer exists
    async fn authenticate(&self, token: &str) -> Result<Identity, AuthError>;
}

/// Persistence operations for the credential store.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// The storage-level unique constraint on the username is the backstop
    /// for the registration race; a violation surfaces as `UsernameTaken`.
    ///
    /// # Errors
    /// * `UsernameTaken` - username already registered
    /// * `DatabaseError` - storage operation failed
    async fn create(&self, username: &Username, password_hash: &str) -> Result<User, AuthError>;

    /// Retrieve a user by username (None if not found).
    ///
    /// # Errors
    /// * `DatabaseError` - storage operation failed
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError>;

    /// Retrieve a user by identifier (None if not found).
    ///
    /// # Errors
    /// * `DatabaseError` - storage operation failed
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AuthError>;
}
