use async_trait::async_trait;

use crate::account::errors::AuthError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::Credentials;
use crate::account::models::EmailAddress;
use crate::account::models::IssuedToken;
use crate::account::models::NewAccount;
use crate::account::models::RegisterCommand;

/// Port for the authentication orchestrator.
///
/// Each operation is a stateless pipeline; concurrent calls share nothing
/// but the account store.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account from validated input.
    ///
    /// # Returns
    /// The created account, id assigned by the store
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered (pre-check or
    ///   concurrent create, both surface the same way)
    /// * `Database` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Account, AuthError>;

    /// Authenticate credentials and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `AccountInactive` - Credentials are correct but the account is
    ///   deactivated
    /// * `Database` - Store operation failed
    async fn login(&self, credentials: Credentials) -> Result<IssuedToken, AuthError>;

    /// Resolve a bearer token back to the account it was issued for.
    ///
    /// # Errors
    /// * `TokenExpired` / `TokenInvalid` - Token failed verification
    /// * `AccountNotFound` - Subject account no longer exists
    /// * `AccountInactive` - Subject account was deactivated after issuance
    /// * `Database` - Store operation failed
    async fn resolve_identity(&self, token: &str) -> Result<Account, AuthError>;
}

/// Persistence operations for the account aggregate.
///
/// The store owns durability and email uniqueness; a `create` that fails
/// with `DuplicateEmail` must not have mutated state.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account; the store assigns the identifier.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `Database` - Store operation failed
    async fn create(&self, account: NewAccount) -> Result<Account, AuthError>;

    /// Retrieve an account by email address.
    ///
    /// # Returns
    /// Optional account (None if not found)
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AuthError>;

    /// Retrieve an account by identifier.
    ///
    /// # Returns
    /// Optional account (None if not found)
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AuthError>;

    /// Cheap store liveness probe for the health endpoint.
    ///
    /// # Errors
    /// * `Database` - Store is unreachable
    async fn ping(&self) -> Result<(), AuthError>;
}
