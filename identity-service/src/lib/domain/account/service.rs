use std::sync::Arc;

use auth::PasswordHasher;
use auth::TokenIssuer;
use async_trait::async_trait;
use chrono::Utc;

use crate::account::errors::AuthError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::Credentials;
use crate::account::models::IssuedToken;
use crate::account::models::NewAccount;
use crate::account::models::RegisterCommand;
use crate::account::ports::AccountRepository;
use crate::account::ports::AuthServicePort;

/// Authentication orchestrator.
///
/// Composes the account store, password hasher, and token issuer into the
/// register, login, and identity-resolution flows. Holds no per-request
/// state; all collaborators are injected at construction.
pub struct AuthService<R>
where
    R: AccountRepository,
{
    repository: Arc<R>,
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
}

impl<R> AuthService<R>
where
    R: AccountRepository,
{
    /// Create a new authentication service with injected collaborators.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `password_hasher` - One-way password transform
    /// * `token_issuer` - Access-token signer/verifier holding the
    ///   process-wide secret
    pub fn new(repository: Arc<R>, password_hasher: PasswordHasher, token_issuer: TokenIssuer) -> Self {
        Self {
            repository,
            password_hasher,
            token_issuer,
        }
    }
}

#[async_trait]
impl<R> AuthServicePort for AuthService<R>
where
    R: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Account, AuthError> {
        // The store enforces email uniqueness; a concurrent registration can
        // still surface DuplicateEmail from create after this check passes.
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateEmail(command.email.as_str().to_string()));
        }

        let password_hash = self.password_hasher.hash(command.password.expose())?;

        let account = self
            .repository
            .create(NewAccount {
                email: command.email,
                username: command.username,
                password_hash,
            })
            .await?;

        tracing::info!(account_id = %account.id, "Account registered");

        Ok(account)
    }

    async fn login(&self, credentials: Credentials) -> Result<IssuedToken, AuthError> {
        // Unknown email and wrong password must be indistinguishable to the
        // caller.
        let account = self
            .repository
            .find_by_email(&credentials.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password_matches = self
            .password_hasher
            .verify(credentials.password.expose(), &account.password_hash)?;
        if !password_matches {
            return Err(AuthError::InvalidCredentials);
        }

        if !account.is_active {
            return Err(AuthError::AccountInactive);
        }

        let access_token = self
            .token_issuer
            .issue(&account.id.to_string(), Utc::now())?;

        tracing::debug!(account_id = %account.id, "Access token issued");

        Ok(IssuedToken::bearer(access_token))
    }

    async fn resolve_identity(&self, token: &str) -> Result<Account, AuthError> {
        let claims = self.token_issuer.verify(token, Utc::now())?;

        let account_id =
            AccountId::from_string(&claims.sub).map_err(|_| AuthError::TokenInvalid)?;

        let account = self
            .repository
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AuthError::AccountNotFound(claims.sub.clone()))?;

        if !account.is_active {
            return Err(AuthError::AccountInactive);
        }

        Ok(account)
    }
}
