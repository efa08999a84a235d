use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::models::Account;
use crate::inbound::http::middleware::CurrentAccount;

/// Identity resolution for the authenticated caller.
///
/// The bearer-auth middleware has already verified the token and loaded the
/// account into request extensions.
pub async fn me(
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
) -> Result<ApiSuccess<IdentityResponseData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&account).into()))
}

/// Public account view; never carries password material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityResponseData {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub is_active: bool,
    pub is_superuser: bool,
}

impl From<&Account> for IdentityResponseData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.0,
            email: account.email.as_str().to_string(),
            username: account.username.as_str().to_string(),
            is_active: account.is_active,
            is_superuser: account.is_superuser,
        }
    }
}
