use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::account::models::Account;
use crate::account::ports::AccountRepository;
use crate::account::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the account resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

/// Middleware guarding protected routes.
///
/// Extracts the bearer token, resolves it to a live account through the
/// auth service, and stores the account in request extensions.
pub async fn authenticate<R: AccountRepository>(
    State(state): State<AppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req)?;

    let account = state
        .service
        .resolve_identity(token)
        .await
        .map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            ApiError::from(e).into_response()
        })?;

    req.extensions_mut().insert(CurrentAccount(account));

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::Unauthorized {
                kind: "token_invalid",
                message: "Missing Authorization header".to_string(),
            }
            .into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        ApiError::Unauthorized {
            kind: "token_invalid",
            message: "Invalid Authorization header".to_string(),
        }
        .into_response()
    })?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized {
            kind: "token_invalid",
            message: "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        }
        .into_response()
    })
}
