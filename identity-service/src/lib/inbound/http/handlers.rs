use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::account::errors::AuthError;

pub mod health;
pub mod login;
pub mod me;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// API-boundary error with a stable machine-readable `kind`.
///
/// Internal failures never reach the caller in detail; they are logged and
/// collapsed into a generic 500 body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest {
        kind: &'static str,
        field: Option<&'static str>,
        message: String,
    },
    Unauthorized {
        kind: &'static str,
        message: String,
    },
    NotFound {
        kind: &'static str,
        message: String,
    },
    Conflict {
        kind: &'static str,
        message: String,
    },
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, field, message) = match self {
            ApiError::BadRequest {
                kind,
                field,
                message,
            } => (StatusCode::BAD_REQUEST, kind, field, message),
            ApiError::Unauthorized { kind, message } => {
                (StatusCode::UNAUTHORIZED, kind, None, message)
            }
            ApiError::NotFound { kind, message } => (StatusCode::NOT_FOUND, kind, None, message),
            ApiError::Conflict { kind, message } => (StatusCode::CONFLICT, kind, None, message),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    None,
                    "Internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(ApiResponseBody::new_error(status, kind, field, message)),
        )
            .into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        match err {
            AuthError::InvalidEmail(_) => ApiError::BadRequest {
                kind: "validation_error",
                field: Some("email"),
                message,
            },
            AuthError::InvalidUsername(_) => ApiError::BadRequest {
                kind: "validation_error",
                field: Some("username"),
                message,
            },
            AuthError::InvalidPassword(_) => ApiError::BadRequest {
                kind: "validation_error",
                field: Some("password"),
                message,
            },
            AuthError::DuplicateEmail(_) => ApiError::Conflict {
                kind: "duplicate_email",
                message,
            },
            AuthError::InvalidCredentials => ApiError::Unauthorized {
                kind: "invalid_credentials",
                message,
            },
            AuthError::AccountInactive => ApiError::Unauthorized {
                kind: "account_inactive",
                message,
            },
            AuthError::AccountNotFound(_) => ApiError::NotFound {
                kind: "account_not_found",
                message,
            },
            AuthError::TokenExpired => ApiError::Unauthorized {
                kind: "token_expired",
                message,
            },
            AuthError::TokenInvalid => ApiError::Unauthorized {
                kind: "token_invalid",
                message,
            },
            AuthError::Database(detail) | AuthError::Internal(detail) => ApiError::Internal(detail),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(
        status_code: StatusCode,
        kind: &'static str,
        field: Option<&'static str>,
        message: String,
    ) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData {
                kind: kind.to_string(),
                message,
                field: field.map(str::to_string),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}
