use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::account::ports::AccountRepository;
use crate::inbound::http::router::AppState;

/// Liveness probe: always 200, with the database status reported inline.
pub async fn health<R: AccountRepository>(
    State(state): State<AppState<R>>,
) -> ApiSuccess<HealthResponseData> {
    let database = match state.repository.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "Database ping failed");
            "unavailable"
        }
    };

    ApiSuccess::new(
        StatusCode::OK,
        HealthResponseData {
            status: "ok",
            database,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponseData {
    pub status: &'static str,
    pub database: &'static str,
}

/// Service banner on the root path.
pub async fn banner() -> ApiSuccess<BannerResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        BannerResponseData {
            message: "Welcome to Patronix ERP API",
            status: "active",
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BannerResponseData {
    pub message: &'static str,
    pub status: &'static str,
}
