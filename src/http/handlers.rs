//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    Json,
};

use super::dto::{
    HealthResponse, SolarCalculationRequest, SolarCalculationResponse, SolarDataDto,
    SolarPotentialRequest, SubmitRequest, SubmitResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::Address;
use crate::services::{projection, submission};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
///
/// Health check endpoint to verify the service is running.
pub async fn health_check() -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
    }))
}

/// POST /v1/submissions
///
/// Store a user submission (address + browser metadata) and issue a user id.
pub async fn submit_user_data(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Json(request): Json<SubmitRequest>,
) -> HandlerResult<SubmitResponse> {
    let address: Address = request.address.into();
    let user_id = submission::submit_user_data(
        state.store.as_ref(),
        &address,
        &request.browser_data,
        &peer.ip().to_string(),
    )
    .await?;

    Ok(Json(SubmitResponse { user_id }))
}

/// POST /v1/solar-potential
///
/// Resolve the irradiance summary for a previously submitted user, reusing
/// stored data when fresh.
pub async fn get_solar_potential(
    State(state): State<AppState>,
    Json(request): Json<SolarPotentialRequest>,
) -> HandlerResult<SolarDataDto> {
    let resolved = state.resolver.resolve_for_user(&request.user_id).await?;
    Ok(Json(resolved.into()))
}

/// POST /v1/solar-calculation
///
/// Resolve solar data for a user and project production, cost and savings
/// for the requested installation parameters.
pub async fn calculate_solar_potential(
    State(state): State<AppState>,
    Json(request): Json<SolarCalculationRequest>,
) -> HandlerResult<SolarCalculationResponse> {
    let resolved = state.resolver.resolve_for_user(&request.user_id).await?;
    let projection = projection::project(&resolved.summary, &request.system_params())?;

    Ok(Json(SolarCalculationResponse::new(
        projection,
        resolved.into(),
    )))
}
