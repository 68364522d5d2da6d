use crate::interface_adapters::http::ErrorResponse;
use crate::interface_adapters::protocol::{
    ControlActionDto, ControlResponse, PhaseResponse, VehicleStateDto,
};
use crate::interface_adapters::state::AppState;

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::warn;

pub async fn control_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    let Some(action) = ControlActionDto::from_slug(&slug) else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(format!(
                "unknown control action: {slug}"
            ))),
        )
            .into_response();
    };

    match state.helm.apply(action.into()) {
        Ok(()) => (
            StatusCode::OK,
            Json(ControlResponse {
                turbine_rpm_setting: state.vehicle.rpm_setting(),
                rudder_angle: state.vehicle.rudder_angle(),
            }),
        )
            .into_response(),
        Err(e) => {
            // Either shutdown is underway or the failed refresh just requested it.
            warn!(%slug, error = %e, "control rejected");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

pub async fn shutdown_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.lifecycle.request_shutdown();
    (
        StatusCode::ACCEPTED,
        Json(PhaseResponse {
            phase: state.lifecycle.phase().into(),
        }),
    )
}

pub async fn state_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(VehicleStateDto::new(
        state.vehicle.snapshot(),
        state.lifecycle.phase(),
    ))
}
