use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::instrument;

use crate::{domain::ClientLocation, routes::ApiError, AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/update-location", post(update_location))
}

#[derive(Debug, Clone, Deserialize)]
struct UpdateLocationRequest {
    latitude: Option<f64>,
    longitude: Option<f64>,
    accuracy: Option<f64>,
    #[serde(rename = "isManualSelection", default)]
    is_manual_selection: bool,
}

#[derive(Serialize)]
struct UpdateLocationResponse {
    success: bool,
    message: &'static str,
}

#[instrument(name = "POST /update-location", skip(app_state, body))]
async fn update_location(
    State(app_state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(body): Json<UpdateLocationRequest>,
) -> Result<Json<UpdateLocationResponse>, ApiError> {
    let (Some(latitude), Some(longitude)) = (body.latitude, body.longitude) else {
        return Err(ApiError::bad_request("Invalid location data"));
    };

    app_state
        .locations
        .update(
            addr.ip(),
            ClientLocation {
                latitude,
                longitude,
                accuracy: body.accuracy,
                is_manual_selection: body.is_manual_selection,
                timestamp: OffsetDateTime::now_utc(),
            },
        )
        .await;

    Ok(Json(UpdateLocationResponse {
        success: true,
        message: "Location updated successfully",
    }))
}
