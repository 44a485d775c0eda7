use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    domain::{ProviderType, RefreshProgress, SourceKey},
    routes::ApiError,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/scraping-progress", get(scraping_progress))
        .route("/start-scraping", post(start_scraping))
}

#[derive(Debug, Clone, Deserialize)]
struct ProgressQuery {
    location: Option<String>,
    #[serde(rename = "type")]
    provider_type: Option<String>,
}

#[derive(Serialize)]
struct ProgressResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    healthcare: Option<RefreshProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    insurance: Option<RefreshProgress>,
}

#[instrument(name = "GET /scraping-progress", skip(app_state))]
async fn scraping_progress(
    State(app_state): State<AppState>,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let location = query
        .location
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("Location parameter required"))?;
    let requested = query.provider_type.as_deref().unwrap_or("all");

    let coordinator = app_state.cache.coordinator();
    let mut response = ProgressResponse {
        healthcare: None,
        insurance: None,
    };

    if matches!(requested, "all" | "healthcare") {
        let key = SourceKey::new(ProviderType::Healthcare, location);
        response.healthcare = Some(coordinator.progress(&key).await);
    }
    if matches!(requested, "all" | "insurance") {
        let key = SourceKey::new(ProviderType::Insurance, location);
        response.insurance = Some(coordinator.progress(&key).await);
    }

    Ok(Json(response))
}

#[derive(Debug, Clone, Deserialize)]
struct StartScrapingRequest {
    location: Option<String>,
}

#[derive(Serialize)]
struct StartScrapingResponse {
    message: &'static str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
}

#[instrument(name = "POST /start-scraping", skip(app_state))]
async fn start_scraping(
    State(app_state): State<AppState>,
    Json(body): Json<StartScrapingRequest>,
) -> Result<Json<StartScrapingResponse>, ApiError> {
    let location = body
        .location
        .ok_or_else(|| ApiError::bad_request("Location parameter required"))?;

    let healthcare_key = SourceKey::new(ProviderType::Healthcare, &location);
    let insurance_key = SourceKey::new(ProviderType::Insurance, &location);

    let coordinator = app_state.cache.coordinator();
    if coordinator.is_scraping(&healthcare_key).await
        || coordinator.is_scraping(&insurance_key).await
    {
        return Ok(Json(StartScrapingResponse {
            message: "Scraping already in progress",
            status: "in_progress",
            location: None,
        }));
    }

    coordinator.request_refresh(healthcare_key).await;
    coordinator.request_refresh(insurance_key).await;

    Ok(Json(StartScrapingResponse {
        message: "Scraping started",
        status: "started",
        location: Some(location),
    }))
}
