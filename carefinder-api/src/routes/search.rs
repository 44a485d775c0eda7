use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    domain::{ProviderRecord, SearchScope, SymptomAnalysis},
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/search", post(search))
}

#[derive(Debug, Clone, Deserialize)]
struct SearchRequest {
    #[serde(default)]
    query: String,
    #[serde(rename = "type", default)]
    search_type: SearchScope,
    #[serde(default)]
    location: Option<String>,
}

#[derive(Serialize)]
struct SearchResponse {
    clinics: Vec<ProviderRecord>,
    insurance: Vec<ProviderRecord>,
    medical_advice: Option<SymptomAnalysis>,
    error: Option<String>,
}

#[instrument(name = "POST /search", skip(app_state, body), fields(query = %body.query))]
async fn search(
    State(app_state): State<AppState>,
    Json(body): Json<SearchRequest>,
) -> Json<SearchResponse> {
    let outcome = app_state
        .orchestrator
        .search(&body.query, body.search_type, body.location.as_deref())
        .await;

    Json(SearchResponse {
        clinics: outcome.clinics,
        insurance: outcome.insurance,
        medical_advice: outcome.medical_advice,
        error: None,
    })
}
