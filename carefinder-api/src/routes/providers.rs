use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    domain::{ProviderType, RecordSource, SourceKey},
    routes::ApiError,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/providers", get(get_providers))
        .route("/healthcare_graph", get(healthcare_graph))
        // Alias kept for older clients.
        .route("/get-provider-graph", get(healthcare_graph))
}

#[derive(Debug, Clone, Deserialize)]
struct ProvidersQuery {
    #[serde(rename = "type")]
    provider_type: Option<String>,
    location: Option<String>,
}

#[derive(Serialize)]
struct ProviderNames {
    healthcare: Vec<String>,
    insurance: Vec<String>,
}

#[instrument(name = "GET /providers", skip(app_state))]
async fn get_providers(
    State(app_state): State<AppState>,
    Query(query): Query<ProvidersQuery>,
) -> Result<Response, ApiError> {
    let requested = query.provider_type.as_deref().unwrap_or("all");
    if !matches!(requested, "all" | "healthcare" | "insurance") {
        return Err(ApiError::bad_request("Invalid provider type"));
    }

    let mut names = ProviderNames {
        healthcare: Vec::new(),
        insurance: Vec::new(),
    };

    if let Some(location) = &query.location {
        if matches!(requested, "all" | "healthcare") {
            let key = SourceKey::new(ProviderType::Healthcare, location);
            names.healthcare = app_state
                .cache
                .get(&key)
                .await
                .into_iter()
                .map(|p| p.name)
                .collect();
        }
        if matches!(requested, "all" | "insurance") {
            let key = SourceKey::new(ProviderType::Insurance, location);
            names.insurance = app_state
                .cache
                .get(&key)
                .await
                .into_iter()
                .map(|p| p.name)
                .collect();
        }
    }

    // Local database names backfill empty lists, so the endpoint is never
    // silent while a first refresh runs.
    if names.healthcare.is_empty() {
        names.healthcare = app_state
            .local_db
            .clinics()
            .iter()
            .map(|c| c.name.clone())
            .collect();
    }
    if names.insurance.is_empty() {
        names.insurance = app_state
            .local_db
            .insurers()
            .iter()
            .map(|i| i.name.clone())
            .collect();
    }

    Ok(match requested {
        "healthcare" => Json(names.healthcare).into_response(),
        "insurance" => Json(names.insurance).into_response(),
        _ => Json(names).into_response(),
    })
}

#[derive(Debug, Clone, Deserialize)]
struct GraphQuery {
    location: Option<String>,
}

#[derive(Serialize)]
struct ProviderSummary {
    name: String,
    address: String,
    phone: String,
    website: String,
    rating: Option<f64>,
    distance: Option<f64>,
    source: RecordSource,
}

#[instrument(name = "GET /healthcare_graph", skip(app_state))]
async fn healthcare_graph(
    State(app_state): State<AppState>,
    Query(query): Query<GraphQuery>,
) -> Json<Vec<ProviderSummary>> {
    let mut providers = match &query.location {
        Some(location) => {
            let key = SourceKey::new(ProviderType::Healthcare, location);
            app_state.cache.get(&key).await
        }
        None => Vec::new(),
    };
    if providers.is_empty() {
        providers = app_state.local_db.clinics().to_vec();
    }

    let mut summaries = Vec::with_capacity(providers.len());
    for provider in providers {
        // The graph shows community ratings, not the listing site's.
        let rating = app_state.reviews.average_rating(&provider.name).await;
        summaries.push(ProviderSummary {
            name: provider.name,
            address: provider.address,
            phone: provider.phone,
            website: provider.website,
            rating,
            distance: provider.distance,
            source: provider.source,
        });
    }

    // Distance ascending, then rating descending; missing values sort last.
    summaries.sort_by(|a, b| {
        let a_distance = a.distance.unwrap_or(f64::INFINITY);
        let b_distance = b.distance.unwrap_or(f64::INFINITY);
        let a_rating = a.rating.map(|r| -r).unwrap_or(f64::INFINITY);
        let b_rating = b.rating.map(|r| -r).unwrap_or(f64::INFINITY);

        a_distance
            .total_cmp(&b_distance)
            .then(a_rating.total_cmp(&b_rating))
    });

    Json(summaries)
}
