use std::str::FromStr;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    domain::{ProviderType, Review},
    routes::ApiError,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reviews", get(get_reviews))
        .route("/reviews/submit", post(submit_review))
}

#[derive(Debug, Clone, Deserialize)]
struct ReviewsQuery {
    #[serde(rename = "type")]
    review_type: Option<String>,
}

#[derive(Serialize)]
struct AllReviews {
    healthcare: Vec<Review>,
    insurance: Vec<Review>,
}

#[instrument(name = "GET /reviews", skip(app_state))]
async fn get_reviews(
    State(app_state): State<AppState>,
    Query(query): Query<ReviewsQuery>,
) -> Result<Response, ApiError> {
    let requested = query.review_type.as_deref().unwrap_or("all");

    if requested == "all" {
        let all = AllReviews {
            healthcare: app_state.reviews.list(ProviderType::Healthcare).await,
            insurance: app_state.reviews.list(ProviderType::Insurance).await,
        };
        return Ok(Json(all).into_response());
    }

    let provider_type = ProviderType::from_str(requested)
        .map_err(|_| ApiError::bad_request("Invalid review type"))?;
    Ok(Json(app_state.reviews.list(provider_type).await).into_response())
}

#[derive(Debug, Clone, Deserialize)]
struct SubmitReviewRequest {
    #[serde(rename = "type")]
    review_type: Option<String>,
    provider_name: Option<String>,
    rating: Option<f64>,
    review_text: Option<String>,
}

#[derive(Serialize)]
struct SubmitReviewResponse {
    message: &'static str,
    review: Review,
}

#[instrument(name = "POST /reviews/submit", skip(app_state, body))]
async fn submit_review(
    State(app_state): State<AppState>,
    Json(body): Json<SubmitReviewRequest>,
) -> Result<Json<SubmitReviewResponse>, ApiError> {
    let (Some(review_type), Some(provider_name), Some(rating), Some(review_text)) = (
        body.review_type,
        body.provider_name,
        body.rating,
        body.review_text,
    ) else {
        return Err(ApiError::bad_request("Missing required fields"));
    };

    let provider_type = ProviderType::from_str(&review_type)
        .map_err(|_| ApiError::bad_request("Invalid review type"))?;

    let review = app_state
        .reviews
        .submit(provider_type, provider_name, rating, review_text)
        .await;

    Ok(Json(SubmitReviewResponse {
        message: "Review submitted successfully",
        review,
    }))
}
