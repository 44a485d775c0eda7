use axum::{http::Method, response::IntoResponse, routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{app_state::AppState, config::Settings, routes, routes::ApiError};

pub fn create(config: &Settings) -> Router<()> {
    let app_state = AppState::new(config);
    with_state(app_state)
}

pub fn with_state(app_state: AppState) -> Router<()> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(|| async { "carefinder is up" }))
        .merge(routes::search::router())
        .merge(routes::providers::router())
        .merge(routes::scraping::router())
        .merge(routes::reviews::router())
        .merge(routes::location::router())
        .with_state(app_state)
        .layer(cors)
        // A panicking handler becomes a generic 500 instead of a dropped
        // connection; the panic itself is logged by the runtime.
        .layer(CatchPanicLayer::custom(
            |_: Box<dyn std::any::Any + Send + 'static>| {
                ApiError::internal("Internal server error").into_response()
            },
        ))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
