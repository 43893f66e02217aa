use axum::{
    routing::{get, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::catalog::ConcertRepository;

pub mod concerts;

pub use concerts::ServerState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router over any repository backend.
pub fn build_router<R: ConcertRepository + 'static>(cors: CorsLayer, state: ServerState<R>) -> Router {
    let api = Router::new()
        .route(
            "/concerts",
            get(concerts::list_concerts::<R>).post(concerts::create_concert::<R>),
        )
        .route("/concerts/location/:venue", get(concerts::list_by_venue::<R>))
        .route("/concerts/date", get(concerts::list_by_date::<R>))
        .route(
            "/concerts/:id",
            put(concerts::update_concert::<R>).delete(concerts::delete_concert::<R>),
        )
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
