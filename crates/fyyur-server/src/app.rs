use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use fyyur_db::AppState;
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::api;
use crate::config::ServerConfig;

#[derive(Serialize)]
struct ApiStatus {
    status: &'static str,
    version: &'static str,
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();
    if origins.is_empty() {
        tracing::debug!("CORS_ORIGINS not set, cross-origin requests are refused");
    } else {
        tracing::info!("CORS allowed origins: {:?}", origins);
    }
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let venues = Router::new()
        .route("/", get(api::venues::list_venues))
        .route("/search", post(api::venues::search_venues))
        .route(
            "/create",
            get(api::venues::new_venue_form).post(api::venues::create_venue),
        )
        .route(
            "/{id}",
            get(api::venues::get_venue).delete(api::venues::delete_venue),
        )
        .route(
            "/{id}/edit",
            get(api::venues::edit_venue_form).post(api::venues::update_venue),
        );

    let artists = Router::new()
        .route("/", get(api::artists::list_artists))
        .route("/search", post(api::artists::search_artists))
        .route(
            "/create",
            get(api::artists::new_artist_form).post(api::artists::create_artist),
        )
        .route(
            "/{id}",
            get(api::artists::get_artist).delete(api::artists::delete_artist),
        )
        .route(
            "/{id}/edit",
            get(api::artists::edit_artist_form).post(api::artists::update_artist),
        );

    let shows = Router::new()
        .route("/", get(api::shows::list_shows))
        .route(
            "/create",
            get(api::shows::new_show_form).post(api::shows::create_show),
        );

    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .nest("/venues", venues)
        .nest("/artists", artists)
        .nest("/shows", shows)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}

async fn index() -> Json<ApiStatus> {
    Json(ApiStatus {
        status: "Fyyur: venues, artists and shows",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn healthz() -> Json<ApiStatus> {
    Json(ApiStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn not_found() -> (StatusCode, Json<ApiStatus>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiStatus {
            status: "not found",
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
