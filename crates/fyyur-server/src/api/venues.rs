use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use super::{flash, reject, Flash, FlashResult, SearchRequest, SearchResponse};
use fyyur_db::forms::VenueForm;
use fyyur_db::views::{Area, VenueDetail};
use fyyur_db::{mutation, query, AppState};

/// GET /venues
pub async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Area>>, (StatusCode, String)> {
    query::venue_areas(&state.db, Utc::now())
        .await
        .map(Json)
        .map_err(reject)
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let results = query::search_venues(&state.db, &body.search_term, Utc::now())
        .await
        .map_err(reject)?;
    Ok(Json(SearchResponse {
        search_term: body.search_term,
        results,
    }))
}

/// GET /venues/:id
pub async fn get_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<VenueDetail>, (StatusCode, String)> {
    query::venue_detail(&state.db, id, Utc::now())
        .await
        .map_err(reject)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Venue not found".to_string()))
}

/// GET /venues/create
pub async fn new_venue_form() -> Json<VenueForm> {
    Json(VenueForm::default())
}

/// POST /venues/create
pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    Json(body): Json<VenueForm>,
) -> FlashResult {
    let name = body.name.clone();
    flash(
        mutation::create_venue(&state.db, body).await,
        StatusCode::CREATED,
        |v| Flash::ok(format!("Venue {} was successfully listed!", v.name), Some(v.id)),
        || format!("An error occurred. Venue {name} could not be listed."),
    )
}

/// DELETE /venues/:id
pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> FlashResult {
    flash(
        mutation::delete_venue(&state.db, id).await,
        StatusCode::OK,
        |d| {
            Flash::ok(
                format!("Venue {} was successfully deleted!", d.record.name),
                Some(id),
            )
        },
        || format!("An error occurred. Venue {id} could not be deleted."),
    )
}

/// GET /venues/:id/edit
pub async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<VenueForm>, (StatusCode, String)> {
    query::venue_form(&state.db, id)
        .await
        .map_err(reject)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Venue not found".to_string()))
}

/// POST /venues/:id/edit
pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(body): Json<VenueForm>,
) -> FlashResult {
    flash(
        mutation::update_venue(&state.db, id, body).await,
        StatusCode::OK,
        |v| Flash::ok("Venue was successfully updated!", Some(v.id)),
        || "An error occurred. Venue could not be changed.".to_string(),
    )
}
