use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use super::{flash, reject, Flash, FlashResult, SearchRequest, SearchResponse};
use fyyur_db::forms::ArtistForm;
use fyyur_db::views::{ArtistDetail, Listing};
use fyyur_db::{mutation, query, AppState};

/// GET /artists
pub async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Listing>>, (StatusCode, String)> {
    query::list_artists(&state.db)
        .await
        .map(Json)
        .map_err(reject)
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let results = query::search_artists(&state.db, &body.search_term, Utc::now())
        .await
        .map_err(reject)?;
    Ok(Json(SearchResponse {
        search_term: body.search_term,
        results,
    }))
}

/// GET /artists/:id
pub async fn get_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ArtistDetail>, (StatusCode, String)> {
    query::artist_detail(&state.db, id, Utc::now())
        .await
        .map_err(reject)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Artist not found".to_string()))
}

/// GET /artists/create
pub async fn new_artist_form() -> Json<ArtistForm> {
    Json(ArtistForm::default())
}

/// POST /artists/create
pub async fn create_artist(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ArtistForm>,
) -> FlashResult {
    let name = body.name.clone();
    flash(
        mutation::create_artist(&state.db, body).await,
        StatusCode::CREATED,
        |a| Flash::ok(format!("Artist {} was successfully listed!", a.name), Some(a.id)),
        || format!("An error occurred. Artist {name} could not be listed."),
    )
}

/// GET /artists/:id/edit
pub async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ArtistForm>, (StatusCode, String)> {
    query::artist_form(&state.db, id)
        .await
        .map_err(reject)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Artist not found".to_string()))
}

/// POST /artists/:id/edit
pub async fn update_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(body): Json<ArtistForm>,
) -> FlashResult {
    flash(
        mutation::update_artist(&state.db, id, body).await,
        StatusCode::OK,
        |a| Flash::ok("Artist was successfully updated!", Some(a.id)),
        || "An error occurred. Artist could not be changed.".to_string(),
    )
}

/// DELETE /artists/:id
pub async fn delete_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> FlashResult {
    flash(
        mutation::delete_artist(&state.db, id).await,
        StatusCode::OK,
        |d| {
            Flash::ok(
                format!("Artist {} was successfully deleted!", d.record.name),
                Some(id),
            )
        },
        || format!("An error occurred. Artist {id} could not be deleted."),
    )
}
