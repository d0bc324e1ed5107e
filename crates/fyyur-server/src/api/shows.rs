use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use super::{flash, reject, Flash, FlashResult};
use fyyur_db::forms::ShowForm;
use fyyur_db::views::{Listing, ShowListing};
use fyyur_db::{mutation, query, AppState};

/// Blank show form plus the artists and venues it can pick from.
#[derive(Debug, Serialize)]
pub struct ShowFormPage {
    pub form: ShowForm,
    pub artists: Vec<Listing>,
    pub venues: Vec<Listing>,
}

/// GET /shows
pub async fn list_shows(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ShowListing>>, (StatusCode, String)> {
    query::list_shows(&state.db)
        .await
        .map(Json)
        .map_err(reject)
}

/// GET /shows/create
pub async fn new_show_form(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ShowFormPage>, (StatusCode, String)> {
    let artists = query::list_artists(&state.db).await.map_err(reject)?;
    let venues = query::list_venues(&state.db).await.map_err(reject)?;
    Ok(Json(ShowFormPage {
        form: ShowForm::starting_at(Utc::now()),
        artists,
        venues,
    }))
}

/// POST /shows/create
pub async fn create_show(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ShowForm>,
) -> FlashResult {
    flash(
        mutation::create_show(&state.db, body).await,
        StatusCode::CREATED,
        |s| Flash::ok("Show was successfully listed!", Some(s.id)),
        || "An error occurred. Show could not be listed.".to_string(),
    )
}
