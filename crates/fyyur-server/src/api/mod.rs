pub mod artists;
pub mod shows;
pub mod venues;

use axum::http::StatusCode;
use axum::Json;
use fyyur_db::BookingError;
use serde::{Deserialize, Serialize};

/// Outcome of a create/update/delete, shown to the user as a flash message.
#[derive(Debug, Serialize)]
pub struct Flash {
    pub success: bool,
    pub message: String,
    pub id: Option<i32>,
}

impl Flash {
    pub fn ok(message: impl Into<String>, id: Option<i32>) -> Self {
        Self {
            success: true,
            message: message.into(),
            id,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            id: None,
        }
    }
}

pub type FlashResult = Result<(StatusCode, Json<Flash>), (StatusCode, String)>;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub search_term: String,
    #[serde(flatten)]
    pub results: fyyur_db::views::SearchResults,
}

/// Map a booking error to an HTTP error response.
pub fn reject(err: BookingError) -> (StatusCode, String) {
    match err {
        BookingError::Validation { .. } => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
        BookingError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        BookingError::Persistence(e) => {
            (StatusCode::INTERNAL_SERVER_ERROR, format!("DB error: {e}"))
        }
    }
}

/// Persistence failures of a mutation are rolled back already; report them as
/// a failed flash. Validation and lookup failures stay HTTP errors.
pub fn flash<T>(
    result: Result<T, BookingError>,
    ok_status: StatusCode,
    on_ok: impl FnOnce(&T) -> Flash,
    failure: impl FnOnce() -> String,
) -> FlashResult {
    match result {
        Ok(value) => Ok((ok_status, Json(on_ok(&value)))),
        Err(BookingError::Persistence(e)) => {
            tracing::error!("mutation rolled back: {e}");
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Flash::failed(failure())),
            ))
        }
        Err(e) => Err(reject(e)),
    }
}
