//! Read-side operations: listings, detail pages and name search.
//!
//! Show counts are always derived from `shows` rows at read time against the
//! caller's `now`; see [`crate::schedule`] for the boundary rule.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::entities::{artist, show, venue};
use crate::error::BookingError;
use crate::forms::{ArtistForm, VenueForm};
use crate::schedule::{classify, ShowSplit, When};
use crate::views::{
    Area, ArtistAppearance, ArtistDetail, Listing, SearchResults, ShowListing, Summary,
    VenueAppearance, VenueDetail,
};

/// Case-insensitive substring match, Unicode lowercasing on both sides.
/// Done in Rust: SQLite's `lower()` only folds ASCII. Empty matches all.
fn name_matches(name: &str, folded_term: &str) -> bool {
    folded_term.is_empty() || name.to_lowercase().contains(folded_term)
}

fn fold_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Upcoming-show count per parent id, where `parent` is `VenueId` or
/// `ArtistId`. Restricted to `ids` when given.
async fn upcoming_counts<C: ConnectionTrait>(
    db: &C,
    parent: show::Column,
    ids: Option<Vec<i32>>,
    now: DateTime<Utc>,
) -> Result<HashMap<i32, usize>, BookingError> {
    let mut select = show::Entity::find()
        .select_only()
        .column(parent)
        .column(show::Column::StartTime);
    if let Some(ids) = ids {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        select = select.filter(parent.is_in(ids));
    }

    let rows: Vec<(i32, DateTime<Utc>)> = select.into_tuple().all(db).await?;

    let mut counts = HashMap::new();
    for (id, start_time) in rows {
        if classify(start_time, now) == Some(When::Upcoming) {
            *counts.entry(id).or_insert(0) += 1;
        }
    }
    Ok(counts)
}

/// All venues grouped by exact `(city, state)`, each with its upcoming count.
pub async fn venue_areas<C: ConnectionTrait>(
    db: &C,
    now: DateTime<Utc>,
) -> Result<Vec<Area>, BookingError> {
    let venues = venue::Entity::find()
        .order_by_asc(venue::Column::Name)
        .all(db)
        .await?;
    let upcoming = upcoming_counts(db, show::Column::VenueId, None, now).await?;

    let mut areas: BTreeMap<(String, String), Vec<Summary>> = BTreeMap::new();
    for v in venues {
        areas.entry((v.state, v.city)).or_default().push(Summary {
            num_upcoming_shows: upcoming.get(&v.id).copied().unwrap_or(0),
            id: v.id,
            name: v.name,
        });
    }

    Ok(areas
        .into_iter()
        .map(|((state, city), venues)| Area {
            city,
            state,
            venues,
        })
        .collect())
}

pub async fn venue_detail<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: DateTime<Utc>,
) -> Result<Option<VenueDetail>, BookingError> {
    let Some(v) = venue::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let rows = show::Entity::find()
        .filter(show::Column::VenueId.eq(id))
        .order_by_asc(show::Column::StartTime)
        .find_also_related(artist::Entity)
        .all(db)
        .await?;

    let appearances = rows.into_iter().filter_map(|(s, a)| {
        a.map(|a| ArtistAppearance {
            artist_id: a.id,
            artist_name: a.name,
            artist_image_link: a.image_link,
            start_time: s.start_time,
        })
    });

    Ok(Some(VenueDetail::new(
        v,
        ShowSplit::partition(appearances, now, |a| a.start_time),
    )))
}

pub async fn artist_detail<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: DateTime<Utc>,
) -> Result<Option<ArtistDetail>, BookingError> {
    let Some(a) = artist::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let rows = show::Entity::find()
        .filter(show::Column::ArtistId.eq(id))
        .order_by_asc(show::Column::StartTime)
        .find_also_related(venue::Entity)
        .all(db)
        .await?;

    let appearances = rows.into_iter().filter_map(|(s, v)| {
        v.map(|v| VenueAppearance {
            venue_id: v.id,
            venue_name: v.name,
            venue_image_link: v.image_link,
            start_time: s.start_time,
        })
    });

    Ok(Some(ArtistDetail::new(
        a,
        ShowSplit::partition(appearances, now, |v| v.start_time),
    )))
}

/// Venues whose name contains `term`, ignoring case.
pub async fn search_venues<C: ConnectionTrait>(
    db: &C,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults, BookingError> {
    let folded = fold_term(term);
    let venues: Vec<(i32, String)> = venue::Entity::find()
        .select_only()
        .column(venue::Column::Id)
        .column(venue::Column::Name)
        .order_by_asc(venue::Column::Name)
        .into_tuple()
        .all(db)
        .await?;
    let venues: Vec<(i32, String)> = venues
        .into_iter()
        .filter(|(_, name)| name_matches(name, &folded))
        .collect();

    let ids = venues.iter().map(|(id, _)| *id).collect();
    let upcoming = upcoming_counts(db, show::Column::VenueId, Some(ids), now).await?;

    Ok(summaries(venues, &upcoming).into())
}

/// Artists whose name contains `term`, ignoring case.
pub async fn search_artists<C: ConnectionTrait>(
    db: &C,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults, BookingError> {
    let folded = fold_term(term);
    let artists: Vec<(i32, String)> = artist::Entity::find()
        .select_only()
        .column(artist::Column::Id)
        .column(artist::Column::Name)
        .order_by_asc(artist::Column::Name)
        .into_tuple()
        .all(db)
        .await?;
    let artists: Vec<(i32, String)> = artists
        .into_iter()
        .filter(|(_, name)| name_matches(name, &folded))
        .collect();

    let ids = artists.iter().map(|(id, _)| *id).collect();
    let upcoming = upcoming_counts(db, show::Column::ArtistId, Some(ids), now).await?;

    Ok(summaries(artists, &upcoming).into())
}

fn summaries(rows: Vec<(i32, String)>, upcoming: &HashMap<i32, usize>) -> Vec<Summary> {
    rows.into_iter()
        .map(|(id, name)| Summary {
            num_upcoming_shows: upcoming.get(&id).copied().unwrap_or(0),
            id,
            name,
        })
        .collect()
}

pub async fn list_artists<C: ConnectionTrait>(db: &C) -> Result<Vec<Listing>, BookingError> {
    let rows: Vec<(i32, String)> = artist::Entity::find()
        .select_only()
        .column(artist::Column::Id)
        .column(artist::Column::Name)
        .order_by_asc(artist::Column::Name)
        .into_tuple()
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|(id, name)| Listing { id, name }).collect())
}

pub async fn list_venues<C: ConnectionTrait>(db: &C) -> Result<Vec<Listing>, BookingError> {
    let rows: Vec<(i32, String)> = venue::Entity::find()
        .select_only()
        .column(venue::Column::Id)
        .column(venue::Column::Name)
        .order_by_asc(venue::Column::Name)
        .into_tuple()
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|(id, name)| Listing { id, name }).collect())
}

/// Every show with both sides denormalized, earliest first.
pub async fn list_shows<C: ConnectionTrait>(db: &C) -> Result<Vec<ShowListing>, BookingError> {
    let rows = show::Entity::find()
        .order_by_asc(show::Column::StartTime)
        .order_by_asc(show::Column::Id)
        .find_also_related(venue::Entity)
        .all(db)
        .await?;

    let artist_ids: Vec<i32> = rows.iter().map(|(s, _)| s.artist_id).collect();
    let artists: HashMap<i32, artist::Model> = if artist_ids.is_empty() {
        HashMap::new()
    } else {
        artist::Entity::find()
            .filter(artist::Column::Id.is_in(artist_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect()
    };

    let mut listings = Vec::with_capacity(rows.len());
    for (s, v) in rows {
        let (Some(v), Some(a)) = (v, artists.get(&s.artist_id)) else {
            tracing::warn!(show_id = s.id, "show references a missing artist or venue");
            continue;
        };
        listings.push(ShowListing {
            id: s.id,
            venue_id: v.id,
            venue_name: v.name,
            artist_id: a.id,
            artist_name: a.name.clone(),
            artist_image_link: a.image_link.clone(),
            start_time: s.start_time,
        });
    }
    Ok(listings)
}

/// Current values of a venue as an edit form.
pub async fn venue_form<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<VenueForm>, BookingError> {
    Ok(venue::Entity::find_by_id(id)
        .one(db)
        .await?
        .map(VenueForm::from))
}

pub async fn artist_form<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<ArtistForm>, BookingError> {
    Ok(artist::Entity::find_by_id(id)
        .one(db)
        .await?
        .map(ArtistForm::from))
}
