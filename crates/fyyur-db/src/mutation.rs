//! Write-side operations. Each one validates first, then runs as a single
//! transaction: any failure inside rolls every write back.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

use crate::entities::{artist, show, venue};
use crate::error::BookingError;
use crate::forms::{ArtistForm, ShowForm, VenueForm};

/// A removed parent record and the shows that went with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deleted<M> {
    pub record: M,
    pub shows_removed: u64,
}

pub async fn create_venue(
    db: &DatabaseConnection,
    form: VenueForm,
) -> Result<venue::Model, BookingError> {
    let form = form.validate()?;
    let created = db
        .transaction::<_, venue::Model, BookingError>(|txn| {
            Box::pin(async move {
                let mut active = <venue::ActiveModel as Default>::default();
                form.write_to(&mut active);
                Ok(active.insert(txn).await?)
            })
        })
        .await?;

    tracing::info!(venue_id = created.id, name = %created.name, "venue listed");
    Ok(created)
}

/// Replace every editable field of venue `id`.
pub async fn update_venue(
    db: &DatabaseConnection,
    id: i32,
    form: VenueForm,
) -> Result<venue::Model, BookingError> {
    let form = form.validate()?;
    let updated = db
        .transaction::<_, venue::Model, BookingError>(|txn| {
            Box::pin(async move {
                let existing = venue::Entity::find_by_id(id)
                    .one(txn)
                    .await?
                    .ok_or(BookingError::not_found("venue", id))?;
                let mut active: venue::ActiveModel = existing.into();
                form.write_to(&mut active);
                Ok(active.update(txn).await?)
            })
        })
        .await?;

    tracing::info!(venue_id = id, "venue updated");
    Ok(updated)
}

/// Delete venue `id` together with every show booked there.
pub async fn delete_venue(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Deleted<venue::Model>, BookingError> {
    let deleted = db
        .transaction::<_, Deleted<venue::Model>, BookingError>(|txn| {
            Box::pin(async move {
                let existing = venue::Entity::find_by_id(id)
                    .one(txn)
                    .await?
                    .ok_or(BookingError::not_found("venue", id))?;
                let shows = show::Entity::delete_many()
                    .filter(show::Column::VenueId.eq(id))
                    .exec(txn)
                    .await?;
                venue::Entity::delete_by_id(id).exec(txn).await?;
                Ok(Deleted {
                    record: existing,
                    shows_removed: shows.rows_affected,
                })
            })
        })
        .await?;

    tracing::info!(venue_id = id, shows_removed = deleted.shows_removed, "venue deleted");
    Ok(deleted)
}

pub async fn create_artist(
    db: &DatabaseConnection,
    form: ArtistForm,
) -> Result<artist::Model, BookingError> {
    let form = form.validate()?;
    let created = db
        .transaction::<_, artist::Model, BookingError>(|txn| {
            Box::pin(async move {
                let mut active = <artist::ActiveModel as Default>::default();
                form.write_to(&mut active);
                Ok(active.insert(txn).await?)
            })
        })
        .await?;

    tracing::info!(artist_id = created.id, name = %created.name, "artist listed");
    Ok(created)
}

pub async fn update_artist(
    db: &DatabaseConnection,
    id: i32,
    form: ArtistForm,
) -> Result<artist::Model, BookingError> {
    let form = form.validate()?;
    let updated = db
        .transaction::<_, artist::Model, BookingError>(|txn| {
            Box::pin(async move {
                let existing = artist::Entity::find_by_id(id)
                    .one(txn)
                    .await?
                    .ok_or(BookingError::not_found("artist", id))?;
                let mut active: artist::ActiveModel = existing.into();
                form.write_to(&mut active);
                Ok(active.update(txn).await?)
            })
        })
        .await?;

    tracing::info!(artist_id = id, "artist updated");
    Ok(updated)
}

/// Delete artist `id` together with every show they are booked for.
pub async fn delete_artist(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Deleted<artist::Model>, BookingError> {
    let deleted = db
        .transaction::<_, Deleted<artist::Model>, BookingError>(|txn| {
            Box::pin(async move {
                let existing = artist::Entity::find_by_id(id)
                    .one(txn)
                    .await?
                    .ok_or(BookingError::not_found("artist", id))?;
                let shows = show::Entity::delete_many()
                    .filter(show::Column::ArtistId.eq(id))
                    .exec(txn)
                    .await?;
                artist::Entity::delete_by_id(id).exec(txn).await?;
                Ok(Deleted {
                    record: existing,
                    shows_removed: shows.rows_affected,
                })
            })
        })
        .await?;

    tracing::info!(artist_id = id, shows_removed = deleted.shows_removed, "artist deleted");
    Ok(deleted)
}

/// Book an artist into a venue. Both must exist.
pub async fn create_show(
    db: &DatabaseConnection,
    form: ShowForm,
) -> Result<show::Model, BookingError> {
    let new_show = form.validate()?;
    let created = db
        .transaction::<_, show::Model, BookingError>(|txn| {
            Box::pin(async move {
                artist::Entity::find_by_id(new_show.artist_id)
                    .one(txn)
                    .await?
                    .ok_or(BookingError::not_found("artist", new_show.artist_id))?;
                venue::Entity::find_by_id(new_show.venue_id)
                    .one(txn)
                    .await?
                    .ok_or(BookingError::not_found("venue", new_show.venue_id))?;

                let active = show::ActiveModel {
                    artist_id: Set(new_show.artist_id),
                    venue_id: Set(new_show.venue_id),
                    start_time: Set(new_show.start_time),
                    ..Default::default()
                };
                Ok(active.insert(txn).await?)
            })
        })
        .await?;

    tracing::info!(
        show_id = created.id,
        artist_id = created.artist_id,
        venue_id = created.venue_id,
        "show listed"
    );
    Ok(created)
}
