#![allow(dead_code)]

// Shared test utilities for integration tests
use chrono::{DateTime, TimeZone, Utc};
use fyyur_db::entities::{artist, show, venue};
use fyyur_db::forms::{ArtistForm, ShowForm, VenueForm};
use fyyur_db::{mutation, DatabaseConfig};
use fyyur_migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;

/// Fresh in-memory database with every migration applied
pub async fn test_db() -> DatabaseConnection {
    let db = fyyur_db::connect(&DatabaseConfig::in_memory())
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

/// Reference instant used as "now" throughout the tests
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 20, 0, 0).unwrap()
}

pub fn venue_form(name: &str, city: &str, state: &str) -> VenueForm {
    VenueForm {
        name: name.into(),
        city: city.into(),
        state: state.into(),
        address: "1015 Folsom Street".into(),
        phone: "123-123-1234".into(),
        website: "https://www.themusicalhop.com".into(),
        genres: vec!["Jazz".into(), "Reggae".into()],
        facebook_link: "https://www.facebook.com/TheMusicalHop".into(),
        seeking_talent: false,
        seeking_description: None,
        image_link: Some("https://images.example.com/venue.jpg".into()),
    }
}

pub fn artist_form(name: &str) -> ArtistForm {
    ArtistForm {
        name: name.into(),
        city: "San Francisco".into(),
        state: "CA".into(),
        phone: "326-123-5000".into(),
        website: "https://www.gunsnpetalsband.com".into(),
        genres: vec!["Rock n Roll".into()],
        facebook_link: "https://www.facebook.com/GunsNPetals".into(),
        seeking_venue: true,
        seeking_description: Some("Looking for shows in the Bay Area".into()),
        image_link: Some("https://images.example.com/artist.jpg".into()),
    }
}

pub async fn add_venue(db: &DatabaseConnection, name: &str) -> venue::Model {
    mutation::create_venue(db, venue_form(name, "San Francisco", "CA"))
        .await
        .expect("create venue")
}

pub async fn add_artist(db: &DatabaseConnection, name: &str) -> artist::Model {
    mutation::create_artist(db, artist_form(name))
        .await
        .expect("create artist")
}

pub async fn add_show(
    db: &DatabaseConnection,
    artist_id: i32,
    venue_id: i32,
    start_time: DateTime<Utc>,
) -> show::Model {
    mutation::create_show(
        db,
        ShowForm {
            artist_id: Some(artist_id),
            venue_id: Some(venue_id),
            start_time: Some(start_time),
        },
    )
    .await
    .expect("create show")
}
