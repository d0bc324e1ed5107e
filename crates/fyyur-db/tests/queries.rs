mod common;

use chrono::Duration;
use common::{add_artist, add_show, add_venue, now, test_db, venue_form};
use fyyur_db::entities::show;
use fyyur_db::{mutation, query};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

#[tokio::test]
async fn test_past_plus_upcoming_equals_all_shows() {
    let db = test_db().await;
    let hop = add_venue(&db, "The Musical Hop").await;
    let other = add_venue(&db, "The Dueling Pianos Bar").await;
    let petals = add_artist(&db, "Guns N Petals").await;
    let quevedo = add_artist(&db, "Matt Quevedo").await;

    add_show(&db, petals.id, hop.id, now() - Duration::days(30)).await;
    add_show(&db, quevedo.id, hop.id, now() - Duration::hours(1)).await;
    add_show(&db, petals.id, hop.id, now() + Duration::days(2)).await;
    add_show(&db, quevedo.id, other.id, now() + Duration::days(9)).await;

    for venue_id in [hop.id, other.id] {
        let detail = query::venue_detail(&db, venue_id, now())
            .await
            .unwrap()
            .expect("venue exists");
        let total = show::Entity::find()
            .filter(show::Column::VenueId.eq(venue_id))
            .count(&db)
            .await
            .unwrap();
        assert_eq!(
            (detail.past_shows_count + detail.upcoming_shows_count) as u64,
            total
        );
    }

    let detail = query::venue_detail(&db, hop.id, now()).await.unwrap().unwrap();
    assert_eq!(detail.past_shows_count, 2);
    assert_eq!(detail.upcoming_shows_count, 1);
    assert_eq!(detail.upcoming_shows[0].artist_name, "Guns N Petals");
    assert_eq!(
        detail.upcoming_shows[0].artist_image_link.as_deref(),
        Some("https://images.example.com/artist.jpg")
    );
}

#[tokio::test]
async fn test_show_at_now_is_neither_past_nor_upcoming() {
    let db = test_db().await;
    let venue = add_venue(&db, "The Musical Hop").await;
    let artist = add_artist(&db, "Guns N Petals").await;
    add_show(&db, artist.id, venue.id, now()).await;

    let venue_view = query::venue_detail(&db, venue.id, now()).await.unwrap().unwrap();
    assert_eq!(venue_view.past_shows_count, 0);
    assert_eq!(venue_view.upcoming_shows_count, 0);

    let artist_view = query::artist_detail(&db, artist.id, now()).await.unwrap().unwrap();
    assert!(artist_view.past_shows.is_empty());
    assert!(artist_view.upcoming_shows.is_empty());

    // One second later the same show is in the past
    let later = query::venue_detail(&db, venue.id, now() + Duration::seconds(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(later.past_shows_count, 1);
}

#[tokio::test]
async fn test_detail_only_includes_shows_for_that_id() {
    let db = test_db().await;
    let hop = add_venue(&db, "The Musical Hop").await;
    let bar = add_venue(&db, "The Dueling Pianos Bar").await;
    let petals = add_artist(&db, "Guns N Petals").await;
    let sax = add_artist(&db, "The Wild Sax Band").await;

    add_show(&db, petals.id, hop.id, now() + Duration::days(1)).await;
    add_show(&db, sax.id, bar.id, now() + Duration::days(1)).await;
    add_show(&db, sax.id, bar.id, now() - Duration::days(1)).await;

    let hop_view = query::venue_detail(&db, hop.id, now()).await.unwrap().unwrap();
    assert_eq!(hop_view.upcoming_shows_count, 1);
    assert_eq!(hop_view.past_shows_count, 0);

    let sax_view = query::artist_detail(&db, sax.id, now()).await.unwrap().unwrap();
    assert_eq!(sax_view.past_shows_count, 1);
    assert_eq!(sax_view.upcoming_shows_count, 1);
    assert!(sax_view
        .upcoming_shows
        .iter()
        .chain(sax_view.past_shows.iter())
        .all(|s| s.venue_id == bar.id && s.venue_name == "The Dueling Pianos Bar"));
}

#[tokio::test]
async fn test_missing_ids_are_none() {
    let db = test_db().await;
    assert!(query::venue_detail(&db, 99, now()).await.unwrap().is_none());
    assert!(query::artist_detail(&db, 99, now()).await.unwrap().is_none());
    assert!(query::venue_form(&db, 99).await.unwrap().is_none());
    assert!(query::artist_form(&db, 99).await.unwrap().is_none());
}

#[tokio::test]
async fn test_search_is_case_insensitive_substring() {
    let db = test_db().await;
    let park = add_venue(&db, "Central Park").await;
    add_venue(&db, "The Musical Hop").await;

    for term in ["Park", "park", "PARK", "tral p"] {
        let results = query::search_venues(&db, term, now()).await.unwrap();
        assert_eq!(results.count, 1, "term {term:?}");
        assert_eq!(results.data[0].id, park.id);
        assert_eq!(results.data[0].name, "Central Park");
    }

    let none = query::search_venues(&db, "stadium", now()).await.unwrap();
    assert_eq!(none.count, 0);
    assert!(none.data.is_empty());
}

#[tokio::test]
async fn test_search_reports_only_upcoming_counts() {
    let db = test_db().await;
    let venue = add_venue(&db, "Park Square Live Music & Coffee").await;
    let a = add_artist(&db, "Guns N Petals").await;
    let b = add_artist(&db, "Guns N Roses Tribute").await;
    add_show(&db, a.id, venue.id, now() - Duration::days(3)).await;
    add_show(&db, a.id, venue.id, now() + Duration::days(3)).await;
    add_show(&db, b.id, venue.id, now() + Duration::days(4)).await;

    let venues = query::search_venues(&db, "square", now()).await.unwrap();
    assert_eq!(venues.data[0].num_upcoming_shows, 2);

    let artists = query::search_artists(&db, "guns n", now()).await.unwrap();
    assert_eq!(artists.count, 2);
    assert_eq!(artists.data[0].name, "Guns N Petals");
    assert_eq!(artists.data[0].num_upcoming_shows, 1);
    assert_eq!(artists.data[1].num_upcoming_shows, 1);
}

#[tokio::test]
async fn test_search_folds_non_ascii_names() {
    let db = test_db().await;
    let ecole = add_venue(&db, "École de Musique").await;
    add_venue(&db, "Ecole Libre").await;
    let artist = add_artist(&db, "Ólafur Arnalds").await;

    for term in ["École", "école", "ÉCOLE DE"] {
        let results = query::search_venues(&db, term, now()).await.unwrap();
        assert_eq!(results.count, 1, "term {term:?}");
        assert_eq!(results.data[0].id, ecole.id);
    }

    let artists = query::search_artists(&db, "ólafur", now()).await.unwrap();
    assert_eq!(artists.count, 1);
    assert_eq!(artists.data[0].id, artist.id);
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let db = test_db().await;
    add_venue(&db, "100% Live").await;
    add_venue(&db, "100 Live").await;

    let results = query::search_venues(&db, "100%", now()).await.unwrap();
    assert_eq!(results.count, 1);
    assert_eq!(results.data[0].name, "100% Live");

    let underscore = query::search_venues(&db, "_", now()).await.unwrap();
    assert_eq!(underscore.count, 0);
}

#[tokio::test]
async fn test_empty_search_term_matches_everything() {
    let db = test_db().await;
    add_artist(&db, "Guns N Petals").await;
    add_artist(&db, "Matt Quevedo").await;
    let results = query::search_artists(&db, "  ", now()).await.unwrap();
    assert_eq!(results.count, 2);
}

#[tokio::test]
async fn test_venue_areas_group_by_exact_city_and_state() {
    let db = test_db().await;
    let hop = mutation::create_venue(&db, venue_form("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    mutation::create_venue(&db, venue_form("Park Square", "San Francisco", "CA"))
        .await
        .unwrap();
    mutation::create_venue(&db, venue_form("The Dueling Pianos Bar", "New York", "NY"))
        .await
        .unwrap();
    // Differs only by case, so lands in its own group
    mutation::create_venue(&db, venue_form("Lowercase Lounge", "san francisco", "CA"))
        .await
        .unwrap();

    let artist = add_artist(&db, "Guns N Petals").await;
    add_show(&db, artist.id, hop.id, now() + Duration::days(1)).await;
    add_show(&db, artist.id, hop.id, now() - Duration::days(1)).await;

    let areas = query::venue_areas(&db, now()).await.unwrap();
    assert_eq!(areas.len(), 3);

    let sf = areas
        .iter()
        .find(|a| a.city == "San Francisco" && a.state == "CA")
        .expect("sf area");
    let names: Vec<&str> = sf.venues.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Park Square", "The Musical Hop"]);
    let hop_summary = sf.venues.iter().find(|v| v.id == hop.id).unwrap();
    assert_eq!(hop_summary.num_upcoming_shows, 1);

    let total: usize = areas.iter().map(|a| a.venues.len()).sum();
    assert_eq!(total, 4);
}

#[tokio::test]
async fn test_list_shows_denormalizes_both_sides() {
    let db = test_db().await;
    let venue = add_venue(&db, "The Musical Hop").await;
    let artist = add_artist(&db, "Guns N Petals").await;
    let first = add_show(&db, artist.id, venue.id, now() - Duration::days(1)).await;
    add_show(&db, artist.id, venue.id, now() + Duration::days(1)).await;

    let shows = query::list_shows(&db).await.unwrap();
    assert_eq!(shows.len(), 2);
    assert_eq!(shows[0].id, first.id);
    assert_eq!(shows[0].venue_name, "The Musical Hop");
    assert_eq!(shows[0].artist_name, "Guns N Petals");
    assert_eq!(shows[0].start_time, first.start_time);
}

#[tokio::test]
async fn test_listings_are_sorted_by_name() {
    let db = test_db().await;
    add_artist(&db, "The Wild Sax Band").await;
    add_artist(&db, "Guns N Petals").await;
    add_venue(&db, "The Musical Hop").await;
    add_venue(&db, "Park Square").await;

    let artists = query::list_artists(&db).await.unwrap();
    assert_eq!(artists[0].name, "Guns N Petals");
    assert_eq!(artists[1].name, "The Wild Sax Band");

    let venues = query::list_venues(&db).await.unwrap();
    assert_eq!(venues[0].name, "Park Square");
}

#[tokio::test]
async fn test_edit_form_prefill_round_trips() {
    let db = test_db().await;
    let submitted = venue_form("The Musical Hop", "San Francisco", "CA");
    let venue = mutation::create_venue(&db, submitted.clone()).await.unwrap();
    let prefill = query::venue_form(&db, venue.id).await.unwrap().unwrap();
    assert_eq!(prefill, submitted);
}
