//! Submitted venue/artist/show payloads and their field validation.
//!
//! Every struct defaults missing fields so that an absent required field is
//! reported as a [`BookingError::Validation`] rather than a decode failure.

use chrono::{DateTime, Utc};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::entities::{artist, venue};
use crate::error::BookingError;
use crate::genres;

pub const SHORT_FIELD_MAX: usize = 120;
pub const LONG_FIELD_MAX: usize = 500;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: Option<i32>,
    pub venue_id: Option<i32>,
    pub start_time: Option<DateTime<Utc>>,
}

/// A show submission that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewShow {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTime<Utc>,
}

fn required(field: &'static str, value: &str, max: usize) -> Result<String, BookingError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(BookingError::validation(field, "is required"));
    }
    bounded(field, value, max)?;
    Ok(value.to_string())
}

fn optional(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, BookingError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => {
            bounded(field, v, max)?;
            Ok(Some(v.to_string()))
        }
    }
}

fn bounded(field: &'static str, value: &str, max: usize) -> Result<(), BookingError> {
    if value.chars().count() > max {
        return Err(BookingError::validation(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(())
}

/// Empty is allowed; anything else must be an absolute http(s) URL.
fn link(field: &'static str, value: &str) -> Result<(), BookingError> {
    if value.is_empty() {
        return Ok(());
    }
    match url::Url::parse(value) {
        Ok(u) if u.scheme() == "http" || u.scheme() == "https" => Ok(()),
        Ok(_) => Err(BookingError::validation(field, "must be an http(s) URL")),
        Err(e) => Err(BookingError::validation(field, format!("is not a valid URL: {e}"))),
    }
}

fn genre_list(values: &[String]) -> Result<Vec<String>, BookingError> {
    let list = genres::normalize(values);
    if list.is_empty() {
        return Err(BookingError::validation("genres", "at least one genre is required"));
    }
    if list.iter().any(|g| g.chars().count() > SHORT_FIELD_MAX) {
        return Err(BookingError::validation(
            "genres",
            format!("each genre must be at most {SHORT_FIELD_MAX} characters"),
        ));
    }
    Ok(list)
}

fn optional_link(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, BookingError> {
    let value = optional(field, value, max)?;
    if let Some(v) = &value {
        link(field, v)?;
    }
    Ok(value)
}

fn plain_link(field: &'static str, value: &str) -> Result<String, BookingError> {
    let value = value.trim();
    bounded(field, value, SHORT_FIELD_MAX)?;
    link(field, value)?;
    Ok(value.to_string())
}

impl VenueForm {
    /// Check every field and return the trimmed, normalized form.
    pub fn validate(self) -> Result<Self, BookingError> {
        Ok(Self {
            name: required("name", &self.name, SHORT_FIELD_MAX)?,
            city: required("city", &self.city, SHORT_FIELD_MAX)?,
            state: required("state", &self.state, SHORT_FIELD_MAX)?,
            address: required("address", &self.address, SHORT_FIELD_MAX)?,
            phone: required("phone", &self.phone, SHORT_FIELD_MAX)?,
            website: plain_link("website", &self.website)?,
            genres: genre_list(&self.genres)?,
            facebook_link: plain_link("facebook_link", &self.facebook_link)?,
            seeking_talent: self.seeking_talent,
            seeking_description: optional(
                "seeking_description",
                self.seeking_description.as_deref(),
                LONG_FIELD_MAX,
            )?,
            image_link: optional_link("image_link", self.image_link.as_deref(), LONG_FIELD_MAX)?,
        })
    }

    /// Overwrite every editable column of `model` with this form's values.
    pub fn write_to(self, model: &mut venue::ActiveModel) {
        model.name = Set(self.name);
        model.city = Set(self.city);
        model.state = Set(self.state);
        model.address = Set(self.address);
        model.phone = Set(self.phone);
        model.website = Set(self.website);
        model.genres = Set(genres::encode(&self.genres));
        model.facebook_link = Set(self.facebook_link);
        model.seeking_talent = Set(self.seeking_talent);
        model.seeking_description = Set(self.seeking_description);
        model.image_link = Set(self.image_link);
    }
}

impl From<venue::Model> for VenueForm {
    fn from(v: venue::Model) -> Self {
        Self {
            genres: genres::decode(&v.genres),
            name: v.name,
            city: v.city,
            state: v.state,
            address: v.address,
            phone: v.phone,
            website: v.website,
            facebook_link: v.facebook_link,
            seeking_talent: v.seeking_talent,
            seeking_description: v.seeking_description,
            image_link: v.image_link,
        }
    }
}

impl ArtistForm {
    pub fn validate(self) -> Result<Self, BookingError> {
        Ok(Self {
            name: required("name", &self.name, SHORT_FIELD_MAX)?,
            city: required("city", &self.city, SHORT_FIELD_MAX)?,
            state: required("state", &self.state, SHORT_FIELD_MAX)?,
            phone: required("phone", &self.phone, SHORT_FIELD_MAX)?,
            website: plain_link("website", &self.website)?,
            genres: genre_list(&self.genres)?,
            facebook_link: plain_link("facebook_link", &self.facebook_link)?,
            seeking_venue: self.seeking_venue,
            seeking_description: optional(
                "seeking_description",
                self.seeking_description.as_deref(),
                LONG_FIELD_MAX,
            )?,
            image_link: optional_link("image_link", self.image_link.as_deref(), LONG_FIELD_MAX)?,
        })
    }

    pub fn write_to(self, model: &mut artist::ActiveModel) {
        model.name = Set(self.name);
        model.city = Set(self.city);
        model.state = Set(self.state);
        model.phone = Set(self.phone);
        model.website = Set(self.website);
        model.genres = Set(genres::encode(&self.genres));
        model.facebook_link = Set(self.facebook_link);
        model.seeking_venue = Set(self.seeking_venue);
        model.seeking_description = Set(self.seeking_description);
        model.image_link = Set(self.image_link);
    }
}

impl From<artist::Model> for ArtistForm {
    fn from(a: artist::Model) -> Self {
        Self {
            genres: genres::decode(&a.genres),
            name: a.name,
            city: a.city,
            state: a.state,
            phone: a.phone,
            website: a.website,
            facebook_link: a.facebook_link,
            seeking_venue: a.seeking_venue,
            seeking_description: a.seeking_description,
            image_link: a.image_link,
        }
    }
}

impl ShowForm {
    /// Blank form, start time pre-filled with `now`.
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            start_time: Some(now),
            ..Self::default()
        }
    }

    pub fn validate(self) -> Result<NewShow, BookingError> {
        Ok(NewShow {
            artist_id: self
                .artist_id
                .ok_or_else(|| BookingError::validation("artist_id", "is required"))?,
            venue_id: self
                .venue_id
                .ok_or_else(|| BookingError::validation("venue_id", "is required"))?,
            start_time: self
                .start_time
                .ok_or_else(|| BookingError::validation("start_time", "is required"))?,
        })
    }
}
