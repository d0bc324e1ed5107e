//! Past/upcoming classification of shows relative to a reference instant.
//!
//! The boundary is exclusive on both sides: a show starting exactly at `now`
//! is neither past nor upcoming, so it never shows up in either list or count.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum When {
    Past,
    Upcoming,
}

pub fn classify(start_time: DateTime<Utc>, now: DateTime<Utc>) -> Option<When> {
    if start_time < now {
        Some(When::Past)
    } else if start_time > now {
        Some(When::Upcoming)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowSplit<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

impl<T> Default for ShowSplit<T> {
    fn default() -> Self {
        Self {
            past: Vec::new(),
            upcoming: Vec::new(),
        }
    }
}

impl<T> ShowSplit<T> {
    /// Partition `items` by the start time `start_of` reads from each one.
    pub fn partition<I, F>(items: I, now: DateTime<Utc>, start_of: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> DateTime<Utc>,
    {
        let mut split = Self::default();
        for item in items {
            match classify(start_of(&item), now) {
                Some(When::Past) => split.past.push(item),
                Some(When::Upcoming) => split.upcoming.push(item),
                None => {}
            }
        }
        split
    }

    pub fn past_count(&self) -> usize {
        self.past.len()
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }
}

/// Number of start times strictly after `now`.
pub fn count_upcoming<I>(start_times: I, now: DateTime<Utc>) -> usize
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    start_times
        .into_iter()
        .filter(|t| classify(*t, now) == Some(When::Upcoming))
        .count()
}
