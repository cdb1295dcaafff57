use crate::domain_model::{Genre, GenreId, Mpa, MpaId, UserId, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub const MAX_DESCRIPTION_LENGTH: usize = 200;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct FilmId(pub i64);

impl fmt::Display for FilmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// First public film screening; nothing may be released earlier.
pub fn earliest_release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1895, 12, 28).unwrap_or(NaiveDate::MIN)
}

/// A fully hydrated film: rating resolved, genres ascending by id, likes as user ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Film {
    pub id: FilmId,
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub mpa: Option<Mpa>,
    pub genres: Vec<Genre>,
    pub likes: HashSet<UserId>,
}

impl Film {
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    pub fn mpa_id(&self) -> Option<MpaId> {
        self.mpa.as_ref().map(|m| m.id)
    }

    pub fn genre_ids(&self) -> Vec<GenreId> {
        self.genres.iter().map(|g| g.id).collect()
    }

    /// Adds a genre unless one with the same id is already present.
    pub fn push_genre(&mut self, genre: Genre) {
        if !self.genres.iter().any(|g| g.id == genre.id) {
            self.genres.push(genre);
        }
    }
}

/// Caller-supplied film fields; rating and genres are references by id.
#[derive(Debug, Clone, Deserialize)]
pub struct FilmDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: i32,
    #[serde(default)]
    pub mpa: Option<MpaId>,
    #[serde(default)]
    pub genres: Vec<GenreId>,
}

impl FilmDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("film name must not be blank"));
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(ValidationError::new(format!(
                "description must be at most {MAX_DESCRIPTION_LENGTH} characters"
            )));
        }
        if self.release_date < earliest_release_date() {
            return Err(ValidationError::new(format!(
                "release date must not be earlier than {}",
                earliest_release_date()
            )));
        }
        if self.duration <= 0 {
            return Err(ValidationError::new("duration must be positive"));
        }
        Ok(())
    }

    /// Requested genre ids with repeats dropped, first occurrence wins.
    pub fn distinct_genre_ids(&self) -> Vec<GenreId> {
        let mut seen = HashSet::with_capacity(self.genres.len());
        self.genres
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect()
    }
}
