//! Shared tables behind the in-memory repositories.
//!
//! Every table is a `DashMap`, so single-entry reads and writes are safe from
//! many tasks at once. Nothing coordinates *across* entries or tables: a
//! service's check-then-write (e.g. "user exists" followed by "add like") is
//! not atomic here. Callers that need that must serialize writers themselves,
//! for instance behind a `tokio::sync::Mutex` around the service.

use crate::domain_model::*;
use dashmap::DashMap;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};

/// Monotonic id generator owned by one store; separate stores never share ids.
#[derive(Debug)]
pub struct Sequence(AtomicI64);

impl Sequence {
    pub fn new() -> Self {
        Sequence(AtomicI64::new(1))
    }

    pub fn next_id(&self) -> i64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub(super) struct FilmRecord {
    pub name: String,
    pub description: String,
    pub release_date: chrono::NaiveDate,
    pub duration: i32,
    pub mpa_id: Option<MpaId>,
    pub genre_ids: Vec<GenreId>,
    pub likes: HashSet<UserId>,
}

#[derive(Debug, Clone)]
pub(super) struct UserRecord {
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: chrono::NaiveDate,
}

pub struct MemoryStore {
    pub(super) films: DashMap<FilmId, FilmRecord>,
    pub(super) users: DashMap<UserId, UserRecord>,
    /// Outgoing edges keyed by source user, then by target.
    pub(super) friendships: DashMap<UserId, BTreeMap<UserId, Friendship>>,
    pub(super) genres: BTreeMap<GenreId, Genre>,
    pub(super) mpa: BTreeMap<MpaId, Mpa>,
    pub(super) film_seq: Sequence,
    pub(super) user_seq: Sequence,
}

impl MemoryStore {
    /// Empty entity tables with the standard rating and genre lookups.
    pub fn new() -> Self {
        Self::with_lookups(default_genres(), default_mpa())
    }

    pub fn with_lookups(genres: Vec<Genre>, mpa: Vec<Mpa>) -> Self {
        Self {
            films: DashMap::new(),
            users: DashMap::new(),
            friendships: DashMap::new(),
            genres: genres.into_iter().map(|g| (g.id, g)).collect(),
            mpa: mpa.into_iter().map(|m| (m.id, m)).collect(),
            film_seq: Sequence::new(),
            user_seq: Sequence::new(),
        }
    }

    pub(super) fn hydrate_film(&self, id: FilmId, record: &FilmRecord) -> Film {
        let mut genre_ids = record.genre_ids.clone();
        genre_ids.sort();

        Film {
            id,
            name: record.name.clone(),
            description: record.description.clone(),
            release_date: record.release_date,
            duration: record.duration,
            mpa: record.mpa_id.and_then(|mpa_id| self.mpa.get(&mpa_id).cloned()),
            genres: genre_ids
                .iter()
                .filter_map(|genre_id| self.genres.get(genre_id).cloned())
                .collect(),
            likes: record.likes.clone(),
        }
    }

    pub(super) fn confirmed_targets(&self, user_id: UserId) -> Vec<UserId> {
        self.friendships
            .get(&user_id)
            .map(|edges| {
                edges
                    .values()
                    .filter(|edge| edge.is_confirmed())
                    .map(|edge| edge.friend_id)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(super) fn hydrate_user(&self, id: UserId, record: &UserRecord) -> User {
        User {
            id,
            email: record.email.clone(),
            login: record.login.clone(),
            name: record.name.clone(),
            birthday: record.birthday,
            friends: self.confirmed_targets(id).into_iter().collect(),
        }
    }

    pub(super) fn load_user(&self, id: UserId) -> Option<User> {
        let record = self.users.get(&id)?.value().clone();
        Some(self.hydrate_user(id, &record))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn default_mpa() -> Vec<Mpa> {
    [
        (1, "G", "General audiences"),
        (2, "PG", "Parental guidance suggested"),
        (3, "PG-13", "Parents strongly cautioned"),
        (4, "R", "Restricted"),
        (5, "NC-17", "Adults only"),
    ]
    .into_iter()
    .map(|(id, name, description)| Mpa {
        id: MpaId(id),
        name: name.to_string(),
        description: Some(description.to_string()),
    })
    .collect()
}

pub fn default_genres() -> Vec<Genre> {
    [
        (1, "Comedy"),
        (2, "Drama"),
        (3, "Animation"),
        (4, "Thriller"),
        (5, "Documentary"),
        (6, "Action"),
    ]
    .into_iter()
    .map(|(id, name)| Genre {
        id: GenreId(id),
        name: name.to_string(),
        description: None,
    })
    .collect()
}
