use super::store::{FilmRecord, MemoryStore};
use crate::domain_model::*;
use crate::domain_port::*;
use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

pub struct MemoryFilmRepo {
    store: Arc<MemoryStore>,
}

impl MemoryFilmRepo {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        MemoryFilmRepo { store }
    }

    /// Mirrors the foreign keys of the relational layout.
    fn check_references(
        &self,
        mpa_id: Option<MpaId>,
        genre_ids: &[GenreId],
    ) -> Result<(), RepoError> {
        if let Some(mpa_id) = mpa_id {
            if !self.store.mpa.contains_key(&mpa_id) {
                return Err(RepoError::not_found("mpa rating", mpa_id.0));
            }
        }
        if let Some(missing) = genre_ids.iter().find(|id| !self.store.genres.contains_key(*id)) {
            return Err(RepoError::not_found("genre", missing.0));
        }
        Ok(())
    }
}

fn distinct(ids: impl IntoIterator<Item = GenreId>) -> Vec<GenreId> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

#[async_trait::async_trait]
impl FilmRepo for MemoryFilmRepo {
    async fn save(&self, draft: &FilmDraft) -> Result<Film, RepoError> {
        let genre_ids = distinct(draft.genres.iter().copied());
        self.check_references(draft.mpa, &genre_ids)?;

        let id = FilmId(self.store.film_seq.next_id());
        let record = FilmRecord {
            name: draft.name.clone(),
            description: draft.description.clone(),
            release_date: draft.release_date,
            duration: draft.duration,
            mpa_id: draft.mpa,
            genre_ids,
            likes: HashSet::new(),
        };
        let film = self.store.hydrate_film(id, &record);
        self.store.films.insert(id, record);

        debug!("film saved: {:?}", film);
        Ok(film)
    }

    async fn update(&self, film: &Film) -> Result<Film, RepoError> {
        let genre_ids = distinct(film.genre_ids());
        self.check_references(film.mpa_id(), &genre_ids)?;

        let record = {
            let mut entry = self
                .store
                .films
                .get_mut(&film.id)
                .ok_or_else(|| RepoError::not_found("film", film.id.0))?;
            entry.name = film.name.clone();
            entry.description = film.description.clone();
            entry.release_date = film.release_date;
            entry.duration = film.duration;
            entry.mpa_id = film.mpa_id();
            entry.genre_ids = genre_ids;
            entry.value().clone()
        };

        debug!("film {} updated", film.id);
        Ok(self.store.hydrate_film(film.id, &record))
    }

    async fn find_by_id(&self, id: FilmId) -> Result<Option<Film>, RepoError> {
        let record = match self.store.films.get(&id) {
            Some(r) => r.value().clone(),
            None => return Ok(None),
        };
        Ok(Some(self.store.hydrate_film(id, &record)))
    }

    async fn find_all(&self) -> Result<Vec<Film>, RepoError> {
        let mut records: Vec<(FilmId, FilmRecord)> = self
            .store
            .films
            .iter()
            .map(|e| (*e.key(), e.value().clone()))
            .collect();
        records.sort_by_key(|(id, _)| *id);

        Ok(records
            .iter()
            .map(|(id, record)| self.store.hydrate_film(*id, record))
            .collect())
    }

    async fn exists(&self, id: FilmId) -> Result<bool, RepoError> {
        Ok(self.store.films.contains_key(&id))
    }

    async fn add_like(&self, film_id: FilmId, user_id: UserId) -> Result<(), RepoError> {
        if !self.store.users.contains_key(&user_id) {
            return Err(RepoError::not_found("user", user_id.0));
        }
        let mut entry = self
            .store
            .films
            .get_mut(&film_id)
            .ok_or_else(|| RepoError::not_found("film", film_id.0))?;
        entry.likes.insert(user_id);

        debug!("like added: film={} user={}", film_id, user_id);
        Ok(())
    }

    async fn remove_like(&self, film_id: FilmId, user_id: UserId) -> Result<(), RepoError> {
        if let Some(mut entry) = self.store.films.get_mut(&film_id) {
            entry.likes.remove(&user_id);
        }

        debug!("like removed: film={} user={}", film_id, user_id);
        Ok(())
    }

    async fn find_most_popular(&self, count: TopCount) -> Result<Vec<Film>, RepoError> {
        let mut ranked: Vec<(FilmId, FilmRecord)> = self
            .store
            .films
            .iter()
            .map(|e| (*e.key(), e.value().clone()))
            .collect();
        ranked.sort_by_key(|(id, record)| (Reverse(record.likes.len()), *id));
        ranked.truncate(count.0 as usize);

        Ok(ranked
            .iter()
            .map(|(id, record)| self.store.hydrate_film(*id, record))
            .collect())
    }
}
