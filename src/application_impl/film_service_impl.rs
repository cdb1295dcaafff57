use crate::application_port::{FilmService, ServiceError};
use crate::domain_model::*;
use crate::domain_port::{FilmRepo, GenreRepo, MpaRepo, UserRepo};
use std::sync::Arc;
use tracing::{info, warn};

pub struct RealFilmService {
    film_repo: Arc<dyn FilmRepo>,
    user_repo: Arc<dyn UserRepo>,
    mpa_repo: Arc<dyn MpaRepo>,
    genre_repo: Arc<dyn GenreRepo>,
    default_top_count: u32,
}

impl RealFilmService {
    pub fn new(
        film_repo: Arc<dyn FilmRepo>,
        user_repo: Arc<dyn UserRepo>,
        mpa_repo: Arc<dyn MpaRepo>,
        genre_repo: Arc<dyn GenreRepo>,
    ) -> Self {
        Self {
            film_repo,
            user_repo,
            mpa_repo,
            genre_repo,
            default_top_count: DEFAULT_TOP_COUNT,
        }
    }

    pub fn with_default_top_count(mut self, count: u32) -> Self {
        self.default_top_count = count;
        self
    }

    async fn resolve_mpa(&self, id: MpaId) -> Result<Mpa, ServiceError> {
        self.mpa_repo.find_by_id(id).await?.ok_or_else(|| {
            warn!("mpa rating {id} not found");
            ServiceError::not_found(format!("mpa rating with id = {id} not found"))
        })
    }

    /// One round trip for the whole set; `ids` must already be distinct.
    async fn resolve_genres(&self, ids: &[GenreId]) -> Result<Vec<Genre>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let genres = self.genre_repo.find_by_ids(ids).await?;
        if genres.len() != ids.len() {
            warn!(requested = ?ids, found = genres.len(), "genres not found");
            return Err(ServiceError::not_found("genres not found"));
        }
        Ok(genres)
    }

    async fn ensure_film_exists(&self, id: FilmId) -> Result<(), ServiceError> {
        if !self.film_repo.exists(id).await? {
            warn!("film {id} not found");
            return Err(ServiceError::not_found(format!("film with id = {id} not found")));
        }
        Ok(())
    }

    async fn ensure_user_exists(&self, id: UserId) -> Result<(), ServiceError> {
        if !self.user_repo.exists(id).await? {
            warn!("user {id} not found");
            return Err(ServiceError::not_found(format!("user with id = {id} not found")));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl FilmService for RealFilmService {
    async fn create_film(&self, mut draft: FilmDraft) -> Result<Film, ServiceError> {
        draft.validate()?;

        if let Some(mpa_id) = draft.mpa {
            self.resolve_mpa(mpa_id).await?;
        }
        draft.genres = draft.distinct_genre_ids();
        self.resolve_genres(&draft.genres).await?;

        let film = self.film_repo.save(&draft).await?;
        info!(film_id = %film.id, name = %film.name, "film created");
        Ok(film)
    }

    async fn update_film(&self, id: FilmId, draft: FilmDraft) -> Result<Film, ServiceError> {
        draft.validate()?;

        let mut film = self.film_repo.find_by_id(id).await?.ok_or_else(|| {
            warn!("film {id} not found");
            ServiceError::not_found(format!("film with id = {id} not found"))
        })?;

        let mpa = match draft.mpa {
            Some(mpa_id) => Some(self.resolve_mpa(mpa_id).await?),
            None => None,
        };
        let genres = self.resolve_genres(&draft.distinct_genre_ids()).await?;

        film.name = draft.name;
        film.description = draft.description;
        film.release_date = draft.release_date;
        film.duration = draft.duration;
        film.mpa = mpa;
        film.genres = genres;

        let film = self.film_repo.update(&film).await?;
        info!(film_id = %film.id, "film updated");
        Ok(film)
    }

    async fn get_film_by_id(&self, id: FilmId) -> Result<Film, ServiceError> {
        self.film_repo.find_by_id(id).await?.ok_or_else(|| {
            warn!("film {id} not found");
            ServiceError::not_found(format!("film with id = {id} not found"))
        })
    }

    async fn get_all_films(&self) -> Result<Vec<Film>, ServiceError> {
        Ok(self.film_repo.find_all().await?)
    }

    async fn add_like(&self, film_id: FilmId, user_id: UserId) -> Result<(), ServiceError> {
        self.ensure_film_exists(film_id).await?;
        self.ensure_user_exists(user_id).await?;

        self.film_repo.add_like(film_id, user_id).await?;
        info!(%film_id, %user_id, "like added");
        Ok(())
    }

    async fn remove_like(&self, film_id: FilmId, user_id: UserId) -> Result<(), ServiceError> {
        self.ensure_film_exists(film_id).await?;
        self.ensure_user_exists(user_id).await?;

        self.film_repo.remove_like(film_id, user_id).await?;
        info!(%film_id, %user_id, "like removed");
        Ok(())
    }

    async fn get_top_films(&self, count: Option<i64>) -> Result<Vec<Film>, ServiceError> {
        let count = TopCount::resolve(count, self.default_top_count);
        if count.0 == 0 {
            return Ok(Vec::new());
        }
        Ok(self.film_repo.find_most_popular(count).await?)
    }
}
