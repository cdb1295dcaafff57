use crate::domain_model::*;
use crate::domain_port::RepoError;

#[async_trait::async_trait]
pub trait FilmRepo: Send + Sync {
    /// Persists scalars, rating reference and genre links; returns the stored aggregate.
    /// Rating and genre ids are expected to be validated by the caller.
    async fn save(&self, draft: &FilmDraft) -> Result<Film, RepoError>;

    /// Overwrites scalars and rating, replaces the genre links wholesale, and returns
    /// the aggregate with genres and likes reloaded. `RepoError::NotFound` when the id
    /// is absent.
    async fn update(&self, film: &Film) -> Result<Film, RepoError>;

    async fn find_by_id(&self, id: FilmId) -> Result<Option<Film>, RepoError>;

    async fn find_all(&self) -> Result<Vec<Film>, RepoError>;

    async fn exists(&self, id: FilmId) -> Result<bool, RepoError>;

    /// Idempotent.
    async fn add_like(&self, film_id: FilmId, user_id: UserId) -> Result<(), RepoError>;

    /// No-op when the like is absent.
    async fn remove_like(&self, film_id: FilmId, user_id: UserId) -> Result<(), RepoError>;

    /// Films by like count descending, ties by id ascending, at most `count` of them.
    async fn find_most_popular(&self, count: TopCount) -> Result<Vec<Film>, RepoError>;
}
