use crate::application_port::ServiceError;
use crate::domain_model::*;

#[async_trait::async_trait]
pub trait FilmService: Send + Sync {
    async fn create_film(&self, draft: FilmDraft) -> Result<Film, ServiceError>;
    async fn update_film(&self, id: FilmId, draft: FilmDraft) -> Result<Film, ServiceError>;
    async fn get_film_by_id(&self, id: FilmId) -> Result<Film, ServiceError>;
    async fn get_all_films(&self) -> Result<Vec<Film>, ServiceError>;
    async fn add_like(&self, film_id: FilmId, user_id: UserId) -> Result<(), ServiceError>;
    async fn remove_like(&self, film_id: FilmId, user_id: UserId) -> Result<(), ServiceError>;
    /// `None` falls back to the configured default size.
    async fn get_top_films(&self, count: Option<i64>) -> Result<Vec<Film>, ServiceError>;
}
