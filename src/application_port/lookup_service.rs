use crate::application_port::ServiceError;
use crate::domain_model::*;

#[async_trait::async_trait]
pub trait LookupService: Send + Sync {
    async fn list_genres(&self) -> Result<Vec<Genre>, ServiceError>;
    async fn get_genre_by_id(&self, id: GenreId) -> Result<Genre, ServiceError>;
    async fn list_mpa(&self) -> Result<Vec<Mpa>, ServiceError>;
    async fn get_mpa_by_id(&self, id: MpaId) -> Result<Mpa, ServiceError>;
}
