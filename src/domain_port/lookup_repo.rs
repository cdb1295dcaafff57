use crate::domain_model::*;
use crate::domain_port::RepoError;

#[async_trait::async_trait]
pub trait GenreRepo: Send + Sync {
    async fn find_by_id(&self, id: GenreId) -> Result<Option<Genre>, RepoError>;

    /// Ascending by id.
    async fn find_all(&self) -> Result<Vec<Genre>, RepoError>;

    /// Every genre whose id is in `ids`, ascending by id. A result shorter than the
    /// (distinct) request means at least one id does not exist.
    async fn find_by_ids(&self, ids: &[GenreId]) -> Result<Vec<Genre>, RepoError>;
}

#[async_trait::async_trait]
pub trait MpaRepo: Send + Sync {
    async fn find_by_id(&self, id: MpaId) -> Result<Option<Mpa>, RepoError>;

    /// Ascending by id.
    async fn find_all(&self) -> Result<Vec<Mpa>, RepoError>;
}
