use crate::application_port::{LookupService, ServiceError};
use crate::domain_model::*;
use crate::domain_port::{GenreRepo, MpaRepo};
use std::sync::Arc;

pub struct RealLookupService {
    genre_repo: Arc<dyn GenreRepo>,
    mpa_repo: Arc<dyn MpaRepo>,
}

impl RealLookupService {
    pub fn new(genre_repo: Arc<dyn GenreRepo>, mpa_repo: Arc<dyn MpaRepo>) -> Self {
        Self {
            genre_repo,
            mpa_repo,
        }
    }
}

#[async_trait::async_trait]
impl LookupService for RealLookupService {
    async fn list_genres(&self) -> Result<Vec<Genre>, ServiceError> {
        Ok(self.genre_repo.find_all().await?)
    }

    async fn get_genre_by_id(&self, id: GenreId) -> Result<Genre, ServiceError> {
        self.genre_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("genre with id = {id} not found")))
    }

    async fn list_mpa(&self) -> Result<Vec<Mpa>, ServiceError> {
        Ok(self.mpa_repo.find_all().await?)
    }

    async fn get_mpa_by_id(&self, id: MpaId) -> Result<Mpa, ServiceError> {
        self.mpa_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("mpa rating with id = {id} not found")))
    }
}
