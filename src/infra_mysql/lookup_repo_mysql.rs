use super::util::placeholders;
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::MySqlPool;

pub struct MySqlGenreRepo {
    pool: MySqlPool,
}

impl MySqlGenreRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl GenreRepo for MySqlGenreRepo {
    async fn find_by_id(&self, id: GenreId) -> Result<Option<Genre>, RepoError> {
        sqlx::query_as::<_, Genre>("SELECT id, name, description FROM genres WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::Store(format!("select genre {id}: {e}")))
    }

    async fn find_all(&self) -> Result<Vec<Genre>, RepoError> {
        sqlx::query_as::<_, Genre>("SELECT id, name, description FROM genres ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Store(format!("select genres: {e}")))
    }

    async fn find_by_ids(&self, ids: &[GenreId]) -> Result<Vec<Genre>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT id, name, description FROM genres WHERE id IN ({}) ORDER BY id",
            placeholders(ids.len())
        );
        let mut query = sqlx::query_as::<_, Genre>(&sql);
        for id in ids {
            query = query.bind(*id);
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Store(format!("select genres by ids: {e}")))
    }
}

pub struct MySqlMpaRepo {
    pool: MySqlPool,
}

impl MySqlMpaRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl MpaRepo for MySqlMpaRepo {
    async fn find_by_id(&self, id: MpaId) -> Result<Option<Mpa>, RepoError> {
        sqlx::query_as::<_, Mpa>("SELECT id, name, description FROM mpa_ratings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::Store(format!("select mpa {id}: {e}")))
    }

    async fn find_all(&self) -> Result<Vec<Mpa>, RepoError> {
        sqlx::query_as::<_, Mpa>("SELECT id, name, description FROM mpa_ratings ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Store(format!("select mpa ratings: {e}")))
    }
}
