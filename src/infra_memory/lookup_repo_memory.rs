use super::store::MemoryStore;
use crate::domain_model::*;
use crate::domain_port::*;
use std::sync::Arc;

pub struct MemoryGenreRepo {
    store: Arc<MemoryStore>,
}

impl MemoryGenreRepo {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        MemoryGenreRepo { store }
    }
}

#[async_trait::async_trait]
impl GenreRepo for MemoryGenreRepo {
    async fn find_by_id(&self, id: GenreId) -> Result<Option<Genre>, RepoError> {
        Ok(self.store.genres.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Genre>, RepoError> {
        Ok(self.store.genres.values().cloned().collect())
    }

    async fn find_by_ids(&self, ids: &[GenreId]) -> Result<Vec<Genre>, RepoError> {
        Ok(self
            .store
            .genres
            .values()
            .filter(|g| ids.contains(&g.id))
            .cloned()
            .collect())
    }
}

pub struct MemoryMpaRepo {
    store: Arc<MemoryStore>,
}

impl MemoryMpaRepo {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        MemoryMpaRepo { store }
    }
}

#[async_trait::async_trait]
impl MpaRepo for MemoryMpaRepo {
    async fn find_by_id(&self, id: MpaId) -> Result<Option<Mpa>, RepoError> {
        Ok(self.store.mpa.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Mpa>, RepoError> {
        Ok(self.store.mpa.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn find_by_ids_reports_short_result_for_unknown_ids() {
        let repo = MemoryGenreRepo::new(Arc::new(MemoryStore::new()));

        let found = repo.find_by_ids(&[GenreId(4), GenreId(1)]).await.unwrap();
        let ids: Vec<GenreId> = found.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![GenreId(1), GenreId(4)]);

        let found = repo.find_by_ids(&[GenreId(1), GenreId(100)]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(repo.find_by_ids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mpa_listed_in_id_order() {
        let repo = MemoryMpaRepo::new(Arc::new(MemoryStore::new()));
        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["G", "PG", "PG-13", "R", "NC-17"]);
        assert!(repo.find_by_id(MpaId(6)).await.unwrap().is_none());
    }
}
