#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{entity} with id = {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("store error: {0}")]
    Store(String),
}

impl RepoError {
    pub fn not_found(entity: &'static str, id: impl Into<i64>) -> Self {
        RepoError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        RepoError::Store(e.to_string())
    }
}
