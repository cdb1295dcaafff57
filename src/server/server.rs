use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_model::DEFAULT_TOP_COUNT;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_mysql::*;
use crate::logger::*;
use crate::settings::Settings;
use anyhow::anyhow;
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;

/// One repository per entity, all from the same backend.
pub struct Repos {
    pub film_repo: Arc<dyn FilmRepo>,
    pub user_repo: Arc<dyn UserRepo>,
    pub genre_repo: Arc<dyn GenreRepo>,
    pub mpa_repo: Arc<dyn MpaRepo>,
}

impl Repos {
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Repos {
            film_repo: Arc::new(MemoryFilmRepo::new(store.clone())),
            user_repo: Arc::new(MemoryUserRepo::new(store.clone())),
            genre_repo: Arc::new(MemoryGenreRepo::new(store.clone())),
            mpa_repo: Arc::new(MemoryMpaRepo::new(store)),
        }
    }

    pub fn mysql(pool: MySqlPool) -> Self {
        Repos {
            film_repo: Arc::new(MySqlFilmRepo::new(pool.clone())),
            user_repo: Arc::new(MySqlUserRepo::new(pool.clone())),
            genre_repo: Arc::new(MySqlGenreRepo::new(pool.clone())),
            mpa_repo: Arc::new(MySqlMpaRepo::new(pool)),
        }
    }
}

pub struct Server {
    pub film_service: Arc<dyn FilmService>,
    pub user_service: Arc<dyn UserService>,
    pub lookup_service: Arc<dyn LookupService>,
    pool: Option<MySqlPool>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let (repos, pool) = match settings.storage.backend.as_str() {
            "memory" => (Repos::memory(Arc::new(MemoryStore::new())), None),
            "mysql" => {
                let dsn = settings
                    .storage
                    .resolved_dsn()
                    .ok_or_else(|| anyhow!("mysql backend selected but no dsn configured"))?;
                let pool = MySqlPoolOptions::new()
                    .max_connections(settings.storage.max_connections)
                    .connect(&dsn)
                    .await?;
                (Repos::mysql(pool.clone()), Some(pool))
            }
            other => return Err(anyhow!("Unknown storage backend: {}", other)),
        };

        info!(backend = %settings.storage.backend, "server started");
        Ok(Self::from_repos(repos, settings.ranking.default_count, pool))
    }

    /// Fresh in-memory catalogue with the standard lookups.
    pub fn in_memory() -> Self {
        Self::from_repos(
            Repos::memory(Arc::new(MemoryStore::new())),
            DEFAULT_TOP_COUNT,
            None,
        )
    }

    fn from_repos(repos: Repos, default_top_count: u32, pool: Option<MySqlPool>) -> Self {
        let film_service: Arc<dyn FilmService> = Arc::new(
            RealFilmService::new(
                repos.film_repo,
                repos.user_repo.clone(),
                repos.mpa_repo.clone(),
                repos.genre_repo.clone(),
            )
            .with_default_top_count(default_top_count),
        );
        let user_service: Arc<dyn UserService> = Arc::new(RealUserService::new(repos.user_repo));
        let lookup_service: Arc<dyn LookupService> =
            Arc::new(RealLookupService::new(repos.genre_repo, repos.mpa_repo));

        Self {
            film_service,
            user_service,
            lookup_service,
            pool,
        }
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");

        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
