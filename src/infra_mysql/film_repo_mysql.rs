use super::rows::{FilmAssembler, FilmJoinRow};
use super::util::is_dup_key;
use crate::domain_model::*;
use crate::domain_port::*;
use futures_util::TryStreamExt;
use sqlx::mysql::MySqlArguments;
use sqlx::query::QueryAs;
use sqlx::{MySql, MySqlConnection, MySqlPool, QueryBuilder};
use tracing::debug;

const FILM_COLUMNS: &str = r#"
SELECT
    f.id, f.name, f.description, f.release_date, f.duration,
    m.id          AS mpa_id,
    m.name        AS mpa_name,
    m.description AS mpa_description,
    g.id          AS genre_id,
    g.name        AS genre_name,
    g.description AS genre_description,
    fl.user_id    AS like_user_id
"#;

const FILM_LINKS: &str = r#"
LEFT JOIN mpa_ratings m ON m.id = f.mpa_rating_id
LEFT JOIN film_genres fg ON fg.film_id = f.id
LEFT JOIN genres g ON g.id = fg.genre_id
LEFT JOIN film_likes fl ON fl.film_id = f.id
"#;

pub struct MySqlFilmRepo {
    pool: MySqlPool,
}

impl MySqlFilmRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn assemble(
        &self,
        query: QueryAs<'_, MySql, FilmJoinRow, MySqlArguments>,
    ) -> Result<Vec<Film>, RepoError> {
        let mut rows = query.fetch(&self.pool);
        let mut assembler = FilmAssembler::default();
        while let Some(row) = rows
            .try_next()
            .await
            .map_err(|e| RepoError::Store(format!("fetch film rows: {e}")))?
        {
            assembler.push(row);
        }
        Ok(assembler.finish())
    }

    async fn load(&self, id: FilmId) -> Result<Film, RepoError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::not_found("film", id.0))
    }
}

async fn insert_genres(
    conn: &mut MySqlConnection,
    film_id: FilmId,
    genre_ids: &[GenreId],
) -> Result<(), RepoError> {
    if genre_ids.is_empty() {
        return Ok(());
    }

    let mut builder = QueryBuilder::<MySql>::new("INSERT IGNORE INTO film_genres (film_id, genre_id) ");
    builder.push_values(genre_ids, |mut b, genre_id| {
        b.push_bind(film_id).push_bind(*genre_id);
    });
    builder
        .build()
        .execute(conn)
        .await
        .map_err(|e| RepoError::Store(format!("insert film genres: {e}")))?;

    Ok(())
}

#[async_trait::async_trait]
impl FilmRepo for MySqlFilmRepo {
    async fn save(&self, draft: &FilmDraft) -> Result<Film, RepoError> {
        // film row and genre links commit together or not at all
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::Store(format!("begin: {e}")))?;

        let res = sqlx::query(
            r#"
INSERT INTO films (name, description, release_date, duration, mpa_rating_id)
VALUES (?, ?, ?, ?, ?)
"#,
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.release_date)
        .bind(draft.duration)
        .bind(draft.mpa)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepoError::Store(format!("insert film: {e}")))?;

        let id = FilmId(res.last_insert_id() as i64);
        insert_genres(&mut tx, id, &draft.genres).await?;

        tx.commit()
            .await
            .map_err(|e| RepoError::Store(format!("commit film insert: {e}")))?;

        debug!("film saved: id={} name={}", id, draft.name);
        self.load(id).await
    }

    async fn update(&self, film: &Film) -> Result<Film, RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::Store(format!("begin: {e}")))?;

        let res = sqlx::query(
            r#"
UPDATE films
SET name = ?, description = ?, release_date = ?, duration = ?, mpa_rating_id = ?
WHERE id = ?
"#,
        )
        .bind(&film.name)
        .bind(&film.description)
        .bind(film.release_date)
        .bind(film.duration)
        .bind(film.mpa_id())
        .bind(film.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepoError::Store(format!("update film: {e}")))?;

        // unchanged rows may also report zero; only a missing row is NotFound
        if res.rows_affected() == 0 {
            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM films WHERE id = ?")
                .bind(film.id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| RepoError::Store(format!("probe film: {e}")))?;
            if count == 0 {
                return Err(RepoError::not_found("film", film.id.0));
            }
        }

        sqlx::query("DELETE FROM film_genres WHERE film_id = ?")
            .bind(film.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::Store(format!("clear film genres: {e}")))?;
        insert_genres(&mut tx, film.id, &film.genre_ids()).await?;

        tx.commit()
            .await
            .map_err(|e| RepoError::Store(format!("commit film update: {e}")))?;

        debug!("film {} updated", film.id);
        self.load(film.id).await
    }

    async fn find_by_id(&self, id: FilmId) -> Result<Option<Film>, RepoError> {
        let sql = format!("{FILM_COLUMNS} FROM films f {FILM_LINKS} WHERE f.id = ? ORDER BY g.id");
        let films = self
            .assemble(sqlx::query_as::<_, FilmJoinRow>(&sql).bind(id))
            .await?;
        Ok(films.into_iter().next())
    }

    async fn find_all(&self) -> Result<Vec<Film>, RepoError> {
        let sql = format!("{FILM_COLUMNS} FROM films f {FILM_LINKS} ORDER BY f.id, g.id");
        self.assemble(sqlx::query_as::<_, FilmJoinRow>(&sql)).await
    }

    async fn exists(&self, id: FilmId) -> Result<bool, RepoError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM films WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::Store(format!("film exists: {e}")))?;

        Ok(count > 0)
    }

    async fn add_like(&self, film_id: FilmId, user_id: UserId) -> Result<(), RepoError> {
        let res = sqlx::query("INSERT INTO film_likes (film_id, user_id) VALUES (?, ?)")
            .bind(film_id)
            .bind(user_id)
            .execute(&self.pool)
            .await;

        match res {
            Ok(_) => {
                debug!("like added: film={} user={}", film_id, user_id);
                Ok(())
            }
            Err(e) if is_dup_key(&e) => Ok(()),
            Err(e) => Err(RepoError::Store(format!("insert like: {e}"))),
        }
    }

    async fn remove_like(&self, film_id: FilmId, user_id: UserId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM film_likes WHERE film_id = ? AND user_id = ?")
            .bind(film_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Store(format!("delete like: {e}")))?;

        debug!("like removed: film={} user={}", film_id, user_id);
        Ok(())
    }

    async fn find_most_popular(&self, count: TopCount) -> Result<Vec<Film>, RepoError> {
        // rank and limit on films first so the join fan-out cannot eat into the limit
        let sql = format!(
            r#"
{FILM_COLUMNS}
FROM (
    SELECT f.id AS film_id, COUNT(fl.user_id) AS likes_count
    FROM films f
    LEFT JOIN film_likes fl ON fl.film_id = f.id
    GROUP BY f.id
    ORDER BY likes_count DESC, f.id ASC
    LIMIT ?
) ranked
JOIN films f ON f.id = ranked.film_id
{FILM_LINKS}
ORDER BY ranked.likes_count DESC, f.id ASC, g.id ASC
"#
        );
        self.assemble(sqlx::query_as::<_, FilmJoinRow>(&sql).bind(count.0 as i64))
            .await
    }
}
