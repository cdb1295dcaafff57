use super::rows::{UserAssembler, UserJoinRow};
use super::util::is_dup_key;
use crate::domain_model::*;
use crate::domain_port::*;
use futures_util::TryStreamExt;
use sqlx::MySqlPool;
use std::collections::HashSet;
use tracing::debug;

// first placeholder is always the friendship status used for hydration
const USER_ROWS: &str = r#"
SELECT u.id, u.email, u.login, u.name, u.birthday, fo.friend_id
FROM users u
LEFT JOIN friendships fo ON fo.user_id = u.id AND fo.status = ?
"#;

const CONFIRMED: FriendshipStatus = FriendshipStatus::Confirmed;

pub struct MySqlUserRepo {
    pool: MySqlPool,
}

impl MySqlUserRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlUserRepo { pool }
    }

    async fn assemble(
        &self,
        query: sqlx::query::QueryAs<'_, sqlx::MySql, UserJoinRow, sqlx::mysql::MySqlArguments>,
    ) -> Result<Vec<User>, RepoError> {
        let mut rows = query.fetch(&self.pool);
        let mut assembler = UserAssembler::default();
        while let Some(row) = rows
            .try_next()
            .await
            .map_err(|e| RepoError::Store(format!("fetch user rows: {e}")))?
        {
            assembler.push(row);
        }
        Ok(assembler.finish())
    }
}

#[async_trait::async_trait]
impl UserRepo for MySqlUserRepo {
    async fn save(&self, draft: &UserDraft) -> Result<User, RepoError> {
        let res = sqlx::query(
            r#"
INSERT INTO users (email, login, name, birthday)
VALUES (?, ?, ?, ?)
"#,
        )
        .bind(&draft.email)
        .bind(&draft.login)
        .bind(&draft.name)
        .bind(draft.birthday)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Store(format!("insert user: {e}")))?;

        let user = User {
            id: UserId(res.last_insert_id() as i64),
            email: draft.email.clone(),
            login: draft.login.clone(),
            name: draft.name.clone(),
            birthday: draft.birthday,
            friends: HashSet::new(),
        };

        debug!("user saved: {:?}", user);
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, RepoError> {
        let res = sqlx::query(
            r#"
UPDATE users SET email = ?, login = ?, name = ?, birthday = ?
WHERE id = ?
"#,
        )
        .bind(&user.email)
        .bind(&user.login)
        .bind(&user.name)
        .bind(user.birthday)
        .bind(user.id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Store(format!("update user: {e}")))?;

        if res.rows_affected() == 0 && !self.exists(user.id).await? {
            return Err(RepoError::not_found("user", user.id.0));
        }

        debug!("user {} updated", user.id);
        self.find_by_id(user.id)
            .await?
            .ok_or_else(|| RepoError::not_found("user", user.id.0))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError> {
        let sql = format!("{USER_ROWS} WHERE u.id = ?");
        let users = self
            .assemble(
                sqlx::query_as::<_, UserJoinRow>(&sql)
                    .bind(CONFIRMED.as_str())
                    .bind(id),
            )
            .await?;
        Ok(users.into_iter().next())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        let sql = format!("{USER_ROWS} ORDER BY u.id");
        self.assemble(sqlx::query_as::<_, UserJoinRow>(&sql).bind(CONFIRMED.as_str()))
            .await
    }

    async fn exists(&self, id: UserId) -> Result<bool, RepoError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::Store(format!("user exists: {e}")))?;

        Ok(count > 0)
    }

    async fn add_friend(&self, user_id: UserId, friend_id: UserId) -> Result<(), RepoError> {
        let res = sqlx::query(
            "INSERT INTO friendships (user_id, friend_id, status) VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(friend_id)
        .bind(CONFIRMED.as_str())
        .execute(&self.pool)
        .await;

        match res {
            Ok(_) => {}
            Err(e) if is_dup_key(&e) => {
                sqlx::query("UPDATE friendships SET status = ? WHERE user_id = ? AND friend_id = ?")
                    .bind(CONFIRMED.as_str())
                    .bind(user_id)
                    .bind(friend_id)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| RepoError::Store(format!("confirm friendship: {e}")))?;
            }
            Err(e) => return Err(RepoError::Store(format!("insert friendship: {e}"))),
        }

        debug!("friend edge added: {} -> {}", user_id, friend_id);
        Ok(())
    }

    async fn remove_friend(&self, user_id: UserId, friend_id: UserId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM friendships WHERE user_id = ? AND friend_id = ?")
            .bind(user_id)
            .bind(friend_id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Store(format!("delete friendship: {e}")))?;

        debug!("friend edge removed: {} -> {}", user_id, friend_id);
        Ok(())
    }

    async fn get_friends(&self, user_id: UserId) -> Result<Vec<User>, RepoError> {
        let sql = format!(
            r#"
{USER_ROWS}
WHERE u.id IN (
    SELECT f.friend_id FROM friendships f
    WHERE f.user_id = ? AND f.status = ?
)
ORDER BY u.id
"#
        );
        self.assemble(
            sqlx::query_as::<_, UserJoinRow>(&sql)
                .bind(CONFIRMED.as_str())
                .bind(user_id)
                .bind(CONFIRMED.as_str()),
        )
        .await
    }

    async fn get_common_friends(&self, a: UserId, b: UserId) -> Result<Vec<User>, RepoError> {
        let sql = format!(
            r#"
{USER_ROWS}
WHERE u.id IN (
    SELECT f1.friend_id FROM friendships f1
    JOIN friendships f2 ON f2.friend_id = f1.friend_id
    WHERE f1.user_id = ? AND f2.user_id = ?
      AND f1.status = ? AND f2.status = ?
)
ORDER BY u.id
"#
        );
        self.assemble(
            sqlx::query_as::<_, UserJoinRow>(&sql)
                .bind(CONFIRMED.as_str())
                .bind(a)
                .bind(b)
                .bind(CONFIRMED.as_str())
                .bind(CONFIRMED.as_str()),
        )
        .await
    }
}
