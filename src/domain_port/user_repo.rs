use crate::domain_model::*;
use crate::domain_port::RepoError;

#[async_trait::async_trait]
pub trait UserRepo: Send + Sync {
    /// Stores the draft as given; name fallback is the caller's business.
    async fn save(&self, draft: &UserDraft) -> Result<User, RepoError>;

    /// Overwrites scalars. `RepoError::NotFound` when the id is absent.
    async fn update(&self, user: &User) -> Result<User, RepoError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError>;

    async fn find_all(&self) -> Result<Vec<User>, RepoError>;

    async fn exists(&self, id: UserId) -> Result<bool, RepoError>;

    /// Inserts or overwrites the single directed CONFIRMED edge `user_id -> friend_id`.
    /// The reverse edge is never created.
    async fn add_friend(&self, user_id: UserId, friend_id: UserId) -> Result<(), RepoError>;

    /// Deletes only the directed edge `user_id -> friend_id`, if present.
    async fn remove_friend(&self, user_id: UserId, friend_id: UserId) -> Result<(), RepoError>;

    /// Targets of the user's CONFIRMED outgoing edges, ascending by id.
    async fn get_friends(&self, user_id: UserId) -> Result<Vec<User>, RepoError>;

    /// Users that are CONFIRMED outgoing targets of both `a` and `b`, ascending by id.
    async fn get_common_friends(&self, a: UserId, b: UserId) -> Result<Vec<User>, RepoError>;
}
