use crate::application_port::ServiceError;
use crate::domain_model::*;

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    async fn create_user(&self, draft: UserDraft) -> Result<User, ServiceError>;
    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<User, ServiceError>;
    async fn get_user_by_id(&self, id: UserId) -> Result<User, ServiceError>;
    async fn get_all_users(&self) -> Result<Vec<User>, ServiceError>;
    async fn add_friend(&self, user_id: UserId, friend_id: UserId) -> Result<(), ServiceError>;
    async fn remove_friend(&self, user_id: UserId, friend_id: UserId)
    -> Result<(), ServiceError>;
    async fn get_friends(&self, user_id: UserId) -> Result<Vec<User>, ServiceError>;
    async fn get_common_friends(&self, a: UserId, b: UserId) -> Result<Vec<User>, ServiceError>;
}
