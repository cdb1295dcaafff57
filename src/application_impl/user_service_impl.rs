use crate::application_port::{ServiceError, UserService};
use crate::domain_model::*;
use crate::domain_port::UserRepo;
use std::sync::Arc;
use tracing::{info, warn};

pub struct RealUserService {
    user_repo: Arc<dyn UserRepo>,
}

impl RealUserService {
    pub fn new(user_repo: Arc<dyn UserRepo>) -> RealUserService {
        RealUserService { user_repo }
    }

    async fn ensure_user_exists(&self, id: UserId) -> Result<(), ServiceError> {
        if !self.user_repo.exists(id).await? {
            warn!("user {id} not found");
            return Err(ServiceError::not_found(format!("user with id = {id} not found")));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserService for RealUserService {
    async fn create_user(&self, mut draft: UserDraft) -> Result<User, ServiceError> {
        draft.validate()?;

        // applied once; a later update with a blank name stores it blank
        if draft.has_blank_name() {
            draft.name = draft.login.clone();
        }

        let user = self.user_repo.save(&draft).await?;
        info!(user_id = %user.id, login = %user.login, "user created");
        Ok(user)
    }

    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<User, ServiceError> {
        draft.validate()?;

        let mut user = self.user_repo.find_by_id(id).await?.ok_or_else(|| {
            warn!("user {id} not found");
            ServiceError::not_found(format!("user with id = {id} not found"))
        })?;
        user.apply(draft);

        let user = self.user_repo.update(&user).await?;
        info!(user_id = %user.id, "user updated");
        Ok(user)
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<User, ServiceError> {
        self.user_repo.find_by_id(id).await?.ok_or_else(|| {
            warn!("user {id} not found");
            ServiceError::not_found(format!("user with id = {id} not found"))
        })
    }

    async fn get_all_users(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.user_repo.find_all().await?)
    }

    async fn add_friend(&self, user_id: UserId, friend_id: UserId) -> Result<(), ServiceError> {
        if user_id == friend_id {
            warn!(%user_id, "attempt to befriend self");
            return Err(ServiceError::bad_request("a user cannot add themselves as a friend"));
        }
        self.ensure_user_exists(user_id).await?;
        self.ensure_user_exists(friend_id).await?;

        self.user_repo.add_friend(user_id, friend_id).await?;
        info!(%user_id, %friend_id, "friend added");
        Ok(())
    }

    async fn remove_friend(
        &self,
        user_id: UserId,
        friend_id: UserId,
    ) -> Result<(), ServiceError> {
        self.ensure_user_exists(user_id).await?;
        self.ensure_user_exists(friend_id).await?;

        self.user_repo.remove_friend(user_id, friend_id).await?;
        info!(%user_id, %friend_id, "friend removed");
        Ok(())
    }

    async fn get_friends(&self, user_id: UserId) -> Result<Vec<User>, ServiceError> {
        self.ensure_user_exists(user_id).await?;
        Ok(self.user_repo.get_friends(user_id).await?)
    }

    async fn get_common_friends(&self, a: UserId, b: UserId) -> Result<Vec<User>, ServiceError> {
        self.ensure_user_exists(a).await?;
        self.ensure_user_exists(b).await?;
        Ok(self.user_repo.get_common_friends(a, b).await?)
    }
}
