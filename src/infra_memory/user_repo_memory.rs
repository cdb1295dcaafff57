use super::store::{MemoryStore, UserRecord};
use crate::domain_model::*;
use crate::domain_port::*;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

pub struct MemoryUserRepo {
    store: Arc<MemoryStore>,
}

impl MemoryUserRepo {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        MemoryUserRepo { store }
    }

    fn load_all(&self, ids: impl IntoIterator<Item = UserId>) -> Vec<User> {
        ids.into_iter()
            .filter_map(|id| self.store.load_user(id))
            .collect()
    }
}

#[async_trait::async_trait]
impl UserRepo for MemoryUserRepo {
    async fn save(&self, draft: &UserDraft) -> Result<User, RepoError> {
        let id = UserId(self.store.user_seq.next_id());
        let record = UserRecord {
            email: draft.email.clone(),
            login: draft.login.clone(),
            name: draft.name.clone(),
            birthday: draft.birthday,
        };
        let user = self.store.hydrate_user(id, &record);
        self.store.users.insert(id, record);

        debug!("user saved: {:?}", user);
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, RepoError> {
        let record = {
            let mut entry = self
                .store
                .users
                .get_mut(&user.id)
                .ok_or_else(|| RepoError::not_found("user", user.id.0))?;
            entry.email = user.email.clone();
            entry.login = user.login.clone();
            entry.name = user.name.clone();
            entry.birthday = user.birthday;
            entry.value().clone()
        };

        debug!("user {} updated", user.id);
        Ok(self.store.hydrate_user(user.id, &record))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError> {
        Ok(self.store.load_user(id))
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        let ids: BTreeSet<UserId> = self.store.users.iter().map(|e| *e.key()).collect();
        Ok(self.load_all(ids))
    }

    async fn exists(&self, id: UserId) -> Result<bool, RepoError> {
        Ok(self.store.users.contains_key(&id))
    }

    async fn add_friend(&self, user_id: UserId, friend_id: UserId) -> Result<(), RepoError> {
        for id in [user_id, friend_id] {
            if !self.store.users.contains_key(&id) {
                return Err(RepoError::not_found("user", id.0));
            }
        }

        self.store
            .friendships
            .entry(user_id)
            .or_default()
            .entry(friend_id)
            .and_modify(|edge| edge.status = FriendshipStatus::Confirmed)
            .or_insert_with(|| Friendship::confirmed(user_id, friend_id));

        debug!("friend edge added: {} -> {}", user_id, friend_id);
        Ok(())
    }

    async fn remove_friend(&self, user_id: UserId, friend_id: UserId) -> Result<(), RepoError> {
        if let Some(mut edges) = self.store.friendships.get_mut(&user_id) {
            edges.remove(&friend_id);
        }

        debug!("friend edge removed: {} -> {}", user_id, friend_id);
        Ok(())
    }

    async fn get_friends(&self, user_id: UserId) -> Result<Vec<User>, RepoError> {
        let targets = self.store.confirmed_targets(user_id);
        Ok(self.load_all(targets))
    }

    async fn get_common_friends(&self, a: UserId, b: UserId) -> Result<Vec<User>, RepoError> {
        let of_a: BTreeSet<UserId> = self.store.confirmed_targets(a).into_iter().collect();
        let of_b: BTreeSet<UserId> = self.store.confirmed_targets(b).into_iter().collect();
        Ok(self.load_all(of_a.intersection(&of_b).copied()))
    }
}
