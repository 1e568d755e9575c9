use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use almanac_core::domain::{NewUser, User};
use almanac_core::error::RepoError;
use almanac_core::ports::{BaseRepository, UserRepository};

use super::Table;

/// In-memory user store.
pub struct InMemoryUserRepository {
    store: RwLock<Table<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Table::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<User, i32> for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.rows.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        let row = store.rows.get_mut(&user.id).ok_or(RepoError::NotFound)?;
        *row = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.rows.values().find(|u| u.login == login).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        if store.rows.values().any(|u| u.login == new_user.login) {
            return Err(RepoError::Constraint(format!(
                "login '{}' is already taken",
                new_user.login
            )));
        }

        let now = Utc::now();
        Ok(store.insert_with(|id| User {
            id,
            login: new_user.login,
            password_hash: new_user.password_hash,
            city: new_user.city,
            roles: new_user.roles,
            created_at: now,
            updated_at: now,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_duplicate_login_is_rejected() {
        let repo = InMemoryUserRepository::new();
        let alice = NewUser::new("alice".into(), "hash".into(), "Paris".into());

        repo.create(alice.clone()).await.unwrap();
        let result = repo.create(alice).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_save_updates_city() {
        let repo = InMemoryUserRepository::new();
        let mut user = repo
            .create(NewUser::new("bob".into(), "hash".into(), "Paris".into()))
            .await
            .unwrap();

        user.relocate("Kyiv");
        repo.save(user.clone()).await.unwrap();

        let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.city, "Kyiv");
        assert_eq!(repo.find_by_login("bob").await.unwrap().unwrap().id, user.id);
    }
}
