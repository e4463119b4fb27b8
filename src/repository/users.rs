//! Account methods on Repository. Accounts always live in the local store.

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::RegisteredUser,
};

const USERS_KEY: &str = "Users";

impl Repository {
    pub async fn users_list(&self) -> AppResult<Vec<RegisteredUser>> {
        Ok(self.local().read_blob(USERS_KEY).await?.unwrap_or_default())
    }

    /// Find an account by exact (case-sensitive) username
    pub async fn users_find(&self, username: &str) -> AppResult<Option<RegisteredUser>> {
        Ok(self
            .users_list()
            .await?
            .into_iter()
            .find(|u| u.username == username))
    }

    /// Add an account. Fails with Conflict when the username is taken.
    pub async fn users_create(&self, user: RegisteredUser) -> AppResult<()> {
        self.local()
            .modify(USERS_KEY, Vec::new, |users: &mut Vec<RegisteredUser>| {
                if users.iter().any(|u| u.username == user.username) {
                    return Err(AppError::Conflict(format!(
                        "Username {} is already registered",
                        user.username
                    )));
                }
                users.push(user);
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        models::Role,
        repository::{LocalStore, SettingsStore},
    };

    async fn repository(dir: &tempfile::TempDir) -> Repository {
        let local = Arc::new(LocalStore::open(dir.path()).await.unwrap());
        let settings = SettingsStore::load(local.clone(), None).await.unwrap();
        Repository::new(local, reqwest::Client::new(), settings)
    }

    fn user(name: &str) -> RegisteredUser {
        RegisteredUser {
            username: name.into(),
            password_hash: "hash".into(),
            role: Role::Staff,
            department: None,
        }
    }

    #[tokio::test]
    async fn usernames_are_unique_and_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repository(&dir).await;

        repo.users_create(user("somchai")).await.unwrap();
        repo.users_create(user("Somchai")).await.unwrap();
        let err = repo.users_create(user("somchai")).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(repo.users_list().await.unwrap().len(), 2);
        assert!(repo.users_find("SOMCHAI").await.unwrap().is_none());
    }
}
