use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use credo_core::{
    Email, EmailChangeSide, OneTimeToken, Password, User, UserId, UserStore, UserStoreError,
};

/// In-memory user store for local development and tests.
///
/// Keeps the plaintext password alongside the record and compares directly;
/// hashing is a property of the production store.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<UserId, Record>>>,
}

#[derive(Clone)]
struct Record {
    user: User,
    password: Password,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, user: User, password: Password) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|r| r.user.email() == user.email()) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.insert(user.id(), Record { user, password });
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .get(id)
            .map(|r| r.user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|r| r.user.email() == email)
            .map(|r| r.user.clone()))
    }

    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        let record = users
            .values()
            .find(|r| r.user.email() == email)
            .ok_or(UserStoreError::UserNotFound)?;

        if &record.password != password {
            return Err(UserStoreError::IncorrectPassword);
        }

        Ok(record.user.clone())
    }

    async fn set_password(
        &self,
        id: &UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let record = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        record.password = new_password;
        Ok(())
    }

    async fn set_name(&self, id: &UserId, name: String) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let record = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        record.user.set_name(name);
        Ok(record.user.clone())
    }

    async fn mark_email_confirmed(
        &self,
        id: &UserId,
        at: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let record = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        record.user.mark_confirmed(at);
        Ok(())
    }

    async fn begin_email_change(
        &self,
        id: &UserId,
        new_email: Email,
        old_token: OneTimeToken,
        new_token: OneTimeToken,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let record = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        record.user.begin_email_change(new_email, old_token, new_token);
        Ok(record.user.clone())
    }

    async fn clear_email_change_token(
        &self,
        id: &UserId,
        side: EmailChangeSide,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let record = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        record.user.clear_email_change_token(side);
        Ok(record.user.clone())
    }

    async fn promote_new_email(&self, id: &UserId) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;

        // The unique-email constraint the database would enforce.
        let taken = {
            let record = users.get(id).ok_or(UserStoreError::UserNotFound)?;
            record
                .user
                .new_email()
                .map(|candidate| {
                    users
                        .values()
                        .any(|other| other.user.id() != *id && other.user.email() == candidate)
                })
                .unwrap_or(false)
        };
        if taken {
            return Err(UserStoreError::UserAlreadyExists);
        }

        let record = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        record.user.promote_new_email();
        Ok(record.user.clone())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserStoreError> {
        self.users
            .write()
            .await
            .remove(id)
            .ok_or(UserStoreError::UserNotFound)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn email(s: &str) -> Email {
        Email::try_from(Secret::from(s.to_string())).unwrap()
    }

    fn password(s: &str) -> Password {
        Password::try_from(Secret::from(s.to_string())).unwrap()
    }

    #[tokio::test]
    async fn add_and_authenticate() {
        let store = HashMapUserStore::new();
        let user = User::new("Alice", email("alice@example.com"));
        store.add_user(user.clone(), password("password123")).await.unwrap();

        let found = store
            .authenticate(&email("alice@example.com"), &password("password123"))
            .await
            .unwrap();
        assert_eq!(found.id(), user.id());

        let wrong = store
            .authenticate(&email("alice@example.com"), &password("wrong-pass"))
            .await;
        assert_eq!(wrong.unwrap_err(), UserStoreError::IncorrectPassword);
    }

    #[tokio::test]
    async fn duplicate_email_rejected() {
        let store = HashMapUserStore::new();
        store
            .add_user(User::new("Alice", email("a@example.com")), password("password123"))
            .await
            .unwrap();
        let result = store
            .add_user(User::new("Clone", email("a@example.com")), password("password456"))
            .await;
        assert_eq!(result.unwrap_err(), UserStoreError::UserAlreadyExists);
    }

    #[tokio::test]
    async fn promote_refuses_an_address_claimed_meanwhile() {
        let store = HashMapUserStore::new();
        let alice = User::new("Alice", email("alice@old.com"));
        store.add_user(alice.clone(), password("password123")).await.unwrap();

        store
            .begin_email_change(
                &alice.id(),
                email("contested@example.com"),
                OneTimeToken::generate(),
                OneTimeToken::generate(),
            )
            .await
            .unwrap();

        // Someone else registers the candidate address before promotion.
        store
            .add_user(
                User::new("Bob", email("contested@example.com")),
                password("password456"),
            )
            .await
            .unwrap();

        let result = store.promote_new_email(&alice.id()).await;
        assert_eq!(result.unwrap_err(), UserStoreError::UserAlreadyExists);
    }
}
