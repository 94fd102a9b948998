//! In-memory collaborators for use-case tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

use credo_core::{
    Email, EmailChangeSide, EmailClient, OneTimeToken, Password, TokenKind, TokenStore,
    TokenStoreError, User, UserId, UserStore, UserStoreError,
};

pub fn email(s: &str) -> Email {
    Email::try_from(Secret::from(s.to_string())).unwrap()
}

pub fn password(s: &str) -> Password {
    Password::try_from(Secret::from(s.to_string())).unwrap()
}

/// Pull the token out of a confirmation link in a mail body.
pub fn token_in(body: &str) -> OneTimeToken {
    let tail = body.split("token=").nth(1).expect("no token link in mail body");
    let token: String = tail
        .chars()
        .take_while(|c| c.is_ascii_hexdigit() || *c == '-')
        .collect();
    OneTimeToken::from(token)
}

#[derive(Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<UserId, (User, Password)>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, user: User, password: Password) {
        self.users.write().await.insert(user.id(), (user, password));
    }

    pub async fn get(&self, id: &UserId) -> User {
        self.users.read().await.get(id).expect("user not seeded").0.clone()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn add_user(&self, user: User, password: Password) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|(u, _)| u.email() == user.email()) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.insert(user.id(), (user, password));
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .get(id)
            .map(|(u, _)| u.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|(u, _)| u.email() == email)
            .map(|(u, _)| u.clone()))
    }

    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        let (user, stored) = users
            .values()
            .find(|(u, _)| u.email() == email)
            .ok_or(UserStoreError::UserNotFound)?;
        if stored != password {
            return Err(UserStoreError::IncorrectPassword);
        }
        Ok(user.clone())
    }

    async fn set_password(
        &self,
        id: &UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let entry = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        entry.1 = new_password;
        Ok(())
    }

    async fn set_name(&self, id: &UserId, name: String) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let entry = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        entry.0.set_name(name);
        Ok(entry.0.clone())
    }

    async fn mark_email_confirmed(
        &self,
        id: &UserId,
        at: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let entry = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        entry.0.mark_confirmed(at);
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
        let entry = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        entry.0.begin_email_change(new_email, old_token, new_token);
        Ok(entry.0.clone())
    }

    async fn clear_email_change_token(
        &self,
        id: &UserId,
        side: EmailChangeSide,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let entry = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        entry.0.clear_email_change_token(side);
        Ok(entry.0.clone())
    }

    async fn promote_new_email(&self, id: &UserId) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let taken = {
            let (user, _) = users.get(id).ok_or(UserStoreError::UserNotFound)?;
            user.new_email()
                .map(|candidate| {
                    users
                        .values()
                        .any(|(other, _)| other.id() != *id && other.email() == candidate)
                })
                .unwrap_or(false)
        };
        if taken {
            return Err(UserStoreError::UserAlreadyExists);
        }
        let entry = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        entry.0.promote_new_email();
        Ok(entry.0.clone())
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

#[derive(Default, Clone)]
pub struct InMemoryTokenStore {
    records: Arc<RwLock<HashMap<String, (UserId, Option<Duration>)>>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(kind: TokenKind, token: &OneTimeToken) -> String {
        format!("{}:{}", kind.key_prefix(), token.as_str())
    }

    /// The TTL the token was stored with, if the token is present.
    pub async fn ttl_of(&self, kind: TokenKind, token: &OneTimeToken) -> Option<Option<Duration>> {
        self.records
            .read()
            .await
            .get(&Self::key(kind, token))
            .map(|(_, ttl)| *ttl)
    }

    pub async fn count(&self, kind: TokenKind) -> usize {
        let prefix = format!("{}:", kind.key_prefix());
        self.records
            .read()
            .await
            .keys()
            .filter(|k| k.starts_with(&prefix))
            .count()
    }

    /// Simulate TTL expiry: the key stops resolving.
    pub async fn expire(&self, kind: TokenKind, token: &OneTimeToken) {
        self.records.write().await.remove(&Self::key(kind, token));
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn put(
        &self,
        kind: TokenKind,
        token: &OneTimeToken,
        user_id: UserId,
        ttl: Option<Duration>,
    ) -> Result<(), TokenStoreError> {
        self.records
            .write()
            .await
            .insert(Self::key(kind, token), (user_id, ttl));
        Ok(())
    }

    async fn lookup(
        &self,
        kind: TokenKind,
        token: &OneTimeToken,
    ) -> Result<Option<UserId>, TokenStoreError> {
        Ok(self
            .records
            .read()
            .await
            .get(&Self::key(kind, token))
            .map(|(id, _)| *id))
    }

    async fn remove(
        &self,
        kind: TokenKind,
        token: &OneTimeToken,
    ) -> Result<(), TokenStoreError> {
        self.records.write().await.remove(&Self::key(kind, token));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SentMail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

#[derive(Default, Clone)]
pub struct RecordingEmailClient {
    outbox: Arc<RwLock<Vec<SentMail>>>,
    fail: bool,
}

impl RecordingEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose every send fails, for delivery-failure paths.
    pub fn failing() -> Self {
        Self {
            outbox: Arc::default(),
            fail: true,
        }
    }

    pub async fn sent(&self) -> Vec<SentMail> {
        self.outbox.read().await.clone()
    }
}

#[async_trait]
impl EmailClient for RecordingEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        if self.fail {
            return Err("mail transport unavailable".to_string());
        }
        self.outbox.write().await.push(SentMail {
            recipient: recipient.as_ref().expose_secret().clone(),
            subject: subject.to_string(),
            body: content.to_string(),
        });
        Ok(())
    }
}
