use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    email::Email, email_change::EmailChangeSide, one_time_token::OneTimeToken, password::Password,
    user::User, user_id::UserId,
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserAlreadyExists, Self::UserAlreadyExists) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::IncorrectPassword, Self::IncorrectPassword) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Persistent user records.
///
/// Mutations are one explicit method per field group rather than a generic
/// patch, so each store can make the write a single atomic per-row
/// statement. The email-change methods return the record as persisted after
/// the update: the caller's promotion decision must be made from that
/// read-back, not from its stale copy.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn add_user(&self, user: User, password: Password) -> Result<(), UserStoreError>;
    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError>;
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError>;
    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError>;
    async fn set_password(
        &self,
        id: &UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError>;
    async fn set_name(&self, id: &UserId, name: String) -> Result<User, UserStoreError>;
    async fn mark_email_confirmed(
        &self,
        id: &UserId,
        at: DateTime<Utc>,
    ) -> Result<(), UserStoreError>;
    /// Write `new_email` and both confirmation tokens in one update,
    /// overwriting any previously pending change.
    async fn begin_email_change(
        &self,
        id: &UserId,
        new_email: Email,
        old_token: OneTimeToken,
        new_token: OneTimeToken,
    ) -> Result<User, UserStoreError>;
    /// Null out one side's token field and return the updated record.
    async fn clear_email_change_token(
        &self,
        id: &UserId,
        side: EmailChangeSide,
    ) -> Result<User, UserStoreError>;
    /// `email = new_email, new_email = NULL`. Fails with `UserAlreadyExists`
    /// if the address was claimed by another account in the meantime.
    async fn promote_new_email(&self, id: &UserId) -> Result<User, UserStoreError>;
    async fn delete_user(&self, id: &UserId) -> Result<(), UserStoreError>;
}

// TokenStore port trait and errors
#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// The class of a keyed single-use token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    EmailConfirmation,
    PasswordReset,
}

impl TokenKind {
    // Key prefixes keep the classes apart in a shared keyspace.
    pub fn key_prefix(self) -> &'static str {
        match self {
            Self::EmailConfirmation => "ce",
            Self::PasswordReset => "fp",
        }
    }
}

/// Ephemeral single-use token records: `kind:token -> user id`.
///
/// A record with a TTL must read as absent once the TTL elapses. Redemption
/// is lookup-then-remove at the caller; the store only guarantees that a
/// removed key no longer resolves.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn put(
        &self,
        kind: TokenKind,
        token: &OneTimeToken,
        user_id: UserId,
        ttl: Option<Duration>,
    ) -> Result<(), TokenStoreError>;
    async fn lookup(
        &self,
        kind: TokenKind,
        token: &OneTimeToken,
    ) -> Result<Option<UserId>, TokenStoreError>;
    async fn remove(&self, kind: TokenKind, token: &OneTimeToken)
    -> Result<(), TokenStoreError>;
}
