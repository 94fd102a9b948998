use chrono::{DateTime, Utc};

use super::email::Email;
use super::email_change::EmailChangeSide;
use super::one_time_token::OneTimeToken;
use super::user_id::UserId;

/// A user account as the account protocols see it.
///
/// The stored credential is deliberately absent: hashing and verification
/// live behind the [`UserStore`](crate::ports::repositories::UserStore)
/// port.
///
/// A pending email change exists exactly while `new_email` is set. Each of
/// the two token fields is cleared independently when its side confirms;
/// once both are cleared the store promotes `new_email` into `email`.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    name: String,
    email: Email,
    new_email: Option<Email>,
    old_email_token: Option<OneTimeToken>,
    new_email_token: Option<OneTimeToken>,
    confirmed_at: Option<DateTime<Utc>>,
}

impl User {
    /// A freshly registered account: unconfirmed, no pending email change.
    pub fn new(name: impl Into<String>, email: Email) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email,
            new_email: None,
            old_email_token: None,
            new_email_token: None,
            confirmed_at: None,
        }
    }

    /// Reassemble a persisted record. Store implementations only.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: UserId,
        name: String,
        email: Email,
        new_email: Option<Email>,
        old_email_token: Option<OneTimeToken>,
        new_email_token: Option<OneTimeToken>,
        confirmed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            new_email,
            old_email_token,
            new_email_token,
            confirmed_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn new_email(&self) -> Option<&Email> {
        self.new_email.as_ref()
    }

    pub fn email_change_token(&self, side: EmailChangeSide) -> Option<&OneTimeToken> {
        match side {
            EmailChangeSide::Old => self.old_email_token.as_ref(),
            EmailChangeSide::New => self.new_email_token.as_ref(),
        }
    }

    pub fn confirmed_at(&self) -> Option<DateTime<Utc>> {
        self.confirmed_at
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed_at.is_some()
    }

    pub fn has_pending_email_change(&self) -> bool {
        self.new_email.is_some()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn mark_confirmed(&mut self, at: DateTime<Utc>) {
        self.confirmed_at = Some(at);
    }

    /// Replace any pending change with a fresh one. Prior tokens become
    /// unredeemable because the fields they were compared against are gone.
    pub fn begin_email_change(
        &mut self,
        new_email: Email,
        old_token: OneTimeToken,
        new_token: OneTimeToken,
    ) {
        self.new_email = Some(new_email);
        self.old_email_token = Some(old_token);
        self.new_email_token = Some(new_token);
    }

    pub fn clear_email_change_token(&mut self, side: EmailChangeSide) {
        match side {
            EmailChangeSide::Old => self.old_email_token = None,
            EmailChangeSide::New => self.new_email_token = None,
        }
    }

    /// Terminal step of the email-change protocol: the candidate address
    /// becomes the confirmed address. No-op when no change is pending.
    pub fn promote_new_email(&mut self) {
        if let Some(new_email) = self.new_email.take() {
            self.email = new_email;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn email(s: &str) -> Email {
        Email::try_from(Secret::from(s.to_string())).unwrap()
    }

    #[test]
    fn new_user_is_unconfirmed_with_no_pending_change() {
        let user = User::new("Alice", email("alice@example.com"));
        assert!(!user.is_confirmed());
        assert!(!user.has_pending_email_change());
        assert!(user.email_change_token(EmailChangeSide::Old).is_none());
        assert!(user.email_change_token(EmailChangeSide::New).is_none());
    }

    #[test]
    fn promote_swaps_in_the_candidate_address() {
        let mut user = User::new("Alice", email("alice@old.com"));
        user.begin_email_change(
            email("alice@new.com"),
            OneTimeToken::generate(),
            OneTimeToken::generate(),
        );
        user.clear_email_change_token(EmailChangeSide::Old);
        user.clear_email_change_token(EmailChangeSide::New);
        user.promote_new_email();

        assert_eq!(user.email(), &email("alice@new.com"));
        assert!(!user.has_pending_email_change());
    }

    #[test]
    fn promote_without_pending_change_is_a_noop() {
        let mut user = User::new("Alice", email("alice@example.com"));
        user.promote_new_email();
        assert_eq!(user.email(), &email("alice@example.com"));
    }

    #[test]
    fn clearing_one_side_leaves_the_other() {
        let mut user = User::new("Alice", email("alice@old.com"));
        let old_token = OneTimeToken::generate();
        let new_token = OneTimeToken::generate();
        user.begin_email_change(email("alice@new.com"), old_token, new_token.clone());

        user.clear_email_change_token(EmailChangeSide::Old);
        assert!(user.email_change_token(EmailChangeSide::Old).is_none());
        assert_eq!(user.email_change_token(EmailChangeSide::New), Some(&new_token));
        assert!(user.has_pending_email_change());
    }
}
