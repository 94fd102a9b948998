use credo_core::{
    Email, EmailChangeOutcome, EmailChangeSide, EmailClient, OneTimeToken, User, UserStore,
    UserStoreError,
};

use crate::mail::MailScheme;

/// Error types for the email change service
#[derive(Debug, thiserror::Error)]
pub enum EmailChangeError {
    #[error("Invalid token provided")]
    InvalidToken,
    #[error("Email already exists")]
    EmailAlreadyExists,
    #[error("User store error: {0}")]
    UserStore(#[from] UserStoreError),
    #[error("Failed to send email: {0}")]
    Email(String),
}

/// Orchestrates changing a confirmed account's email address.
///
/// The change requires proof of control over both addresses: one token goes
/// to the current address, one to the candidate. Either side may confirm
/// first; the address flips only after the second confirmation, decided
/// from the record as persisted after each token clear. The tokens live on
/// the user row itself, so re-initiating replaces them and strands any
/// links from the previous attempt.
pub struct EmailChangeService<U, E>
where
    U: UserStore,
    E: EmailClient,
{
    user_store: U,
    email_client: E,
    mail: MailScheme,
}

impl<U, E> EmailChangeService<U, E>
where
    U: UserStore,
    E: EmailClient,
{
    pub fn new(user_store: U, email_client: E, mail: MailScheme) -> Self {
        Self {
            user_store,
            email_client,
            mail,
        }
    }

    /// Start (or restart) an email change to `new_email`.
    ///
    /// Changing to the address already on the account is a no-op, not an
    /// error: nothing is issued and nothing is sent.
    #[tracing::instrument(name = "EmailChangeService::initiate", skip_all)]
    pub async fn initiate(&self, user: &User, new_email: Email) -> Result<(), EmailChangeError> {
        if new_email == *user.email() {
            return Ok(());
        }

        if self.user_store.find_by_email(&new_email).await?.is_some() {
            return Err(EmailChangeError::EmailAlreadyExists);
        }

        let old_token = OneTimeToken::generate();
        let new_token = OneTimeToken::generate();

        self.user_store
            .begin_email_change(
                &user.id(),
                new_email.clone(),
                old_token.clone(),
                new_token.clone(),
            )
            .await?;

        let content =
            self.mail
                .email_change_confirmation(user.name(), &old_token, EmailChangeSide::Old);
        self.email_client
            .send_email(user.email(), content.subject, &content.body)
            .await
            .map_err(EmailChangeError::Email)?;

        let content =
            self.mail
                .email_change_confirmation(user.name(), &new_token, EmailChangeSide::New);
        self.email_client
            .send_email(&new_email, content.subject, &content.body)
            .await
            .map_err(EmailChangeError::Email)?;

        Ok(())
    }

    /// Redeem one side's confirmation token.
    ///
    /// The exact-equality check against the stored field covers both
    /// "never issued" and "already confirmed" (field already null) at once.
    /// The promotion decision reads the record returned by the clear write,
    /// so two racing confirmations cannot both see the other side pending:
    /// whichever clear lands second observes both fields null and promotes.
    #[tracing::instrument(name = "EmailChangeService::confirm", skip_all, fields(side = side.as_str()))]
    pub async fn confirm(
        &self,
        user: &User,
        token: &OneTimeToken,
        side: EmailChangeSide,
    ) -> Result<EmailChangeOutcome, EmailChangeError> {
        if user.email_change_token(side) != Some(token) {
            return Err(EmailChangeError::InvalidToken);
        }

        let updated = self
            .user_store
            .clear_email_change_token(&user.id(), side)
            .await?;

        if updated.email_change_token(side.other()).is_some() {
            return Ok(EmailChangeOutcome::Pending {
                awaiting: side.other(),
            });
        }

        self.user_store.promote_new_email(&user.id()).await?;
        Ok(EmailChangeOutcome::Completed)
    }
}
