use std::time::Duration;

use chrono::Utc;
use credo_core::{
    Email, EmailClient, OneTimeToken, Password, TokenKind, TokenStore, TokenStoreError, User,
    UserStore, UserStoreError,
};

use crate::mail::MailScheme;

/// How long a password-reset link stays redeemable. Confirmation tokens
/// carry no TTL: they stay valid until redeemed or superseded.
pub const RESET_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);

/// Error types for the credential recovery service
#[derive(Debug, thiserror::Error)]
pub enum CredentialRecoveryError {
    #[error("Invalid token provided")]
    InvalidToken,
    #[error("Token was issued for a different account")]
    TokenOwnerMismatch,
    #[error("No account registered for that email address")]
    UserNotFound,
    #[error("User store error: {0}")]
    UserStore(#[from] UserStoreError),
    #[error("Token store error: {0}")]
    TokenStore(#[from] TokenStoreError),
    #[error("Failed to send email: {0}")]
    Email(String),
}

/// Issues and redeems the single-use tokens behind account confirmation and
/// forgot-password.
///
/// Every token is a fresh, independent record: issuing a new one never
/// invalidates earlier live tokens of the same class. Redemption deletes the
/// record first, so each token resolves at most once.
pub struct CredentialRecoveryService<U, T, E>
where
    U: UserStore,
    T: TokenStore,
    E: EmailClient,
{
    user_store: U,
    token_store: T,
    email_client: E,
    mail: MailScheme,
}

impl<U, T, E> CredentialRecoveryService<U, T, E>
where
    U: UserStore,
    T: TokenStore,
    E: EmailClient,
{
    pub fn new(user_store: U, token_store: T, email_client: E, mail: MailScheme) -> Self {
        Self {
            user_store,
            token_store,
            email_client,
            mail,
        }
    }

    /// Issue a confirmation token for the account's signup address and mail
    /// the confirmation link.
    ///
    /// The token is stored before the send: a dropped mail leaves a
    /// redeemable token behind, and a later resend issues another one
    /// without touching it.
    #[tracing::instrument(name = "CredentialRecoveryService::send_confirmation_email", skip_all)]
    pub async fn send_confirmation_email(&self, user: &User) -> Result<(), CredentialRecoveryError> {
        let token = OneTimeToken::generate();
        self.token_store
            .put(TokenKind::EmailConfirmation, &token, user.id(), None)
            .await?;

        let content = self.mail.account_confirmation(user.name(), &token);
        self.email_client
            .send_email(user.email(), content.subject, &content.body)
            .await
            .map_err(CredentialRecoveryError::Email)?;

        Ok(())
    }

    /// Redeem a confirmation token for the calling user.
    ///
    /// The caller's identity must match the token's owner; a token lifted
    /// from another account's mail is rejected without revealing whether it
    /// ever existed. The already-confirmed precondition is the boundary's
    /// job, checked before this method is reached.
    #[tracing::instrument(name = "CredentialRecoveryService::confirm_email", skip_all)]
    pub async fn confirm_email(
        &self,
        user: &User,
        token: &OneTimeToken,
    ) -> Result<(), CredentialRecoveryError> {
        let owner = self
            .token_store
            .lookup(TokenKind::EmailConfirmation, token)
            .await?
            .ok_or(CredentialRecoveryError::InvalidToken)?;

        if owner != user.id() {
            return Err(CredentialRecoveryError::TokenOwnerMismatch);
        }

        self.token_store
            .remove(TokenKind::EmailConfirmation, token)
            .await?;
        self.user_store
            .mark_email_confirmed(&owner, Utc::now())
            .await?;

        Ok(())
    }

    /// Issue a reset token for the given address and mail the reset link.
    ///
    /// An unregistered address is reported as such to the caller. That
    /// reveals which addresses have accounts; kept as-is, see DESIGN.md.
    #[tracing::instrument(name = "CredentialRecoveryService::forgot_password", skip_all)]
    pub async fn forgot_password(&self, email: &Email) -> Result<(), CredentialRecoveryError> {
        let user = self
            .user_store
            .find_by_email(email)
            .await?
            .ok_or(CredentialRecoveryError::UserNotFound)?;

        let token = OneTimeToken::generate();
        self.token_store
            .put(
                TokenKind::PasswordReset,
                &token,
                user.id(),
                Some(RESET_TOKEN_TTL),
            )
            .await?;

        let content = self.mail.password_reset(user.name(), &token);
        self.email_client
            .send_email(user.email(), content.subject, &content.body)
            .await
            .map_err(CredentialRecoveryError::Email)?;

        Ok(())
    }

    /// Redeem a reset token and set the new password.
    ///
    /// The record is deleted before the password write, so the token is
    /// consumed exactly once even if the write fails and is surfaced.
    #[tracing::instrument(name = "CredentialRecoveryService::reset_password", skip_all)]
    pub async fn reset_password(
        &self,
        token: &OneTimeToken,
        new_password: Password,
    ) -> Result<(), CredentialRecoveryError> {
        let owner = self
            .token_store
            .lookup(TokenKind::PasswordReset, token)
            .await?
            .ok_or(CredentialRecoveryError::InvalidToken)?;

        self.token_store
            .remove(TokenKind::PasswordReset, token)
            .await?;
        self.user_store.set_password(&owner, new_password).await?;

        Ok(())
    }
}
