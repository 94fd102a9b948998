use credo_core::{Email, EmailClient, Password, TokenStore, User, UserStore, UserStoreError};

use crate::use_cases::credential_recovery::{CredentialRecoveryError, CredentialRecoveryService};

/// Error types for signup use case
#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("User store error: {0}")]
    UserStore(#[from] UserStoreError),
    #[error("Credential recovery error: {0}")]
    Recovery(#[from] CredentialRecoveryError),
}

/// Signup use case - registers an account and sends the first confirmation
/// email for its signup address.
pub struct SignupUseCase<U, T, E>
where
    U: UserStore,
    T: TokenStore,
    E: EmailClient,
{
    user_store: U,
    recovery: CredentialRecoveryService<U, T, E>,
}

impl<U, T, E> SignupUseCase<U, T, E>
where
    U: UserStore,
    T: TokenStore,
    E: EmailClient,
{
    pub fn new(user_store: U, recovery: CredentialRecoveryService<U, T, E>) -> Self {
        Self {
            user_store,
            recovery,
        }
    }

    #[tracing::instrument(name = "SignupUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        name: String,
        email: Email,
        password: Password,
    ) -> Result<User, SignupError> {
        let user = User::new(name, email);
        self.user_store.add_user(user.clone(), password).await?;
        self.recovery.send_confirmation_email(&user).await?;
        Ok(user)
    }
}
