use credo_core::{Email, Password, User, UserStore, UserStoreError};

/// Error types for login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("User store error: {0}")]
    UserStore(#[from] UserStoreError),
}

/// Login use case - verifies credentials and yields the account.
///
/// Session issuance is the boundary's concern; this only answers whether
/// the credentials match an account.
pub struct LoginUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> LoginUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email, password: Password) -> Result<User, LoginError> {
        let user = self.user_store.authenticate(&email, &password).await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{InMemoryUserStore, email, password};
    use credo_core::User;

    #[tokio::test]
    async fn valid_credentials_yield_the_user() {
        let users = InMemoryUserStore::new();
        let user = User::new("Alice", email("alice@example.com"));
        users.seed(user.clone(), password("password123")).await;

        let use_case = LoginUseCase::new(users);
        let logged_in = use_case
            .execute(email("alice@example.com"), password("password123"))
            .await
            .unwrap();
        assert_eq!(logged_in.id(), user.id());
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let users = InMemoryUserStore::new();
        users
            .seed(
                User::new("Alice", email("alice@example.com")),
                password("password123"),
            )
            .await;

        let use_case = LoginUseCase::new(users);
        let result = use_case
            .execute(email("alice@example.com"), password("not-the-password"))
            .await;
        assert!(matches!(
            result,
            Err(LoginError::UserStore(UserStoreError::IncorrectPassword))
        ));
    }

    #[tokio::test]
    async fn unknown_email_is_rejected() {
        let use_case = LoginUseCase::new(InMemoryUserStore::new());
        let result = use_case
            .execute(email("nobody@example.com"), password("password123"))
            .await;
        assert!(matches!(
            result,
            Err(LoginError::UserStore(UserStoreError::UserNotFound))
        ));
    }
}
