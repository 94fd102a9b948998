use credo_core::{Password, User, UserStore, UserStoreError};

/// Error types for change password use case
#[derive(Debug, thiserror::Error)]
pub enum ChangePasswordError {
    #[error("Incorrect password provided")]
    IncorrectPassword,
    #[error("User store error: {0}")]
    UserStore(UserStoreError),
}

/// Change password use case - re-verifies the current password before
/// setting the new one.
pub struct ChangePasswordUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> ChangePasswordUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "ChangePasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        user: &User,
        current_password: Password,
        new_password: Password,
    ) -> Result<(), ChangePasswordError> {
        self.user_store
            .authenticate(user.email(), &current_password)
            .await
            .map_err(|e| match e {
                UserStoreError::IncorrectPassword => ChangePasswordError::IncorrectPassword,
                other => ChangePasswordError::UserStore(other),
            })?;

        self.user_store
            .set_password(&user.id(), new_password)
            .await
            .map_err(ChangePasswordError::UserStore)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{InMemoryUserStore, email, password};
    use credo_core::User;

    #[tokio::test]
    async fn correct_current_password_lets_the_change_through() {
        let users = InMemoryUserStore::new();
        let user = User::new("Alice", email("alice@example.com"));
        users.seed(user.clone(), password("password123")).await;

        let use_case = ChangePasswordUseCase::new(users.clone());
        use_case
            .execute(&user, password("password123"), password("brand-new-pass"))
            .await
            .unwrap();

        users
            .authenticate(&email("alice@example.com"), &password("brand-new-pass"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn wrong_current_password_is_rejected() {
        let users = InMemoryUserStore::new();
        let user = User::new("Alice", email("alice@example.com"));
        users.seed(user.clone(), password("password123")).await;

        let use_case = ChangePasswordUseCase::new(users.clone());
        let result = use_case
            .execute(&user, password("not-the-password"), password("brand-new-pass"))
            .await;
        assert!(matches!(result, Err(ChangePasswordError::IncorrectPassword)));

        // Old password still works.
        users
            .authenticate(&email("alice@example.com"), &password("password123"))
            .await
            .unwrap();
    }
}
