use credo_core::{UserId, UserStore, UserStoreError};

/// Error types for delete account use case
#[derive(Debug, thiserror::Error)]
pub enum DeleteAccountError {
    #[error("User store error: {0}")]
    UserStore(#[from] UserStoreError),
}

/// Delete account use case - removes the account record.
pub struct DeleteAccountUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> DeleteAccountUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "DeleteAccountUseCase::execute", skip(self))]
    pub async fn execute(&self, id: &UserId) -> Result<(), DeleteAccountError> {
        self.user_store.delete_user(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{InMemoryUserStore, email, password};
    use credo_core::User;

    #[tokio::test]
    async fn deletes_the_account() {
        let users = InMemoryUserStore::new();
        let user = User::new("Alice", email("alice@example.com"));
        users.seed(user.clone(), password("password123")).await;

        let use_case = DeleteAccountUseCase::new(users.clone());
        use_case.execute(&user.id()).await.unwrap();

        assert_eq!(
            users.find_by_id(&user.id()).await.unwrap_err(),
            UserStoreError::UserNotFound
        );
    }

    #[tokio::test]
    async fn deleting_twice_reports_not_found() {
        let users = InMemoryUserStore::new();
        let user = User::new("Alice", email("alice@example.com"));
        users.seed(user.clone(), password("password123")).await;

        let use_case = DeleteAccountUseCase::new(users.clone());
        use_case.execute(&user.id()).await.unwrap();
        let result = use_case.execute(&user.id()).await;
        assert!(matches!(
            result,
            Err(DeleteAccountError::UserStore(UserStoreError::UserNotFound))
        ));
    }
}
