use credo_core::{User, UserId, UserStore, UserStoreError};

/// Error types for change name use case
#[derive(Debug, thiserror::Error)]
pub enum ChangeNameError {
    #[error("User store error: {0}")]
    UserStore(#[from] UserStoreError),
}

/// Change name use case - updates the account's display name.
pub struct ChangeNameUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> ChangeNameUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "ChangeNameUseCase::execute", skip(self))]
    pub async fn execute(&self, id: &UserId, name: String) -> Result<User, ChangeNameError> {
        let user = self.user_store.set_name(id, name).await?;
        Ok(user)
    }
}
