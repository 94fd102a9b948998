use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use credo_core::{OneTimeToken, TokenKind, TokenStore, TokenStoreError, UserId};

/// In-memory token store for local development and tests.
///
/// TTLs are enforced lazily: an expired record is dropped the first time a
/// lookup touches it.
#[derive(Default, Clone)]
pub struct HashMapTokenStore {
    records: Arc<RwLock<HashMap<String, TokenRecord>>>,
}

#[derive(Clone, Copy)]
struct TokenRecord {
    user_id: UserId,
    expires_at: Option<Instant>,
}

impl HashMapTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn storage_key(kind: TokenKind, token: &OneTimeToken) -> String {
    format!("{}:{}", kind.key_prefix(), token.as_str())
}

#[async_trait::async_trait]
impl TokenStore for HashMapTokenStore {
    async fn put(
        &self,
        kind: TokenKind,
        token: &OneTimeToken,
        user_id: UserId,
        ttl: Option<Duration>,
    ) -> Result<(), TokenStoreError> {
        let record = TokenRecord {
            user_id,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        };
        self.records
            .write()
            .await
            .insert(storage_key(kind, token), record);
        Ok(())
    }

    async fn lookup(
        &self,
        kind: TokenKind,
        token: &OneTimeToken,
    ) -> Result<Option<UserId>, TokenStoreError> {
        let key = storage_key(kind, token);
        let mut records = self.records.write().await;

        let Some(record) = records.get(&key) else {
            return Ok(None);
        };

        if record.expires_at.is_some_and(|at| at <= Instant::now()) {
            records.remove(&key);
            return Ok(None);
        }

        Ok(Some(record.user_id))
    }

    async fn remove(
        &self,
        kind: TokenKind,
        token: &OneTimeToken,
    ) -> Result<(), TokenStoreError> {
        self.records
            .write()
            .await
            .remove(&storage_key(kind, token));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_without_ttl_persist() {
        let store = HashMapTokenStore::new();
        let token = OneTimeToken::generate();
        let user_id = UserId::new();

        store
            .put(TokenKind::EmailConfirmation, &token, user_id, None)
            .await
            .unwrap();

        assert_eq!(
            store
                .lookup(TokenKind::EmailConfirmation, &token)
                .await
                .unwrap(),
            Some(user_id)
        );
    }

    #[tokio::test]
    async fn elapsed_ttl_reads_as_absent() {
        let store = HashMapTokenStore::new();
        let token = OneTimeToken::generate();

        store
            .put(
                TokenKind::PasswordReset,
                &token,
                UserId::new(),
                Some(Duration::ZERO),
            )
            .await
            .unwrap();

        assert_eq!(
            store.lookup(TokenKind::PasswordReset, &token).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn kinds_do_not_collide() {
        let store = HashMapTokenStore::new();
        let token = OneTimeToken::generate();
        let user_id = UserId::new();

        store
            .put(TokenKind::EmailConfirmation, &token, user_id, None)
            .await
            .unwrap();

        assert_eq!(
            store.lookup(TokenKind::PasswordReset, &token).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn removed_records_stop_resolving() {
        let store = HashMapTokenStore::new();
        let token = OneTimeToken::generate();

        store
            .put(TokenKind::EmailConfirmation, &token, UserId::new(), None)
            .await
            .unwrap();
        store
            .remove(TokenKind::EmailConfirmation, &token)
            .await
            .unwrap();

        assert_eq!(
            store
                .lookup(TokenKind::EmailConfirmation, &token)
                .await
                .unwrap(),
            None
        );
    }
}
