use std::sync::Arc;
use std::time::Duration;

use redis::{Commands, Connection};
use tokio::sync::RwLock;

use credo_core::{OneTimeToken, TokenKind, TokenStore, TokenStoreError, UserId};

/// Production token store backed by Redis.
///
/// Reset tokens ride on Redis key expiry; confirmation tokens are stored
/// without one. Values are the owning user's id.
#[derive(Clone)]
pub struct RedisTokenStore {
    conn: Arc<RwLock<Connection>>,
}

impl RedisTokenStore {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl TokenStore for RedisTokenStore {
    async fn put(
        &self,
        kind: TokenKind,
        token: &OneTimeToken,
        user_id: UserId,
        ttl: Option<Duration>,
    ) -> Result<(), TokenStoreError> {
        let key = storage_key(kind, token);

        let mut conn = self.conn.write().await;
        match ttl {
            Some(ttl) => conn
                .set_ex::<_, _, ()>(key, user_id.to_string(), ttl.as_secs())
                .map_err(|e| TokenStoreError::UnexpectedError(e.to_string())),
            None => conn
                .set::<_, _, ()>(key, user_id.to_string())
                .map_err(|e| TokenStoreError::UnexpectedError(e.to_string())),
        }
    }

    async fn lookup(
        &self,
        kind: TokenKind,
        token: &OneTimeToken,
    ) -> Result<Option<UserId>, TokenStoreError> {
        let key = storage_key(kind, token);

        let mut conn = self.conn.write().await;
        let value: Option<String> = conn
            .get(&key)
            .map_err(|e| TokenStoreError::UnexpectedError(e.to_string()))?;

        value
            .map(|v| {
                v.parse::<UserId>()
                    .map_err(|e| TokenStoreError::UnexpectedError(e.to_string()))
            })
            .transpose()
    }

    async fn remove(
        &self,
        kind: TokenKind,
        token: &OneTimeToken,
    ) -> Result<(), TokenStoreError> {
        let key = storage_key(kind, token);

        let mut conn = self.conn.write().await;
        conn.del::<_, ()>(key)
            .map_err(|e| TokenStoreError::UnexpectedError(e.to_string()))
    }
}

// Key prefixes keep the token classes apart and leave room for other
// tenants of the same Redis instance.
fn storage_key(kind: TokenKind, token: &OneTimeToken) -> String {
    format!("{}:{}", kind.key_prefix(), token.as_str())
}
