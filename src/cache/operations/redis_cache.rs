use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client as RedisClient};
use tokio::sync::OnceCell;

use crate::cache::Cache;
use crate::error::CacheError;

/// Redis 缓存。
///
/// 连接在第一次使用时建立并在请求之间共享，断线后由 `ConnectionManager` 自动重连。
/// 建连失败不会被记住，下一次请求会重新尝试。每次操作（包括建连）都受超时限制。
#[derive(Clone)]
pub struct RedisCache {
    client: Arc<RedisClient>,
    manager: Arc<OnceCell<ConnectionManager>>,
    timeout: Duration,
}

impl RedisCache {
    pub fn new(client: Arc<RedisClient>, timeout: Duration) -> Self {
        Self {
            client,
            manager: Arc::new(OnceCell::new()),
            timeout,
        }
    }

    async fn connection(&self) -> Result<ConnectionManager, redis::RedisError> {
        let manager = self
            .manager
            .get_or_try_init(|| ConnectionManager::new(self.client.as_ref().clone()))
            .await?;
        Ok(manager.clone())
    }

    async fn bounded<T, F>(&self, op: F) -> Result<T, CacheError>
    where
        F: Future<Output = Result<T, redis::RedisError>>,
    {
        match tokio::time::timeout(self.timeout, op).await {
            Ok(result) => result.map_err(CacheError::from),
            Err(_) => Err(CacheError::Timeout),
        }
    }
}

/// Redis 的 EX 最小为 1 秒
fn expire_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.bounded(async {
            let mut conn = self.connection().await?;
            let value: Option<String> = conn.get(key).await?;
            Ok::<_, redis::RedisError>(value)
        })
        .await
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let seconds = expire_seconds(ttl);
        self.bounded(async {
            let mut conn = self.connection().await?;
            let _: () = conn.set_ex(key, value, seconds).await?;
            Ok::<_, redis::RedisError>(())
        })
        .await
    }
}
