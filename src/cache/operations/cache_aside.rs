use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cache::Cache;

/// 旁路缓存读取。
///
/// 先查缓存，命中则直接返回；未命中（或缓存出错、缓存内容无法解析）时调用 `fetch`
/// 查询数据库，再把结果写回缓存。缓存的任何错误都只记录日志，不会让请求失败；
/// `fetch` 的错误原样返回，且不会写入缓存。
pub async fn get_or_fetch<T, E, F, Fut>(
    cache: &dyn Cache,
    key: &str,
    ttl: Duration,
    fetch: F,
) -> Result<T, E>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    match cache.get(key).await {
        Ok(Some(json)) => match serde_json::from_str::<T>(&json) {
            Ok(value) => {
                tracing::debug!("Cache hit: {}", key);
                return Ok(value);
            }
            Err(e) => tracing::warn!("Discarding malformed cache entry {}: {}", key, e),
        },
        Ok(None) => tracing::debug!("Cache miss: {}", key),
        Err(e) => tracing::warn!("Cache read failed for {}, falling back to store: {}", key, e),
    }

    let value = fetch().await?;

    match serde_json::to_string(&value) {
        Ok(json) => {
            if let Err(e) = cache.set_ex(key, &json, ttl).await {
                tracing::warn!("Failed to cache {}: {}", key, e);
            }
        }
        Err(e) => tracing::warn!("Failed to serialize value for {}: {}", key, e),
    }

    Ok(value)
}
