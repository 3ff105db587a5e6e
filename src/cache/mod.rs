// 缓存模块
// 包含缓存键、缓存数据结构和旁路缓存逻辑

pub mod keys;
pub mod models;
pub mod operations;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

// 重新导出常用类型和函数，方便其他模块使用
pub use models::user::CachedUsers;
pub use operations::{RedisCache, get_or_fetch};

/// 缓存接口，只需要读取和带过期时间的写入
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;
}
