/// 缓存操作

// 旁路缓存读取
pub mod cache_aside;

// Redis 缓存实现
pub mod redis_cache;

pub use cache_aside::get_or_fetch;
pub use redis_cache::RedisCache;
