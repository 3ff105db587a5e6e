use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// 服务实例标识，用于区分负载均衡后面的不同实例
    pub identifier: String,
    pub database_url: Option<String>,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_pool_size: u32,
    pub db_idle_timeout_secs: u64,
    pub db_acquire_timeout_secs: u64,
    pub redis_url: Option<String>,
    pub redis_host: String,
    pub redis_port: u16,
    pub cache_ttl_secs: u64,
    pub cache_timeout_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".into(),
            server_port: 3000,
            identifier: "localhost".into(),
            database_url: None,
            db_host: "localhost".into(),
            db_port: 5432,
            db_user: "postgres".into(),
            db_password: String::new(),
            db_name: "postgres".into(),
            db_pool_size: 10,
            db_idle_timeout_secs: 60,
            db_acquire_timeout_secs: 5,
            redis_url: None,
            redis_host: "localhost".into(),
            redis_port: 6379,
            cache_ttl_secs: 10,
            cache_timeout_ms: 500,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let mut config = Self::from_lookup(|key| env::var(key).ok())?;
        if env::var("HOSTNAME").is_err() {
            config.identifier = gethostname::gethostname().to_string_lossy().into_owned();
        }
        Ok(config)
    }

    /// 从任意键值来源构建配置，未设置的项使用默认值
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str, default: String| lookup(key).unwrap_or(default);

        Ok(Config {
            server_host: text("SERVER_HOST", defaults.server_host),
            server_port: parse_or(&lookup, "PORT", defaults.server_port)?,
            identifier: text("HOSTNAME", defaults.identifier),
            database_url: lookup("DATABASE_URL"),
            db_host: text("DB_HOST", defaults.db_host),
            db_port: parse_or(&lookup, "DB_PORT", defaults.db_port)?,
            db_user: text("DB_USER", defaults.db_user),
            db_password: text("DB_PASSWORD", defaults.db_password),
            db_name: text("DB_NAME", defaults.db_name),
            db_pool_size: parse_or(&lookup, "DB_POOL_SIZE", defaults.db_pool_size)?,
            db_idle_timeout_secs: parse_or(
                &lookup,
                "DB_IDLE_TIMEOUT",
                defaults.db_idle_timeout_secs,
            )?,
            db_acquire_timeout_secs: parse_or(
                &lookup,
                "DB_ACQUIRE_TIMEOUT",
                defaults.db_acquire_timeout_secs,
            )?,
            redis_url: lookup("REDIS_URL"),
            redis_host: text("REDIS_HOST", defaults.redis_host),
            redis_port: parse_or(&lookup, "REDIS_PORT", defaults.redis_port)?,
            cache_ttl_secs: parse_or(&lookup, "CACHE_TTL", defaults.cache_ttl_secs)?,
            cache_timeout_ms: parse_or(
                &lookup,
                "CACHE_TIMEOUT_MS",
                defaults.cache_timeout_ms,
            )?,
            request_timeout_secs: parse_or(
                &lookup,
                "REQUEST_TIMEOUT",
                defaults.request_timeout_secs,
            )?,
        })
    }

    pub fn redis_url(&self) -> String {
        match &self.redis_url {
            Some(url) => url.clone(),
            None => format!("redis://{}:{}/", self.redis_host, self.redis_port),
        }
    }

    pub fn db_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.db_idle_timeout_secs)
    }

    pub fn db_acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.db_acquire_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn cache_timeout(&self) -> Duration {
        Duration::from_millis(self.cache_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.db_pool_size, 10);
        assert_eq!(config.cache_ttl(), Duration::from_secs(10));
        assert_eq!(config.redis_url(), "redis://localhost:6379/");
        assert!(config.database_url.is_none());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("HOSTNAME", "node-2"),
            ("DB_HOST", "db.internal"),
            ("DB_POOL_SIZE", "4"),
            ("REDIS_HOST", "cache.internal"),
            ("REDIS_PORT", "6380"),
            ("CACHE_TTL", "30"),
        ]))
        .unwrap();

        assert_eq!(config.server_port, 8080);
        assert_eq!(config.identifier, "node-2");
        assert_eq!(config.db_host, "db.internal");
        assert_eq!(config.db_pool_size, 4);
        assert_eq!(config.redis_url(), "redis://cache.internal:6380/");
        assert_eq!(config.cache_ttl(), Duration::from_secs(30));
    }

    #[test]
    fn explicit_redis_url_wins_over_parts() {
        let config = Config::from_lookup(lookup_from(&[
            ("REDIS_URL", "redis://:secret@10.0.0.5:6379/2"),
            ("REDIS_HOST", "ignored"),
        ]))
        .unwrap();
        assert_eq!(config.redis_url(), "redis://:secret@10.0.0.5:6379/2");
    }

    #[test]
    fn unparsable_number_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("DB_PORT", "five")])).unwrap_err();
        match err {
            ConfigError::InvalidValue { key, value } => {
                assert_eq!(key, "DB_PORT");
                assert_eq!(value, "five");
            }
        }
    }
}
