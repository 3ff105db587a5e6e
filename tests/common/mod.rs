#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use user_service::{
    AppState, app,
    cache::Cache,
    config::Config,
    database::{NewUser, UserEntity, UserStore},
    error::{CacheError, StoreError},
};

/// 内存用户存储，email 唯一，批量写入要么全部成功要么全部不生效
#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<UserEntity>>,
    pub list_calls: AtomicUsize,
    pub unavailable: AtomicBool,
}

impl MemoryUserStore {
    pub fn rows(&self) -> Vec<UserEntity> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list_users(&self) -> Result<Vec<UserEntity>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Query(sqlx::Error::PoolTimedOut));
        }
        Ok(self.rows())
    }

    async fn batch_insert(&self, users: &[NewUser]) -> Result<Vec<i64>, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Begin(sqlx::Error::PoolTimedOut));
        }

        let mut rows = self.rows.lock().unwrap();
        let mut staged = rows.clone();
        let mut ids = Vec::with_capacity(users.len());
        for (index, user) in users.iter().enumerate() {
            if staged.iter().any(|row| row.email == user.email) {
                return Err(StoreError::Insert {
                    index,
                    source: sqlx::Error::Protocol(format!("duplicate email {}", user.email)),
                });
            }
            let id = staged.last().map(|row| row.id + 1).unwrap_or(1);
            staged.push(UserEntity {
                id,
                username: user.username.clone(),
                email: user.email.clone(),
            });
            ids.push(id);
        }

        *rows = staged;
        Ok(ids)
    }
}

/// 内存缓存，可以模拟不可用以及手动让所有条目过期
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
    pub last_ttl: Mutex<Option<Duration>>,
    pub unavailable: AtomicBool,
}

impl MemoryCache {
    pub fn expire_all(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn put_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CacheError::Timeout);
        }
        Ok(self.get_raw(key))
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CacheError::Timeout);
        }
        *self.last_ttl.lock().unwrap() = Some(ttl);
        self.put_raw(key, value);
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryUserStore>,
    pub cache: Arc<MemoryCache>,
}

fn test_config() -> Config {
    Config {
        identifier: "test-node".into(),
        ..Config::default()
    }
}

pub fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryUserStore::default());
    let cache = Arc::new(MemoryCache::default());

    let state = AppState::new(test_config(), store.clone(), cache.clone());
    TestApp {
        router: app(state),
        store,
        cache,
    }
}

/// 使用指定的缓存实现启动应用，用于接入真实的 Redis 客户端
pub fn spawn_app_with_cache(cache: Arc<dyn Cache>) -> (Router, Arc<MemoryUserStore>) {
    let store = Arc::new(MemoryUserStore::default());
    let state = AppState::new(test_config(), store.clone(), cache);
    (app(state), store)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}
