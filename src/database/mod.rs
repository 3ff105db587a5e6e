// 数据库模块
// 包含数据库实体定义、连接池构建和存储库操作

pub mod models;
pub mod repositories;

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::config::Config;
use crate::error::StoreError;

// 重新导出常用类型，方便其他模块使用
pub use models::{NewUser, UserEntity};
pub use repositories::user::UserRepository;

/// 用户存储接口，处理器只依赖这个接口，便于测试时替换实现
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 按 id 升序返回全部用户
    async fn list_users(&self) -> Result<Vec<UserEntity>, StoreError>;

    /// 在一个事务中按顺序写入全部用户，返回分配的 id。
    /// 任意一条失败时整批回滚，不会留下部分数据。
    async fn batch_insert(&self, users: &[NewUser]) -> Result<Vec<i64>, StoreError>;
}

pub fn connect_options(config: &Config) -> Result<PgConnectOptions, sqlx::Error> {
    match &config.database_url {
        Some(url) => PgConnectOptions::from_str(url),
        None => Ok(PgConnectOptions::new()
            .host(&config.db_host)
            .port(config.db_port)
            .username(&config.db_user)
            .password(&config.db_password)
            .database(&config.db_name)
            .application_name("user_service")),
    }
}

/// 设置数据库连接池
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    let options = connect_options(config)?;

    PgPoolOptions::new()
        .max_connections(config.db_pool_size)
        .idle_timeout(config.db_idle_timeout())
        .acquire_timeout(config.db_acquire_timeout())
        .connect_with(options)
        .await
}

/// 建表，可重复执行
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            username VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
