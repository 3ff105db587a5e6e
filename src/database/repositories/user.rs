use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::UserStore;
use crate::database::models::{NewUser, UserEntity};
use crate::error::StoreError;

/// 用户存储库实现
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn list_users(&self) -> Result<Vec<UserEntity>, StoreError> {
        let users = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, username, email
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn batch_insert(&self, users: &[NewUser]) -> Result<Vec<i64>, StoreError> {
        // 开启事务，整个事务期间独占一个连接
        let mut tx = self.pool.begin().await.map_err(StoreError::Begin)?;
        tracing::info!("Batch insert: transaction started for {} users", users.len());

        let mut ids = Vec::with_capacity(users.len());
        for (index, user) in users.iter().enumerate() {
            let result = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO users (username, email)
                VALUES ($1, $2)
                RETURNING id
                "#,
            )
            .bind(&user.username)
            .bind(&user.email)
            .fetch_one(&mut *tx)
            .await;

            match result {
                Ok(id) => ids.push(id),
                Err(source) => {
                    tracing::warn!(
                        "Batch insert: users[{}] failed, rolling back: {}",
                        index,
                        source
                    );
                    if let Err(e) = tx.rollback().await {
                        // 连接归还连接池时 sqlx 仍会回滚
                        tracing::error!("Batch insert: rollback failed: {}", e);
                    } else {
                        tracing::info!("Batch insert: transaction rolled back");
                    }
                    return Err(StoreError::Insert { index, source });
                }
            }
        }

        if let Err(e) = tx.commit().await {
            tracing::error!("Batch insert: commit failed: {}", e);
            return Err(StoreError::Commit(e));
        }
        tracing::info!("Batch insert: transaction committed, {} users inserted", ids.len());

        Ok(ids)
    }
}
