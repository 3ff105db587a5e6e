use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 用户数据库实体，id 由数据库分配
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserEntity {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// 已通过校验、待写入的用户
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}
