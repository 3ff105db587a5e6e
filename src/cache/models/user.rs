use serde::{Deserialize, Serialize};

use crate::database::UserEntity;

/// `/cachedData` 的响应体，同时也是写入缓存的内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedUsers {
    pub users: Vec<UserEntity>,
}
