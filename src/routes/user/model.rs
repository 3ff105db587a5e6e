use serde::{Deserialize, Serialize};

use crate::database::NewUser;
use crate::error::ValidationError;

/// 请求中的单个用户，字段缺失时在校验阶段报错而不是反序列化失败
#[derive(Debug, Default, Deserialize)]
pub struct CandidateUser {
    pub username: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BatchInsertRequest {
    #[serde(default)]
    pub users: Vec<CandidateUser>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchInsertResult {
    pub inserted: usize,
    pub ids: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchInsertResponse {
    pub message: String,
    pub result: BatchInsertResult,
}

impl BatchInsertRequest {
    /// 校验整批数据，任意一条不合法则整批拒绝
    pub fn validate(self) -> Result<Vec<NewUser>, ValidationError> {
        if self.users.is_empty() {
            return Err(ValidationError::EmptyBatch);
        }

        self.users
            .into_iter()
            .enumerate()
            .map(|(index, user)| {
                let username = required(user.username, index, "username")?;
                let email = required(user.email, index, "email")?;
                Ok(NewUser { username, email })
            })
            .collect()
    }
}

fn required(
    value: Option<String>,
    index: usize,
    field: &'static str,
) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField { index, field }),
    }
}
