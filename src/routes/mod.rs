use axum::extract::State;

use crate::AppState;

pub mod user;

/// 返回带实例标识的问候语，用于确认请求落在哪个实例上
pub async fn hello(State(state): State<AppState>) -> String {
    format!("Hello, World {}!\n", state.config.identifier)
}
