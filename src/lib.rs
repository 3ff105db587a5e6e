use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use cache::Cache;
use config::Config;
use database::UserStore;

pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod routes;

/// 应用状态，数据库和缓存句柄都在启动时创建后注入
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub users: Arc<dyn UserStore>,
    pub cache: Arc<dyn Cache>,
}

impl AppState {
    pub fn new(config: Config, users: Arc<dyn UserStore>, cache: Arc<dyn Cache>) -> Self {
        Self {
            config,
            users,
            cache,
        }
    }
}

/// 创建主路由
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(routes::hello))
        .route("/users", get(routes::user::list_users))
        .route("/batchInsertUsers", post(routes::user::batch_insert_users))
        .route("/cachedData", get(routes::user::cached_data));

    // 添加日志中间件和超时
    let router = router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(axum::middleware::from_fn(middleware::log_errors))
            .layer(TimeoutLayer::new(state.config.request_timeout())),
    );

    // 开发模式下允许所有来源
    #[cfg(debug_assertions)]
    let router = router.layer(tower_http::cors::CorsLayer::permissive());

    router.with_state(state)
}
