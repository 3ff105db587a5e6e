use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use user_service::{
    AppState, app,
    cache::RedisCache,
    config::Config,
    database::{self, UserRepository},
};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    #[cfg(debug_assertions)]
    tracing::info!("Running in debug mode with CORS enabled");

    // 设置数据库连接池
    let pool = database::connect(&config)
        .await
        .expect("Failed to connect to Postgres");
    database::init_schema(&pool)
        .await
        .expect("Failed to initialize database schema");

    // 设置 Redis 客户端，连接在首次使用时建立，Redis 不可用不影响启动
    let redis_client =
        redis::Client::open(config.redis_url()).expect("Failed to create Redis client");
    let cache = RedisCache::new(Arc::new(redis_client), config.cache_timeout());

    // 设置应用状态
    let state = AppState::new(
        config.clone(),
        Arc::new(UserRepository::new(pool)),
        Arc::new(cache),
    );

    // 启动服务器
    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    tracing::info!("Server is running on {}:{}", config.identifier, config.server_port);
    axum::serve(listener, app(state))
        .await
        .expect("Failed to start server");
}
