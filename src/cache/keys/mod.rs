// 缓存键模块

use axum::http::Uri;

/// 用请求路径（包含查询参数）作为缓存键，不同查询参数各自缓存
pub fn request_key(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}
