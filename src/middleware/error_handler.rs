use axum::{
    body::{Body, Bytes, to_bytes},
    http::{Request, header},
    middleware::Next,
    response::Response,
};

/// 响应体最多读取这么多字节用于日志
const MAX_LOGGED_BODY: usize = 1024;

/// 记录所有 5xx 响应。响应体被读出来写进日志后再原样放回。
pub async fn log_errors(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let response = next.run(req).await;

    if !response.status().is_server_error() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = to_bytes(body, MAX_LOGGED_BODY).await.unwrap_or_else(|e| {
        tracing::warn!("Failed to read error response body: {}", e);
        Bytes::new()
    });

    tracing::error!(
        %method,
        %path,
        status = parts.status.as_u16(),
        body = %String::from_utf8_lossy(&bytes),
        "Server error response"
    );

    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}
