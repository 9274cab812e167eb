//! 测试公共模块
//! 提供测试辅助函数和测试工具

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use hr_login::{
    config::{AppConfig, LoggingConfig, ServerConfig},
    middleware::AppState,
    services::AuthService,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

pub const LOGIN_URI: &str = "/api/auth/login";

/// 创建测试配置
pub fn create_test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:0".to_string(), // 使用随机端口
            graceful_shutdown_timeout_secs: 5,
            body_limit_bytes: 16 * 1024,
            cors_allowed_origins: None,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
    }
}

/// 创建测试应用状态（模拟认证）
pub fn create_test_app_state() -> Arc<AppState> {
    Arc::new(AppState::new(create_test_config(), Arc::new(AuthService::mock())))
}

pub fn create_test_router() -> Router {
    hr_login::routes::create_router(create_test_app_state())
}

/// 发送原始请求体到登录端点
pub async fn post_login_raw(app: Router, body: impl Into<Body>) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(LOGIN_URI)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// 发送 JSON 到登录端点，返回状态码和响应体
pub async fn post_login(body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = post_login_raw(create_test_router(), body.to_string()).await;
    let status = response.status();
    (status, read_json(response).await)
}

pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
