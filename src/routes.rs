//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};

use crate::{config::ServerConfig, handlers, middleware::AppState};

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查）
    let public_routes = Router::new().route("/health", get(handlers::health::health_check));

    // 认证路由
    let auth_routes = Router::new().route("/api/auth/login", post(handlers::auth::login));

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .layer(RequestBodyLimitLayer::new(state.config.server.body_limit_bytes))
        .layer(cors_layer(&state.config.server))
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state)
}

/// 按配置构建 CORS 层，未配置来源时不放行任何跨域请求
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let Some(origins) = &server.cors_allowed_origins else {
        return CorsLayer::new();
    };

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
