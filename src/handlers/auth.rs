//! 认证相关的 HTTP 处理器

use crate::{error::Result, middleware::AppState, models::auth::LoginSuccessResponse};
use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use serde_json::Value;
use std::sync::Arc;

/// 登录
///
/// 请求体按原始字节读取后自行解析：无法解析的请求体返回 500，
/// 不依赖 Content-Type 头。
pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<LoginSuccessResponse>> {
    let raw: Value = serde_json::from_slice(&body)?;

    let client_ip = get_client_ip(&headers).unwrap_or_else(|| "unknown".to_string());

    let response = state.auth_service.login(&raw, &client_ip).await?;

    Ok(Json(response))
}

/// 获取客户端 IP 地址（仅用于日志）
fn get_client_ip(headers: &HeaderMap) -> Option<String> {
    // 首先检查 X-Forwarded-For（代理情况）
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(forwarded_str) = forwarded.to_str() {
            // X-Forwarded-For 可能包含多个 IP，取第一个
            if let Some(first_ip) = forwarded_str.split(',').next() {
                return Some(first_ip.trim().to_string());
            }
        }
    }

    // 然后检查 X-Real-IP
    if let Some(real_ip) = headers.get("x-real-ip") {
        if let Ok(ip_str) = real_ip.to_str() {
            return Some(ip_str.to_string());
        }
    }

    None
}
