//! 错误处理单元测试
//!
//! 测试应用错误类型与响应体格式

use axum::{http::StatusCode, response::IntoResponse};
use hr_login::{
    auth::validate_login,
    error::AppError,
    models::auth::{ErrorCode, ErrorResponse},
};
use http_body_util::BodyExt;
use serde_json::json;

// ==================== 错误状态码测试 ====================

#[test]
fn test_error_status_codes() {
    let validation = AppError::Validation(validate_login(&json!({})).unwrap_err());

    assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::AccountLocked.status_code(), StatusCode::LOCKED);
    assert_eq!(AppError::RateLimitExceeded.status_code(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        AppError::MalformedBody("eof".to_string()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_error_codes() {
    assert_eq!(AppError::InvalidCredentials.error_code(), Some(ErrorCode::InvalidCredentials));
    assert_eq!(AppError::AccountLocked.error_code(), Some(ErrorCode::AccountLocked));
    assert_eq!(AppError::MalformedBody("eof".to_string()).error_code(), None);
}

#[test]
fn test_error_code_names() {
    assert_eq!(serde_json::to_value(ErrorCode::ValidationError).unwrap(), "VALIDATION_ERROR");
    assert_eq!(
        serde_json::to_value(ErrorCode::InvalidCredentials).unwrap(),
        "INVALID_CREDENTIALS"
    );
    assert_eq!(serde_json::to_value(ErrorCode::AccountLocked).unwrap(), "ACCOUNT_LOCKED");
    assert_eq!(
        serde_json::to_value(ErrorCode::RateLimitExceeded).unwrap(),
        "RATE_LIMIT_EXCEEDED"
    );
    assert_eq!(ErrorCode::RateLimitExceeded.as_str(), "RATE_LIMIT_EXCEEDED");
}

// ==================== 用户消息测试 ====================

#[test]
fn test_validation_message_is_first_field_error() {
    let errors = validate_login(&json!({ "email": "invalid-email", "password": "short" }))
        .unwrap_err();
    let expected = errors.first().unwrap().message.clone();

    assert_eq!(AppError::Validation(errors).user_message(), expected);
}

#[test]
fn test_malformed_body_hides_parser_details() {
    let parse_error = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
    let error = AppError::from(parse_error);

    assert!(matches!(error, AppError::MalformedBody(_)));
    assert_eq!(error.user_message(), "サーバーエラーが発生しました");
}

// ==================== 响应体测试 ====================

#[tokio::test]
async fn test_into_response_body() {
    let response = AppError::AccountLocked.into_response();
    assert_eq!(response.status(), StatusCode::LOCKED);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();

    assert!(!body.success);
    assert_eq!(body.code, Some(ErrorCode::AccountLocked));
    assert_eq!(
        body.message,
        "アカウントがロックされています。サポートにお問い合わせください。"
    );
}

#[tokio::test]
async fn test_server_error_body_has_no_code() {
    let response = AppError::MalformedBody("eof".to_string()).into_response();

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["success"], false);
    assert!(body.get("code").is_none());
}
