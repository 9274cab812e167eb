//! 统一错误模型
//! 定义所有错误类型和错误响应格式

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::{
    auth::ValidationErrors,
    models::auth::{
        ErrorCode, ErrorResponse, ACCOUNT_LOCKED_MESSAGE, INVALID_CREDENTIALS_MESSAGE,
        RATE_LIMITED_MESSAGE, SERVER_ERROR_MESSAGE,
    },
};

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account locked")]
    AccountLocked,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

impl AppError {
    /// 获取 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::AccountLocked => StatusCode::LOCKED,
            AppError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            AppError::MalformedBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 获取业务错误码，服务端错误没有错误码
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            AppError::Validation(_) => Some(ErrorCode::ValidationError),
            AppError::InvalidCredentials => Some(ErrorCode::InvalidCredentials),
            AppError::AccountLocked => Some(ErrorCode::AccountLocked),
            AppError::RateLimitExceeded => Some(ErrorCode::RateLimitExceeded),
            AppError::MalformedBody(_) => None,
        }
    }

    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(errors) => errors
                .first()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| SERVER_ERROR_MESSAGE.to_string()),
            AppError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            AppError::AccountLocked => ACCOUNT_LOCKED_MESSAGE.to_string(),
            AppError::RateLimitExceeded => RATE_LIMITED_MESSAGE.to_string(),
            AppError::MalformedBody(_) => SERVER_ERROR_MESSAGE.to_string(),
        }
    }

    /// 获取 HTTP 状态码数值
    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_response = ErrorResponse {
            success: false,
            message: self.user_message(),
            code: self.error_code(),
        };

        // 记录错误日志
        if status.is_server_error() {
            tracing::error!(code = self.code(), message = %self, "Application error");
        } else {
            tracing::warn!(
                code = self.code(),
                error_code = self.error_code().map(|c| c.as_str()),
                "Request rejected"
            );
        }

        (status, Json(error_response)).into_response()
    }
}

/// 请求体无法解析为 JSON
impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::MalformedBody(e.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::InvalidCredentials.code(), 401);
        assert_eq!(AppError::AccountLocked.code(), 423);
        assert_eq!(AppError::Validation(ValidationErrors::empty()).code(), 400);
        assert_eq!(AppError::RateLimitExceeded.code(), 429);
        assert_eq!(AppError::MalformedBody("eof".to_string()).code(), 500);
    }

    #[test]
    fn test_user_message_no_sensitive_info() {
        let error = AppError::MalformedBody("expected value at line 1 column 2".to_string());
        let message = error.user_message();
        assert_eq!(message, SERVER_ERROR_MESSAGE);
        assert!(!message.contains("line 1"));
        assert!(error.error_code().is_none());
    }
}
